pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::optimization::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/keywords/extract",
            post(handlers::handle_extract_keywords),
        )
        .route("/api/v1/resumes/optimize", post(handlers::handle_optimize))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::optimization::keywords::KeywordVocabulary;

    fn test_router() -> Router {
        let vocabulary = KeywordVocabulary::new(
            ["React", "Node", "Python", "SQL"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        );
        build_router(AppState {
            vocabulary: Arc::new(vocabulary),
        })
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn resume_json() -> Value {
        json!({
            "contactInfo": { "name": "Jo Park", "email": "jo@example.com" },
            "summaries": [
                { "text": "Data analyst", "keywords": ["SQL"] },
                { "text": "Web developer using React", "keywords": ["React"] }
            ],
            "jobs": [
                {
                    "title": "Analyst", "company": "Numbers Co",
                    "startDate": "2018", "endDate": "2020",
                    "bullets": [{ "text": "Wrote SQL reports", "keywords": ["SQL"] }]
                },
                {
                    "title": "Developer", "company": "Web Co",
                    "startDate": "2020", "endDate": "Present",
                    "bullets": [
                        { "text": "Shipped React features", "keywords": ["React"] },
                        { "text": "Maintained Node APIs", "keywords": ["Node"] }
                    ]
                }
            ],
            "projects": [],
            "educations": [],
            "skills": [{ "name": "React", "experience": "expert" }]
        })
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["known_keywords"], 4);
    }

    #[tokio::test]
    async fn test_extract_keywords_endpoint() {
        let (status, body) = post_json(
            test_router(),
            "/api/v1/keywords/extract",
            json!({ "job_description": "Node and react engineer" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["React", "Node"]));
    }

    #[tokio::test]
    async fn test_optimize_ranks_matching_job_first() {
        let (status, body) = post_json(
            test_router(),
            "/api/v1/resumes/optimize",
            json!({
                "resume": resume_json(),
                "job_description": "Hiring a React and Node developer"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let resume = &body["optimized_resume"];
        assert_eq!(resume["jobs"][0]["title"], "Developer");
        assert_eq!(resume["summaries"].as_array().unwrap().len(), 1);
        assert_eq!(resume["summaries"][0]["text"], "Web developer using React");
        assert_eq!(resume["contactInfo"]["name"], "Jo Park");
        assert_eq!(resume["skills"], resume_json()["skills"]);
        assert_eq!(body["job_keywords"], json!(["React", "Node"]));
        assert!(body["score"].as_u64().unwrap() > 0);
        assert!(body["optimized_at"].is_string());
    }

    #[tokio::test]
    async fn test_optimize_large_resume_on_blocking_pool() {
        let bullets: Vec<Value> = (0..2_000)
            .map(|i| json!({ "text": format!("Maintained Node service {i}"), "keywords": ["Node"] }))
            .collect();
        let mut resume = resume_json();
        resume["jobs"][1]["bullets"] = Value::Array(bullets);
        let description = "Node developer. ".repeat(500);

        let (status, body) = post_json(
            test_router(),
            "/api/v1/resumes/optimize",
            json!({ "resume": resume, "job_description": description }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let jobs = &body["optimized_resume"]["jobs"];
        assert_eq!(jobs[0]["title"], "Developer");
        assert_eq!(jobs[0]["bullets"].as_array().unwrap().len(), 4);
        assert_eq!(body["job_keywords"], json!(["Node"]));
    }

    #[tokio::test]
    async fn test_optimize_rejects_blank_description() {
        let (status, body) = post_json(
            test_router(),
            "/api/v1/resumes/optimize",
            json!({ "resume": resume_json(), "job_description": "   \n" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_rejects_blank_description() {
        let (status, _) = post_json(
            test_router(),
            "/api/v1/keywords/extract",
            json!({ "job_description": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_optimize_rejects_malformed_resume() {
        let (status, _) = post_json(
            test_router(),
            "/api/v1/resumes/optimize",
            json!({ "resume": { "summaries": [] }, "job_description": "React" }),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

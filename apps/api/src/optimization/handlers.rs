//! Axum route handlers for the Optimization API.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::optimization::optimizer::{optimize_with_report, OptimizationResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractKeywordsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractKeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub resume: ResumeDocument,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    #[serde(flatten)]
    pub result: OptimizationResult,
    pub optimized_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords/extract
///
/// Returns the known keywords found in a job description.
/// Useful for previewing what the optimizer will match against.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    Json(request): Json<ExtractKeywordsRequest>,
) -> Result<Json<ExtractKeywordsResponse>, AppError> {
    require_description(&request.job_description)?;

    let keywords = state
        .vocabulary
        .extract_keywords(&request.job_description)
        .into_vec();

    Ok(Json(ExtractKeywordsResponse { keywords }))
}

/// POST /api/v1/resumes/optimize
///
/// Scores, re-ranks and trims the resume against the job description.
/// Contact info and skills are returned untouched.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    require_description(&request.job_description)?;

    let name = request.resume.contact_info.name.clone();

    // Scoring is CPU-bound and runs on the blocking pool.
    let vocabulary = Arc::clone(&state.vocabulary);
    let result = tokio::task::spawn_blocking(move || {
        optimize_with_report(&request.resume, &request.job_description, &vocabulary)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in optimizer: {e}")))?;

    info!(
        "Optimized resume for '{}': score={} matched={}",
        name,
        result.score,
        result.keyword_matches.len()
    );

    Ok(Json(OptimizeResponse {
        result,
        optimized_at: Utc::now(),
    }))
}

fn require_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

//! Resume Optimizer: tailors a resume to a job description.
//!
//! Flow: extract job keywords → score every entry and bullet → stable sort
//! descending → truncate each category and its bullets → reassemble.
//!
//! Pure function of its inputs. The input resume is never mutated.

use serde::Serialize;
use tracing::debug;

use crate::models::resume::{Bullet, Education, Job, Project, ResumeDocument, Summary};
use crate::optimization::keywords::{KeywordSet, KeywordVocabulary};
use crate::optimization::scoring::{sort_by_score_desc, JobContext, Scoreable, ScoredItem};

pub const MAX_SUMMARIES: usize = 1;
pub const MAX_JOBS: usize = 3;
pub const MAX_PROJECTS: usize = 3;
pub const MAX_EDUCATIONS: usize = 2;
pub const MAX_BULLETS_PER_JOB: usize = 4;
pub const MAX_BULLETS_PER_PROJECT: usize = 3;
pub const MAX_BULLETS_PER_EDUCATION: usize = 2;

/// Optimized resume plus the numbers behind it.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub optimized_resume: ResumeDocument,
    /// Sum of the scores of every retained summary, job, project and education.
    pub score: u32,
    /// Resume keywords that matched the job, deduplicated in first-seen order.
    pub keyword_matches: Vec<String>,
    pub job_keywords: Vec<String>,
}

/// Entries whose bullets are ranked and trimmed along with the entry itself.
trait WithBullets: Scoreable + Clone {
    fn bullets(&self) -> &[Bullet];
    fn with_bullets(&self, bullets: Vec<Bullet>) -> Self;
}

impl WithBullets for Job {
    fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    fn with_bullets(&self, bullets: Vec<Bullet>) -> Self {
        Job {
            bullets,
            ..self.clone()
        }
    }
}

impl WithBullets for Project {
    fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    fn with_bullets(&self, bullets: Vec<Bullet>) -> Self {
        Project {
            bullets,
            ..self.clone()
        }
    }
}

impl WithBullets for Education {
    fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    fn with_bullets(&self, bullets: Vec<Bullet>) -> Self {
        Education {
            bullets,
            ..self.clone()
        }
    }
}

/// Returns a new resume trimmed and re-ranked for `job_description`.
// The HTTP layer serves the report variant; this is the plain entry point.
#[allow(dead_code)]
pub fn optimize(
    resume: &ResumeDocument,
    job_description: &str,
    vocabulary: &KeywordVocabulary,
) -> ResumeDocument {
    optimize_with_report(resume, job_description, vocabulary).optimized_resume
}

/// Same as [`optimize`], also reporting the overall score and matched keywords.
pub fn optimize_with_report(
    resume: &ResumeDocument,
    job_description: &str,
    vocabulary: &KeywordVocabulary,
) -> OptimizationResult {
    let job_keywords = vocabulary.extract_keywords(job_description);
    let context = JobContext::new(&job_keywords, job_description);

    let summaries = select_summaries(&resume.summaries, &context);
    let jobs = select_entries(&resume.jobs, &context, MAX_BULLETS_PER_JOB, MAX_JOBS);
    let projects = select_entries(
        &resume.projects,
        &context,
        MAX_BULLETS_PER_PROJECT,
        MAX_PROJECTS,
    );
    let educations = select_entries(
        &resume.educations,
        &context,
        MAX_BULLETS_PER_EDUCATION,
        MAX_EDUCATIONS,
    );

    debug!(
        "Optimized resume: {} job keywords, kept {} summaries, {} jobs, {} projects, {} educations",
        job_keywords.len(),
        summaries.len(),
        jobs.len(),
        projects.len(),
        educations.len()
    );

    let score = summaries.iter().map(|s| s.score).sum::<u32>()
        + jobs.iter().map(|j| j.score).sum::<u32>()
        + projects.iter().map(|p| p.score).sum::<u32>()
        + educations.iter().map(|e| e.score).sum::<u32>();

    let mut matched = KeywordSet::default();
    let all_matches = summaries
        .iter()
        .flat_map(|s| s.keyword_matches.iter())
        .chain(jobs.iter().flat_map(|j| j.keyword_matches.iter()))
        .chain(projects.iter().flat_map(|p| p.keyword_matches.iter()))
        .chain(educations.iter().flat_map(|e| e.keyword_matches.iter()));
    for keyword in all_matches {
        matched.insert(keyword);
    }

    let optimized_resume = ResumeDocument {
        contact_info: resume.contact_info.clone(),
        summaries: summaries.into_iter().map(|s| s.item).collect(),
        jobs: jobs.into_iter().map(|j| j.item).collect(),
        projects: projects.into_iter().map(|p| p.item).collect(),
        educations: educations.into_iter().map(|e| e.item).collect(),
        skills: resume.skills.clone(),
    };

    OptimizationResult {
        optimized_resume,
        score,
        keyword_matches: matched.into_vec(),
        job_keywords: job_keywords.into_vec(),
    }
}

fn select_summaries(summaries: &[Summary], context: &JobContext) -> Vec<ScoredItem<Summary>> {
    let mut scored: Vec<ScoredItem<Summary>> = summaries
        .iter()
        .map(|summary| ScoredItem {
            item: summary.clone(),
            score: context.score_item(summary),
            keyword_matches: context.keyword_matches(&summary.keywords),
        })
        .collect();

    sort_by_score_desc(&mut scored);
    scored.truncate(MAX_SUMMARIES);
    scored
}

/// Ranks entries by their own score plus the scores of ALL their bullets,
/// keeping only the top `max_bullets` bullets on each retained entry.
///
/// The total counts bullets that are later trimmed away. This mirrors the
/// editor's long-standing ranking and is kept until product decides otherwise.
///
/// `keyword_matches` on the returned items covers the entry and its retained bullets.
fn select_entries<E: WithBullets>(
    entries: &[E],
    context: &JobContext,
    max_bullets: usize,
    max_entries: usize,
) -> Vec<ScoredItem<E>> {
    let mut scored: Vec<ScoredItem<E>> = entries
        .iter()
        .map(|entry| {
            let entry_score = context.score_item(entry);
            let mut bullet_scores = context.score_bullets(entry.bullets());
            let total_score = entry_score + bullet_scores.iter().map(|b| b.score).sum::<u32>();

            bullet_scores.truncate(max_bullets);
            let matches = context
                .keyword_matches(entry.keywords())
                .into_iter()
                .chain(
                    bullet_scores
                        .iter()
                        .flat_map(|b| b.keyword_matches.iter().cloned()),
                )
                .collect();

            ScoredItem {
                item: entry.with_bullets(bullet_scores.into_iter().map(|b| b.item).collect()),
                score: total_score,
                keyword_matches: matches,
            }
        })
        .collect();

    sort_by_score_desc(&mut scored);
    scored.truncate(max_entries);
    scored
}

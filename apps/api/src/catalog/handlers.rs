//! Axum route handlers for the job catalog.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::facets::Facets;
use crate::catalog::filter::{filter_indexed, FilterSpec, SalaryBucket};
use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Query string of `GET /api/v1/jobs`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    /// Comma-separated.
    pub skills: Option<String>,
    pub position: Option<String>,
    pub experience_level: Option<String>,
    pub employment_type: Option<String>,
    pub work_mode: Option<String>,
    pub job_location: Option<String>,
    pub industry: Option<String>,
    pub years_min: Option<u32>,
    pub years_max: Option<u32>,
    pub salary_range: Option<String>,
}

impl TryFrom<JobQuery> for FilterSpec {
    type Error = AppError;

    fn try_from(query: JobQuery) -> Result<Self, Self::Error> {
        let salary_bucket = match query.salary_range.as_deref() {
            Some(label) => SalaryBucket::from_label(label).ok_or_else(|| {
                AppError::Validation(format!("Unknown salary range '{}'", label.trim()))
            })?,
            None => SalaryBucket::AllRanges,
        };

        Ok(FilterSpec {
            skills: query
                .skills
                .as_deref()
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            position: query.position,
            experience_level: query.experience_level,
            employment_type: query.employment_type,
            work_mode: query.work_mode,
            job_location: query.job_location,
            industry: query.industry,
            years_min: query.years_min.unwrap_or(0),
            years_max: query.years_max.unwrap_or(0),
            salary_bucket,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct IndexedPosting {
    /// Position in this fetch of the catalog. Use it to open or apply to the job.
    pub index: usize,
    #[serde(flatten)]
    pub posting: JobPosting,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub total: usize,
    pub matched: usize,
    pub jobs: Vec<IndexedPosting>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Fetches the catalog and returns the postings matching the query, in
/// catalog order.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let spec = FilterSpec::try_from(query)?;
    let postings = state.catalog.fetch().await?;

    let jobs: Vec<IndexedPosting> = filter_indexed(&postings, &spec)
        .into_iter()
        .map(|(index, posting)| IndexedPosting {
            index,
            posting: posting.clone(),
        })
        .collect();

    tracing::debug!(
        total = postings.len(),
        matched = jobs.len(),
        filtered = spec.is_active(),
        "Job list served"
    );

    Ok(Json(JobListResponse {
        total: postings.len(),
        matched: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs/facets
///
/// Filter menu options, derived from the whole catalog.
pub async fn handle_job_facets(State(state): State<AppState>) -> Result<Json<Facets>, AppError> {
    let postings = state.catalog.fetch().await?;
    Ok(Json(Facets::from_catalog(&postings)))
}

/// GET /api/v1/jobs/:index
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<IndexedPosting>, AppError> {
    let posting = job_at(&state, index).await?;
    Ok(Json(IndexedPosting { index, posting }))
}

/// Fetches the catalog and returns the posting at `index`.
pub async fn job_at(state: &AppState, index: usize) -> Result<JobPosting, AppError> {
    state
        .catalog
        .fetch()
        .await?
        .into_iter()
        .nth(index)
        .ok_or_else(|| AppError::NotFound(format!("Job {index} not found")))
}

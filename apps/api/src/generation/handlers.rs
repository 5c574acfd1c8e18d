//! Axum route handlers for script and job posting generation.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::job::{generate_job_posting, JobPostingRequest};
use crate::generation::script::{generate_script, ScriptRequest, ScriptResult};
use crate::models::job_posting::JobPosting;
use crate::state::AppState;
use crate::store::{find_record, list_records, DEFAULT_LIST_LIMIT};

/// POST /api/generate-script
///
/// Generates a short promo video script. Not persisted.
pub async fn handle_generate_script(
    State(state): State<AppState>,
    Json(request): Json<ScriptRequest>,
) -> Result<Json<ScriptResult>, AppError> {
    let script = generate_script(state.llm.as_ref(), &request)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate script: {e}")))?;
    Ok(Json(script))
}

/// POST /api/generate-job
///
/// Generates a job posting (plus an optional promo script) and stores it.
pub async fn handle_generate_job(
    State(state): State<AppState>,
    Json(request): Json<JobPostingRequest>,
) -> Result<Json<JobPosting>, AppError> {
    let posting =
        generate_job_posting(state.llm.as_ref(), state.store.as_ref(), &request).await?;
    Ok(Json(posting))
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let jobs = list_records(state.store.as_ref(), DEFAULT_LIST_LIMIT).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/:id
///
/// Ids are opaque here: anything that is not a stored id is a 404.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    let job = find_record(state.store.as_ref(), &job_id)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::NotFound(_) => AppError::NotFound("Job posting not found".to_string()),
            other => other,
        })?;
    Ok(Json(job))
}

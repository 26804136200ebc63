//! Axum route handlers for the job board.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::errors::AppError;
use crate::listings::filter::{
    distinct_tags, suggested_tags, FilterCriteria, DEFAULT_SALARY_CEILING, SALARY_FLOOR_OPTIONS,
    SUGGESTED_TAG_LIMIT,
};
use crate::listings::posting::PostingForm;
use crate::listings::summary::{board_stats, format_salary, result_header, BoardStats, ResultHeader};
use crate::models::job::{JobPosting, JobType};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Filter panel values as they arrive in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    /// Comma-separated.
    pub tags: Option<String>,
    /// Suggestion chip clicked: deselects the tag if selected, selects it otherwise.
    pub toggle_tag: Option<String>,
    /// Removes one selected tag.
    pub remove_tag: Option<String>,
    /// "Clear all": resets every criterion after the others are read.
    #[serde(default)]
    pub clear: bool,
}

impl TryFrom<JobQuery> for FilterCriteria {
    type Error = AppError;

    fn try_from(query: JobQuery) -> Result<Self, Self::Error> {
        let mut criteria = FilterCriteria::default();
        let job_type = match query.job_type.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                JobType::parse(raw)
                    .ok_or_else(|| AppError::Validation(format!("unknown job_type '{raw}'")))?,
            ),
        };

        criteria.search = query.search.unwrap_or_default();
        criteria.location = query.location.unwrap_or_default();
        criteria.job_type = job_type;
        criteria.salary_min = query.salary_min.unwrap_or(0);
        criteria.salary_max = query.salary_max.unwrap_or(DEFAULT_SALARY_CEILING);
        for tag in query.tags.as_deref().unwrap_or_default().split(',') {
            let tag = tag.trim();
            if !tag.is_empty() {
                criteria.add_tag(tag);
            }
        }
        if let Some(tag) = query.toggle_tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            criteria.toggle_tag(tag);
        }
        if let Some(tag) = query.remove_tag.as_deref().map(str::trim) {
            criteria.remove_tag(tag);
        }
        if query.clear {
            criteria.clear();
        }
        Ok(criteria)
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobPosting>,
    /// Board version the result was computed from.
    pub version: u64,
    pub total: usize,
    pub matched: usize,
    pub header: ResultHeader,
    pub filters_applied: bool,
    pub criteria: FilterCriteria,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: JobPosting,
    pub salary: String,
    pub apply_link: String,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
    pub suggested: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub job_types: Vec<JobType>,
    pub salary_floors: Vec<u64>,
    pub defaults: FilterCriteria,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Runs the filter engine over the current board. Order is preserved, most recent first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    require_user(state.auth.as_ref())?;
    let criteria = FilterCriteria::try_from(query)?;

    let snapshot = state.jobs.snapshot();
    let jobs = state.jobs.filtered(&snapshot, &criteria).to_vec();
    let total = snapshot.jobs.len();
    let matched = jobs.len();

    Ok(Json(JobListResponse {
        jobs,
        version: snapshot.version,
        total,
        matched,
        header: result_header(matched, total),
        filters_applied: criteria.is_active(),
        criteria,
    }))
}

/// POST /api/v1/jobs
///
/// Validates the posting form and puts the new posting at the top of the board.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(mut form): Json<PostingForm>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    let user = require_user(state.auth.as_ref())?;

    // Same rules as the tag input: trimmed, no blanks, no repeats.
    for tag in std::mem::take(&mut form.tags) {
        form.add_tag(&tag);
    }

    let draft = form.validate()?;
    let posting = state.jobs.publish(draft, &user.id);
    Ok((StatusCode::CREATED, Json(posting)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    require_user(state.auth.as_ref())?;
    let job = state
        .jobs
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    Ok(Json(JobDetailResponse {
        salary: format_salary(job.salary_min, job.salary_max),
        apply_link: job.application.apply_link(&job.title),
        job,
    }))
}

/// GET /api/v1/tags
pub async fn handle_list_tags(State(state): State<AppState>) -> Result<Json<TagsResponse>, AppError> {
    require_user(state.auth.as_ref())?;
    let snapshot = state.jobs.snapshot();
    Ok(Json(TagsResponse {
        tags: distinct_tags(&snapshot.jobs),
        suggested: suggested_tags(&snapshot.jobs, SUGGESTED_TAG_LIMIT),
    }))
}

/// GET /api/v1/filters
///
/// Static choices for the filter panel plus the "clear all" defaults.
pub async fn handle_filter_options() -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse {
        job_types: vec![
            JobType::FullTime,
            JobType::PartTime,
            JobType::Contract,
            JobType::Remote,
        ],
        salary_floors: SALARY_FLOOR_OPTIONS.to_vec(),
        defaults: FilterCriteria::default(),
    })
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<BoardStats>, AppError> {
    require_user(state.auth.as_ref())?;
    Ok(Json(board_stats(&state.jobs.snapshot().jobs)))
}

//! Job handlers - public board plus company and admin lifecycles.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::handlers::parse_id;
use crate::api::middleware::{auth_middleware, require_admin, require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::job::JobListItem;
use crate::domain::{Job, JobStatus, JobType, JobUpdate, NewJob, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::JobFilter;
use crate::types::{MessageResponse, PaginationMeta, PaginationParams};

/// Public job-board query parameters
#[derive(Debug, Deserialize)]
pub struct JobBoardQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl JobBoardQuery {
    fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Public job listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobListItem>,
    pub pagination: PaginationMeta,
}

/// Job routes: public board plus authenticated company/admin operations
pub fn job_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_jobs))
        .route("/:id", get(get_job));

    let protected = Router::new()
        .route("/", post(create_job))
        .route("/:id", put(update_job).delete(delete_job))
        .route("/company/me", get(company_jobs))
        .route("/approve/:id", put(approve_job))
        .route("/admin/pending", get(pending_jobs))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Public job board
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Approved listings", body = JobListResponse)
    )
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobBoardQuery>,
) -> AppResult<Json<JobListResponse>> {
    let page = query.pagination();
    let filter = JobFilter {
        search: query.search,
        location: query.location,
        job_type: query.job_type,
    };

    let (jobs, total) = state.job_service.list_public(filter, page.clone()).await?;

    Ok(Json(JobListResponse {
        jobs,
        pagination: PaginationMeta::new(total, page.limit(), page.page),
    }))
}

/// Get one job
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Job>> {
    let id = parse_id(&id)?;
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

/// Create a job listing (approved companies)
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    request_body = NewJob,
    responses(
        (status = 201, description = "Listing created"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an approved company")
    )
)]
pub async fn create_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<NewJob>,
) -> AppResult<(axum::http::StatusCode, Json<Job>)> {
    require_role(&current_user, UserRole::Company)?;

    let job = state.job_service.create(current_user.id, payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(job)))
}

/// Update an owned listing
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID")),
    request_body = JobUpdate,
    responses(
        (status = 200, description = "Listing updated"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<JobUpdate>,
) -> AppResult<Json<Job>> {
    require_role(&current_user, UserRole::Company)?;

    let id = parse_id(&id)?;
    let job = state.job_service.update(current_user.id, id, payload).await?;
    Ok(Json(job))
}

/// Delete an owned listing
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Listing removed", body = MessageResponse),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, UserRole::Company)?;

    let id = parse_id(&id)?;
    state.job_service.delete(current_user.id, id).await?;
    Ok(Json(MessageResponse::new("Job removed")))
}

/// Listings owned by the calling company
#[utoipa::path(
    get,
    path = "/api/jobs/company/me",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own listings"),
        (status = 403, description = "Not a company")
    )
)]
pub async fn company_jobs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Job>>> {
    require_role(&current_user, UserRole::Company)?;

    let jobs = state.job_service.list_for_company(current_user.id).await?;
    Ok(Json(jobs))
}

/// Approve a listing (admin)
#[utoipa::path(
    put,
    path = "/api/jobs/approve/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Listing approved"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn approve_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Job>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    let job = state.job_service.approve(id).await?;
    Ok(Json(job))
}

/// Listings awaiting approval (admin)
#[utoipa::path(
    get,
    path = "/api/jobs/admin/pending",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending listings"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn pending_jobs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Job>>> {
    require_admin(&current_user)?;

    let jobs = state.job_service.list_pending().await?;
    Ok(Json(jobs))
}

/// Parse an admin status request into a canonical job status.
pub(crate) fn parse_job_status(raw: &str) -> AppResult<JobStatus> {
    JobStatus::parse(raw).ok_or_else(|| AppError::validation("Invalid status"))
}

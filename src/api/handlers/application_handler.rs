//! Application handlers - apply, review, interviews, withdraw.

use axum::{
    extract::{DefaultBodyLimit, Extension, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::extractors::read_multipart;
use crate::api::handlers::parse_id;
use crate::api::middleware::{auth_middleware, require_role, CurrentUser};
use crate::api::AppState;
use crate::config::MAX_UPLOAD_BYTES;
use crate::domain::{Application, ApplicationStatus, NewInterview, UserRole};
use crate::errors::{AppError, AppResult};
use crate::services::ResumeUpload;
use crate::types::MessageResponse;

/// Company status-update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// One of the company-assignable statuses
    #[schema(example = "shortlisted")]
    pub status: String,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Application routes (all require authentication)
pub fn application_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/student", get(student_applications))
        .route("/company/:job_id", get(job_applications))
        // POST takes a job id, PUT/DELETE an application id
        .route("/:id", post(apply).put(update_status).delete(withdraw))
        .route("/:id/interviews", post(schedule_interview))
        // Resume uploads can exceed the default body cap
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

/// Apply to a job (student, multipart with a required resume)
#[utoipa::path(
    post,
    path = "/api/applications/{job_id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("job_id" = String, Path, description = "Job ID")),
    responses(
        (status = 201, description = "Application submitted"),
        (status = 400, description = "Job closed, deadline passed, or bad upload"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied")
    )
)]
pub async fn apply(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Application>)> {
    require_role(&current_user, UserRole::Student)?;
    let job_id = parse_id(&job_id)?;

    let (file, fields) = read_multipart(multipart, "resume").await?;
    let file = file.ok_or_else(|| AppError::validation("A resume file is required"))?;
    let cover_letter = fields.get("cover_letter").cloned().filter(|s| !s.is_empty());

    let application = state
        .application_service
        .apply(
            current_user.id,
            job_id,
            cover_letter,
            ResumeUpload {
                filename: file.filename,
                bytes: file.bytes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// Applications of the calling student
#[utoipa::path(
    get,
    path = "/api/applications/student",
    tag = "Applications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own applications"),
        (status = 403, description = "Students only")
    )
)]
pub async fn student_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Application>>> {
    require_role(&current_user, UserRole::Student)?;

    let applications = state
        .application_service
        .list_for_student(current_user.id)
        .await?;
    Ok(Json(applications))
}

/// Applications on one of the company's jobs
#[utoipa::path(
    get,
    path = "/api/applications/company/{job_id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("job_id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Applications for the job"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn job_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<Vec<Application>>> {
    require_role(&current_user, UserRole::Company)?;

    let job_id = parse_id(&job_id)?;
    let applications = state
        .application_service
        .list_for_job(current_user.id, job_id)
        .await?;
    Ok(Json(applications))
}

/// Move an application along the pipeline (company)
#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Application ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status or transition"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<Application>> {
    require_role(&current_user, UserRole::Company)?;

    let id = parse_id(&id)?;
    let status = ApplicationStatus::parse(&payload.status)
        .ok_or_else(|| AppError::validation("Invalid status"))?;

    let application = state
        .application_service
        .update_status_company(current_user.id, id, status, payload.feedback)
        .await?;
    Ok(Json(application))
}

/// Schedule an interview round (company)
#[utoipa::path(
    post,
    path = "/api/applications/{id}/interviews",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Application ID")),
    request_body = NewInterview,
    responses(
        (status = 200, description = "Interview scheduled"),
        (status = 400, description = "Application not in an interviewable state"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn schedule_interview(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewInterview>,
) -> AppResult<Json<Application>> {
    require_role(&current_user, UserRole::Company)?;

    let id = parse_id(&id)?;
    let application = state
        .application_service
        .schedule_interview(current_user.id, id, payload)
        .await?;
    Ok(Json(application))
}

/// Withdraw an application (student)
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application withdrawn", body = MessageResponse),
        (status = 403, description = "Not the applicant"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn withdraw(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, UserRole::Student)?;

    let id = parse_id(&id)?;
    state
        .application_service
        .withdraw(current_user.id, id)
        .await?;
    Ok(Json(MessageResponse::new("Application withdrawn")))
}

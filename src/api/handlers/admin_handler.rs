//! Admin handlers - approvals, directory, statistics, announcements.
//!
//! Every route requires a valid token plus the admin role.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::handlers::job_handler::parse_job_status;
use crate::api::handlers::parse_id;
use crate::api::middleware::{auth_middleware, require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    AccountStatus, Announcement, Application, ApplicationStatus, Job, JobStatus, NewAnnouncement,
    Profile, UserResponse, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{ApplicationListQuery, JobListQuery, UserListQuery};
use crate::services::{DashboardStats, PlacementStats, UserDetails};
use crate::types::{MessageResponse, SortParams};

/// Admin user-directory query parameters
#[derive(Debug, Deserialize)]
pub struct UserDirectoryQuery {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    /// `field:asc|desc`, default newest-first
    #[serde(default)]
    pub sort: Option<String>,
}

/// Admin job listing query parameters
#[derive(Debug, Deserialize)]
pub struct AdminJobQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub company: Option<Uuid>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Admin application listing query parameters
#[derive(Debug, Deserialize)]
pub struct AdminApplicationQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job: Option<Uuid>,
    #[serde(default)]
    pub student: Option<Uuid>,
    #[serde(default)]
    pub company: Option<Uuid>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Account status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AccountStatusRequest {
    /// pending | approved | blocked
    #[schema(example = "approved")]
    pub status: String,
}

/// Job status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct JobStatusRequest {
    /// pending | approved | rejected
    #[schema(example = "approved")]
    pub status: String,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Application status override request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplicationStatusRequest {
    #[schema(example = "offered")]
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

/// Admin routes (token + admin role required)
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
        .route("/users/:id", get(user_details).put(update_user_status).delete(delete_user))
        .route("/jobs", get(list_jobs))
        .route("/jobs/:id", put(update_job_status))
        .route("/applications", get(list_applications))
        .route("/applications/:id", put(update_application_status))
        .route("/profiles", get(list_profiles))
        .route("/stats/placements", get(placement_stats))
        .route("/announcements", post(create_announcement).get(list_announcements))
        .route("/announcements/:id", delete(delete_announcement))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

fn parse_sort(raw: Option<&str>) -> Option<SortParams> {
    raw.and_then(SortParams::parse)
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate counts", body = DashboardStats),
        (status = 403, description = "Admin only")
    )
)]
pub async fn dashboard(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    require_admin(&current_user)?;
    let stats = state.stats_service.dashboard().await?;
    Ok(Json(stats))
}

/// User directory with filters (admins excluded)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users", body = Vec<UserResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<UserDirectoryQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_admin(&current_user)?;

    // Unknown filter values are ignored rather than erroring, matching
    // how the directory is browsed
    let role = query
        .role
        .as_deref()
        .and_then(UserRole::parse)
        .filter(|r| *r != UserRole::Admin);
    let status = query.status.as_deref().and_then(AccountStatus::parse);

    let users = state
        .user_service
        .list(UserListQuery {
            role,
            status,
            search: query.search,
            sort: parse_sort(query.sort.as_deref()),
        })
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// One user with role-specific extras
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDetails),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn user_details(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserDetails>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    let details = state.user_service.get_details(id).await?;
    Ok(Json(details))
}

/// Approve or block an account (never an admin's)
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = AccountStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UserResponse),
        (status = 400, description = "Invalid status or admin target"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AccountStatusRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    let status = AccountStatus::parse(&payload.status)
        .ok_or_else(|| AppError::validation("Invalid status"))?;

    let user = state.user_service.update_status(id, status).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete an account with its domain cascade (never an admin's)
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Admin accounts cannot be deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    state.user_service.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

/// All jobs with filters
#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Jobs"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_jobs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AdminJobQuery>,
) -> AppResult<Json<Vec<Job>>> {
    require_admin(&current_user)?;

    let jobs = state
        .job_service
        .list_admin(JobListQuery {
            status: query.status.as_deref().and_then(JobStatus::parse),
            company_id: query.company,
            search: query.search,
            sort: parse_sort(query.sort.as_deref()),
        })
        .await?;

    Ok(Json(jobs))
}

/// Approve or reject a listing, with feedback mailed to the company
#[utoipa::path(
    put,
    path = "/api/admin/jobs/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID")),
    request_body = JobStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<JobStatusRequest>,
) -> AppResult<Json<Job>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    let status = parse_job_status(&payload.status)?;

    let job = state
        .job_service
        .update_status(id, status, payload.feedback)
        .await?;
    Ok(Json(job))
}

/// All applications with filters
#[utoipa::path(
    get,
    path = "/api/admin/applications",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Applications"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AdminApplicationQuery>,
) -> AppResult<Json<Vec<Application>>> {
    require_admin(&current_user)?;

    let applications = state
        .application_service
        .list_admin(ApplicationListQuery {
            status: query.status.as_deref().and_then(ApplicationStatus::parse),
            job_id: query.job,
            student_id: query.student,
            company_id: query.company,
            sort: parse_sort(query.sort.as_deref()),
        })
        .await?;

    Ok(Json(applications))
}

/// Override an application's status (full enum)
#[utoipa::path(
    put,
    path = "/api/admin/applications/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Application ID")),
    request_body = ApplicationStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_application_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ApplicationStatusRequest>,
) -> AppResult<Json<Application>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    let status = ApplicationStatus::parse(&payload.status)
        .ok_or_else(|| AppError::validation("Invalid status"))?;

    let application = state
        .application_service
        .update_status_admin(id, status, payload.admin_notes)
        .await?;
    Ok(Json(application))
}

/// All profiles
#[utoipa::path(
    get,
    path = "/api/admin/profiles",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profiles"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_profiles(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Profile>>> {
    require_admin(&current_user)?;

    let profiles = state.profile_service.list().await?;
    Ok(Json(profiles))
}

/// Academic-year placement report
#[utoipa::path(
    get,
    path = "/api/admin/stats/placements",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Placement statistics", body = PlacementStats),
        (status = 403, description = "Admin only")
    )
)]
pub async fn placement_stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<PlacementStats>> {
    require_admin(&current_user)?;

    let stats = state.stats_service.placements().await?;
    Ok(Json(stats))
}

/// Publish an announcement
#[utoipa::path(
    post,
    path = "/api/admin/announcements",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = NewAnnouncement,
    responses(
        (status = 201, description = "Announcement created"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_announcement(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<NewAnnouncement>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    require_admin(&current_user)?;

    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(AppError::validation("Title and content are required"));
    }

    let announcement = state
        .announcement_service
        .create(current_user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// List announcements, newest first
#[utoipa::path(
    get,
    path = "/api/admin/announcements",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Announcements"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_announcements(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Announcement>>> {
    require_admin(&current_user)?;

    let announcements = state.announcement_service.list().await?;
    Ok(Json(announcements))
}

/// Delete an announcement
#[utoipa::path(
    delete,
    path = "/api/admin/announcements/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted", body = MessageResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Announcement not found")
    )
)]
pub async fn delete_announcement(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    let id = parse_id(&id)?;
    state.announcement_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Announcement deleted")))
}

//! Company directory handlers (public).

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::handlers::parse_id;
use crate::api::AppState;
use crate::domain::{Job, JobStatus};
use crate::errors::AppResult;
use crate::services::CompanyDirectoryEntry;

/// Public company directory routes
pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies))
        .route("/:id", get(get_company))
        .route("/:id/jobs", get(jobs_by_company))
}

/// All registered companies with their profiles
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses((status = 200, description = "Company directory"))
)]
pub async fn list_companies(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CompanyDirectoryEntry>>> {
    let companies = state.user_service.list_companies().await?;
    Ok(Json(companies))
}

/// One company with its profile
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "Company user ID")),
    responses(
        (status = 200, description = "Company details"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CompanyDirectoryEntry>> {
    let id = parse_id(&id)?;
    let company = state.user_service.get_company(id).await?;
    Ok(Json(company))
}

/// A company's publicly visible (approved) listings
#[utoipa::path(
    get,
    path = "/api/companies/{id}/jobs",
    tag = "Companies",
    params(("id" = String, Path, description = "Company user ID")),
    responses(
        (status = 200, description = "Approved listings"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn jobs_by_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Job>>> {
    let id = parse_id(&id)?;
    // 404 for unknown or non-company ids
    state.user_service.get_company(id).await?;

    let jobs = state
        .job_service
        .list_for_company(id)
        .await?
        .into_iter()
        .filter(|job| job.status == JobStatus::Approved)
        .collect();

    Ok(Json(jobs))
}

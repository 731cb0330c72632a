//! Profile handlers - owner reads/updates, uploads, and student projects.

use axum::{
    extract::{DefaultBodyLimit, Extension, Multipart, Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

use crate::api::extractors::read_multipart;
use crate::api::handlers::parse_id;
use crate::api::middleware::{auth_middleware, require_role, CurrentUser};
use crate::api::AppState;
use crate::config::MAX_UPLOAD_BYTES;
use crate::domain::{NewProject, Profile, ProfileUpdate, UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UploadKind;

/// Profile routes: public reads plus owner-gated updates
pub fn profile_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/:user_id", get(get_profile));

    let protected = Router::new()
        .route("/me", get(my_profile).put(update_profile))
        .route("/me/avatar", put(upload_avatar))
        .route("/me/logo", put(upload_logo))
        .route("/me/projects", post(add_project))
        .route("/me/projects/:project_id", delete(remove_project))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware));

    protected.merge(public)
}

/// Own profile
#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Profile>> {
    let profile = state.profile_service.get_for_user(current_user.id).await?;
    Ok(Json(profile))
}

/// Profile by user id (public)
#[utoipa::path(
    get,
    path = "/api/profile/{user_id}",
    tag = "Profiles",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Profile>> {
    let user_id = parse_id(&user_id)?;
    let profile = state.profile_service.get_for_user(user_id).await?;
    Ok(Json(profile))
}

/// Update own profile with a typed payload
#[utoipa::path(
    put,
    path = "/api/profile/me",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Section does not match account role")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<Profile>> {
    let profile = state
        .profile_service
        .update(current_user.id, current_user.role, payload)
        .await?;
    Ok(Json(profile))
}

/// Replace own avatar (multipart image upload)
#[utoipa::path(
    put,
    path = "/api/profile/me/avatar",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Avatar replaced", body = UserResponse),
        (status = 400, description = "Bad upload")
    )
)]
pub async fn upload_avatar(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UserResponse>> {
    let (file, _) = read_multipart(multipart, "avatar").await?;
    let file = file.ok_or_else(|| AppError::validation("An avatar file is required"))?;

    let stored = state.uploads.store(
        UploadKind::Avatar,
        current_user.id,
        &file.filename,
        &file.bytes,
    )?;

    let user = state
        .profile_service
        .set_avatar(current_user.id, stored)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Replace the company logo (multipart image upload)
#[utoipa::path(
    put,
    path = "/api/profile/me/logo",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logo replaced"),
        (status = 400, description = "Bad upload"),
        (status = 403, description = "Companies only")
    )
)]
pub async fn upload_logo(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Profile>> {
    require_role(&current_user, UserRole::Company)?;

    let (file, _) = read_multipart(multipart, "logo").await?;
    let file = file.ok_or_else(|| AppError::validation("A logo file is required"))?;

    let stored = state.uploads.store(
        UploadKind::Logo,
        current_user.id,
        &file.filename,
        &file.bytes,
    )?;

    let profile = state
        .profile_service
        .set_logo(current_user.id, stored)
        .await?;
    Ok(Json(profile))
}

/// Add a project to the student profile
#[utoipa::path(
    post,
    path = "/api/profile/me/projects",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    request_body = NewProject,
    responses(
        (status = 200, description = "Project added"),
        (status = 403, description = "Students only")
    )
)]
pub async fn add_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<NewProject>,
) -> AppResult<Json<Profile>> {
    require_role(&current_user, UserRole::Student)?;

    let profile = state
        .profile_service
        .add_project(current_user.id, payload)
        .await?;
    Ok(Json(profile))
}

/// Remove a project from the student profile
#[utoipa::path(
    delete,
    path = "/api/profile/me/projects/{project_id}",
    tag = "Profiles",
    security(("bearer_auth" = [])),
    params(("project_id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project removed"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn remove_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Profile>> {
    require_role(&current_user, UserRole::Student)?;

    let project_id = parse_id(&project_id)?;
    let profile = state
        .profile_service
        .remove_project(current_user.id, project_id)
        .await?;
    Ok(Json(profile))
}

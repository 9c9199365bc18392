//! The caller's profile

use axum::{extract::State, Json};
use presence_service::{CurrentUserResponse, UpdateProfileRequest, UserService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let response = UserService::new(state.service_context())
        .me(auth.user_id)
        .await?;
    Ok(Json(response))
}

/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let response = UserService::new(state.service_context())
        .update_profile(auth.user_id, request)
        .await?;
    Ok(Json(response))
}

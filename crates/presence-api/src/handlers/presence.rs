//! Presence toggle

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use presence_service::{PresenceResponse, PresenceService};

use crate::extractors::{AuthUser, ResponseFormat};
use crate::response::{ApiResult, Script};
use crate::state::AppState;

/// POST /status
///
/// Flips the caller between available and busy. Clients asking for
/// JavaScript get a partial-update script instead of JSON.
pub async fn toggle(
    State(state): State<AppState>,
    auth: AuthUser,
    format: ResponseFormat,
) -> ApiResult<Response> {
    let response = PresenceService::new(state.service_context())
        .toggle(auth.user_id)
        .await?;

    Ok(match format {
        ResponseFormat::Script => Script(response.to_script()).into_response(),
        ResponseFormat::Json | ResponseFormat::Html => Json(response).into_response(),
    })
}

/// GET /status
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PresenceResponse>> {
    let response = PresenceService::new(state.service_context())
        .current(auth.user_id)
        .await?;
    Ok(Json(response))
}

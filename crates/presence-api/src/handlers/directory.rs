//! User directory

use axum::{extract::State, Json};
use presence_service::{DirectoryResponse, DirectoryService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /
///
/// Every user except the caller.
pub async fn index(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DirectoryResponse>> {
    let response = DirectoryService::new(state.service_context())
        .list_others(auth.user_id)
        .await?;
    Ok(Json(response))
}

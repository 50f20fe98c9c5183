//! Session API endpoints.

use axum::{extract::State, Json};

use super::{current_revision, error, success, ApiResult};
use crate::models::{LoginRequest, SessionInfo};
use crate::AppState;

/// GET /api/session - Current session state.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    let revision_id = current_revision(&state).await;
    let session = state.mutator.client().session();

    success(session.info(&state.config.api_base_url).await, revision_id)
}

/// POST /api/session - Open a storefront session with a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionInfo> {
    let revision_id = current_revision(&state).await;
    let session = state.mutator.client().session();

    match session.login(&request.token).await {
        Ok(()) => success(session.info(&state.config.api_base_url).await, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/session - Close the storefront session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    let revision_id = current_revision(&state).await;
    let session = state.mutator.client().session();

    session.logout().await;
    success(session.info(&state.config.api_base_url).await, revision_id)
}

//! Root category API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{current_revision, error, success, ApiResult};
use crate::models::{Category, CategoryDraft, StatusRequest};
use crate::AppState;

/// GET /api/categories - List the categories currently held in the store.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let store = state.mutator.store().read().await;
    success(store.snapshot(), store.revision())
}

/// POST /api/categories - Create a root category from a draft.
pub async fn create_category(
    State(state): State<AppState>,
    Json(mut draft): Json<CategoryDraft>,
) -> ApiResult<Category> {
    let revision_id = current_revision(&state).await;

    match state.mutator.add_category(&mut draft).await {
        Ok(category) => success(category, current_revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/categories/refresh - Reload every category from the storefront.
pub async fn refresh_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let revision_id = current_revision(&state).await;

    match state.mutator.load().await {
        Ok(_) => {
            let store = state.mutator.store().read().await;
            success(store.snapshot(), store.revision())
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/categories/:id/status - Activate or deactivate a category.
pub async fn set_category_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<Category> {
    let revision_id = current_revision(&state).await;

    match state.mutator.set_status(&id, request.status).await {
        Ok(category) => success(category, current_revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

//! Node API endpoints: add-child, edit and delete on any node of the tree.
//!
//! Each endpoint receives the node itself (`_id` plus optional `categoryId`),
//! the same reference the tree rows carry.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{current_revision, error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{AddSubtitleIntent, Category, NodeDraft, NodeRef, NodeTarget, SubtitleDraft};
use crate::AppState;

/// POST /api/subtitles - Add a subtitle below the target node.
pub async fn create_subtitle(
    State(state): State<AppState>,
    Json(intent): Json<AddSubtitleIntent>,
) -> ApiResult<Category> {
    let revision_id = current_revision(&state).await;

    let target = match NodeTarget::try_from(intent.target) {
        Ok(target) => target,
        Err(msg) => return error(AppError::Validation(msg), revision_id),
    };
    let mut draft = SubtitleDraft {
        name: intent.name,
        description: intent.description,
    };

    match state.mutator.add_subtitle(&target, &mut draft).await {
        Ok(category) => success(category, current_revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/nodes/:id/draft - Edit draft populated from the node with this id.
pub async fn get_node_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<NodeDraft> {
    let store = state.mutator.store().read().await;

    match store.draft_for(&id) {
        Some(draft) => success(draft, store.revision()),
        None => error(
            AppError::NotFound(format!("Node {} not found", id)),
            store.revision(),
        ),
    }
}

/// PUT /api/nodes - Submit an edit draft for a category or subtitle.
pub async fn update_node(
    State(state): State<AppState>,
    Json(draft): Json<NodeDraft>,
) -> ApiResult<Category> {
    let revision_id = current_revision(&state).await;

    match state.mutator.update_node(&draft).await {
        Ok(category) => success(category, current_revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/nodes - Delete a category or subtitle.
pub async fn delete_node(
    State(state): State<AppState>,
    Json(node): Json<NodeRef>,
) -> ApiResult<()> {
    let revision_id = current_revision(&state).await;

    let target = match NodeTarget::try_from(node) {
        Ok(target) => target,
        Err(msg) => return error(AppError::Validation(msg), revision_id),
    };

    match state.mutator.delete_node(&target).await {
        Ok(()) => {
            let store = state.mutator.store().read().await;
            state
                .expansion
                .write()
                .await
                .retain_known(store.categories());
            success((), store.revision())
        }
        Err(e) => error(e, revision_id),
    }
}

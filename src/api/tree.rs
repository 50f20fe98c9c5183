//! Tree view API endpoints.

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::{TreeQuery, TreeRow, TreeStats};
use crate::render::{render_rows, tree_stats};
use crate::AppState;

/// Expansion change result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    pub expanded_count: usize,
}

/// GET /api/tree - Visible rows of the category tree.
pub async fn get_tree(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> ApiResult<Vec<TreeRow>> {
    let store = state.mutator.store().read().await;
    let expansion = state.expansion.read().await;

    let rows = render_rows(store.categories(), &expansion, query.filter.as_deref());
    success(rows, store.revision())
}

/// POST /api/tree/toggle/:id - Expand or collapse one node.
pub async fn toggle_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ExpansionState> {
    let revision_id = state.mutator.store().read().await.revision();
    let mut expansion = state.expansion.write().await;

    let expanded = expansion.toggle(&id);
    success(
        ExpansionState {
            id: Some(id),
            expanded: Some(expanded),
            expanded_count: expansion.len(),
        },
        revision_id,
    )
}

/// POST /api/tree/expand-all - Expand every root category.
pub async fn expand_all(State(state): State<AppState>) -> ApiResult<ExpansionState> {
    let store = state.mutator.store().read().await;
    let mut expansion = state.expansion.write().await;

    expansion.expand_all(store.categories());
    success(
        ExpansionState {
            id: None,
            expanded: None,
            expanded_count: expansion.len(),
        },
        store.revision(),
    )
}

/// POST /api/tree/collapse-all - Collapse every node.
pub async fn collapse_all(State(state): State<AppState>) -> ApiResult<ExpansionState> {
    let revision_id = state.mutator.store().read().await.revision();
    let mut expansion = state.expansion.write().await;

    expansion.collapse_all();
    success(
        ExpansionState {
            id: None,
            expanded: None,
            expanded_count: 0,
        },
        revision_id,
    )
}

/// GET /api/stats - Category and subtitle counts.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<TreeStats> {
    let store = state.mutator.store().read().await;
    success(tree_stats(store.categories()), store.revision())
}

//! Tree mutations against the storefront.
//!
//! Every intent is translated into the matching storefront call and the
//! server's answer is folded back into the store. The store is changed only
//! after a confirmed success, and never by splicing locally: subtitle
//! mutations replace the owning root with the subtree the server returns.
//! The store lock is not held across upstream calls, so concurrent intents
//! settle as last response wins.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::RwLock;

use crate::client::StorefrontClient;
use crate::errors::AppError;
use crate::models::{
    AddSubtitleRequest, Category, CategoryDraft, CategoryStatus, DeleteSubtitleRequest,
    NodeDraft, NodeTarget, SubtitleBody, SubtitleDraft, UpdateSubtitleRequest,
};
use crate::store::CategoryStore;

/// Shared handle to the category store.
pub type SharedStore = Arc<RwLock<CategoryStore>>;

#[derive(Debug, Clone)]
pub struct TreeMutator {
    client: StorefrontClient,
    store: SharedStore,
}

impl TreeMutator {
    pub fn new(client: StorefrontClient, store: SharedStore) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    /// Reload every root category from the storefront.
    pub async fn load(&self) -> Result<usize, AppError> {
        let categories = self.client.list_categories().await?;
        let count = categories.len();

        self.store.write().await.replace_all(categories);
        tracing::info!("Loaded {} categories", count);
        Ok(count)
    }

    /// Create a root category and append it. Clears the draft on success.
    pub async fn add_category(&self, draft: &mut CategoryDraft) -> Result<Category, AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::Validation("Category name is required".to_string()));
        }

        let body = CategoryDraft {
            name: draft.name.trim().to_string(),
            ..draft.clone()
        };
        let envelope = self.client.create_category(&body).await?;
        let category = envelope.category;

        self.store.write().await.append(category.clone());
        draft.clear();

        tracing::info!(
            "Added category {} ({}){}",
            category.id,
            category.name,
            envelope
                .message
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        );
        Ok(category)
    }

    /// Create a subtitle below `target` and adopt the server's updated root.
    /// Clears the draft on success.
    pub async fn add_subtitle(
        &self,
        target: &NodeTarget,
        draft: &mut SubtitleDraft,
    ) -> Result<Category, AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::Validation("Subtitle name is required".to_string()));
        }

        let body = subtitle_insertion(target, draft);
        let updated = self.client.add_subtitle(&body).await?;

        self.adopt_subtree(&body.category_id, updated.clone()).await?;
        draft.clear();

        tracing::info!("Added subtitle {:?} below {}", body.subtitle.name, target);
        Ok(updated)
    }

    /// Submit an edit draft.
    ///
    /// A draft without `categoryId` updates a root category with the whole
    /// draft as body; otherwise the subtitle update endpoint is used. Either
    /// way the owning root is replaced by the server's copy.
    pub async fn update_node(&self, draft: &NodeDraft) -> Result<Category, AppError> {
        let id = draft
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::Validation("ID is missing".to_string()))?;

        let updated = match draft.category_id.as_deref().filter(|c| !c.trim().is_empty()) {
            None => {
                let category = self.client.update_category(id, draft).await?;
                self.adopt_subtree(id, category.clone()).await?;
                category
            }
            Some(root_id) => {
                let body = UpdateSubtitleRequest {
                    category_id: root_id.to_string(),
                    subtitle_id: id.to_string(),
                    name: draft.name.clone(),
                    description: draft.description.clone(),
                };
                let category = self.client.update_subtitle(&body).await?;
                self.adopt_subtree(root_id, category.clone()).await?;
                category
            }
        };

        tracing::info!("Updated node {}", id);
        Ok(updated)
    }

    /// Delete a node. A root is removed from the store; a subtitle deletion
    /// replaces its root with the server's remaining subtree.
    pub async fn delete_node(&self, target: &NodeTarget) -> Result<(), AppError> {
        match target {
            NodeTarget::Root { id } => {
                self.client.delete_category(id).await?;
                if !self.store.write().await.remove_root(id) {
                    tracing::warn!("Deleted category {} was not in the local store", id);
                }
            }
            NodeTarget::Subtitle { root_id, id } => {
                let body = DeleteSubtitleRequest {
                    category_id: root_id.clone(),
                    subtitle_id: id.clone(),
                };
                let updated = self.client.delete_subtitle(&body).await?;
                self.adopt_subtree(root_id, updated).await?;
            }
        }

        tracing::info!("Deleted {}", target);
        Ok(())
    }

    /// Change a root category's status through the category update call.
    pub async fn set_status(
        &self,
        id: &str,
        status: CategoryStatus,
    ) -> Result<Category, AppError> {
        let mut draft = {
            let store = self.store.read().await;
            let category = store
                .get(id)
                .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
            NodeDraft::from_category(category)
        };
        draft.status = Some(status);

        self.update_node(&draft).await
    }

    /// Total subtitles in the store, at every depth.
    pub async fn count_descendants(&self) -> usize {
        self.store.read().await.count_descendants()
    }

    /// Replace `expected_root` with the server's copy. An answer naming any
    /// other root is rejected and the store is left as it was.
    async fn adopt_subtree(
        &self,
        expected_root: &str,
        category: Category,
    ) -> Result<(), AppError> {
        if category.id != expected_root {
            tracing::warn!(
                "Storefront answered for category {} while {} was expected",
                category.id,
                expected_root
            );
            return Err(AppError::Upstream {
                status: StatusCode::OK.as_u16(),
                message: format!(
                    "Storefront answered for category {} instead of {}",
                    category.id, expected_root
                ),
            });
        }
        self.store.write().await.replace_root(category);
        Ok(())
    }
}

/// Body of the subtitle insertion below `target`.
///
/// The owning root is the target itself for a root category, else the
/// target's chain root. The parent is omitted when the target is a root or
/// the chain's top node.
pub fn subtitle_insertion(target: &NodeTarget, draft: &SubtitleDraft) -> AddSubtitleRequest {
    AddSubtitleRequest {
        category_id: target.root_id().to_string(),
        parent_subtitle_id: target.child_parent_id().map(str::to_string),
        subtitle: SubtitleBody {
            name: draft.name.trim().to_string(),
            description: draft.description.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> SubtitleDraft {
        SubtitleDraft {
            name: name.to_string(),
            description: "Handwoven".to_string(),
        }
    }

    #[test]
    fn test_insertion_below_root() {
        let body = subtitle_insertion(&NodeTarget::root("A"), &draft("Silk"));
        assert_eq!(body.category_id, "A");
        assert_eq!(body.parent_subtitle_id, None);
        assert_eq!(body.subtitle.name, "Silk");
        assert_eq!(body.subtitle.description, "Handwoven");
    }

    #[test]
    fn test_insertion_below_chain_top() {
        let body = subtitle_insertion(&NodeTarget::subtitle("A", "A"), &draft("Silk"));
        assert_eq!(body.category_id, "A");
        assert_eq!(body.parent_subtitle_id, None);
    }

    #[test]
    fn test_insertion_below_nested_subtitle() {
        let body = subtitle_insertion(&NodeTarget::subtitle("A", "B"), &draft(" Silk "));
        assert_eq!(body.category_id, "A");
        assert_eq!(body.parent_subtitle_id.as_deref(), Some("B"));
        assert_eq!(body.subtitle.name, "Silk");
    }
}

//! Drafts: in-progress add/edit form state before submission.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Category, CategoryStatus, Subtitle};

/// Draft of a new root category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CategoryStatus,
}

impl CategoryDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Draft of a new subtitle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl SubtitleDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Edit draft of an existing node, populated from the selected node.
///
/// For a root category the whole draft is the update body, so every field
/// the storefront sent along is carried back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CategoryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<Subtitle>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeDraft {
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: Some(category.id.clone()),
            category_id: None,
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            status: Some(category.status),
            product_count: category.product_count,
            subtitles: Some(category.subtitles.clone()),
            extra: category.extra.clone(),
        }
    }

    /// `root_id` is used when the subtitle document lacks its own `categoryId`.
    pub fn from_subtitle(subtitle: &Subtitle, root_id: &str) -> Self {
        Self {
            id: Some(subtitle.id.clone()),
            category_id: Some(
                subtitle
                    .category_id
                    .clone()
                    .unwrap_or_else(|| root_id.to_string()),
            ),
            name: subtitle.name.clone(),
            description: subtitle.description.clone().unwrap_or_default(),
            ..Self::default()
        }
    }
}

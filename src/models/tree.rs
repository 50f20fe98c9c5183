//! Rendered tree view models.

use serde::Serialize;

use super::{CategoryStatus, NodeTarget};

/// One visible line of the category tree.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeRow {
    /// The node itself, handed back verbatim by add-child, edit and delete actions
    pub target: NodeTarget,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub depth: usize,
    pub indent: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub child_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CategoryStatus>,
}

/// Summary statistics shown above the tree.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub categories: usize,
    pub active: usize,
    pub inactive: usize,
    pub subtitles: usize,
    pub products: u64,
}

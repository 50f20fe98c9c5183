//! Explicit identity of a node targeted by an add, edit or delete intent.

use serde::{Deserialize, Serialize};

/// The node an action was taken on.
///
/// Built once from the `{_id, categoryId?}` pair the storefront uses: a node
/// without `categoryId` is a root category, anything else is a subtitle of the
/// chain owned by `root_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NodeRef", into = "NodeRef")]
pub enum NodeTarget {
    Root { id: String },
    Subtitle { root_id: String, id: String },
}

/// Wire form of a node reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl NodeTarget {
    pub fn root(id: impl Into<String>) -> Self {
        NodeTarget::Root { id: id.into() }
    }

    pub fn subtitle(root_id: impl Into<String>, id: impl Into<String>) -> Self {
        NodeTarget::Subtitle {
            root_id: root_id.into(),
            id: id.into(),
        }
    }

    /// Id of the root category owning this node (itself for a root).
    pub fn root_id(&self) -> &str {
        match self {
            NodeTarget::Root { id } => id,
            NodeTarget::Subtitle { root_id, .. } => root_id,
        }
    }

    /// Parent id to send when inserting a child under this node.
    ///
    /// `None` means "insert at the top of the root's subtitle list": either the
    /// target is the root itself, or it is the chain's top node whose id equals
    /// the root id. Any other subtitle is its own child's parent.
    pub fn child_parent_id(&self) -> Option<&str> {
        match self {
            NodeTarget::Root { .. } => None,
            NodeTarget::Subtitle { root_id, id } if id == root_id => None,
            NodeTarget::Subtitle { id, .. } => Some(id),
        }
    }
}

impl TryFrom<NodeRef> for NodeTarget {
    type Error = String;

    fn try_from(value: NodeRef) -> Result<Self, Self::Error> {
        let id = value
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| "ID is missing".to_string())?;

        match value.category_id.filter(|c| !c.trim().is_empty()) {
            None => Ok(NodeTarget::Root { id }),
            Some(root_id) => Ok(NodeTarget::Subtitle { root_id, id }),
        }
    }
}

impl From<NodeTarget> for NodeRef {
    fn from(value: NodeTarget) -> Self {
        match value {
            NodeTarget::Root { id } => NodeRef {
                id: Some(id),
                category_id: None,
            },
            NodeTarget::Subtitle { root_id, id } => NodeRef {
                id: Some(id),
                category_id: Some(root_id),
            },
        }
    }
}

impl std::fmt::Display for NodeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeTarget::Root { id } => write!(f, "category {}", id),
            NodeTarget::Subtitle { root_id, id } => write!(f, "subtitle {} of {}", id, root_id),
        }
    }
}

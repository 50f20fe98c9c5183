//! Request and response bodies exchanged with the storefront API and with
//! dashboard clients.

use serde::{Deserialize, Serialize};

use super::{Category, CategoryStatus, NodeRef};

/// Response of `GET /categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryListResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Response of `POST /categories` and `PUT /categories/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub category: Category,
}

/// Body of `POST /subtitles/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddSubtitleRequest {
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_subtitle_id: Option<String>,
    pub subtitle: SubtitleBody,
}

/// Name and description of a subtitle being created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubtitleBody {
    pub name: String,
    pub description: String,
}

/// Body of `PUT /subtitles/update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubtitleRequest {
    pub category_id: String,
    pub subtitle_id: String,
    pub name: String,
    pub description: String,
}

/// Body of `DELETE /subtitles/delete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubtitleRequest {
    pub category_id: String,
    pub subtitle_id: String,
}

/// Error body returned by the storefront on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UpstreamErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

/// Request body for opening a storefront session.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

/// Current session state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub logged_in: bool,
    /// Base URL of the storefront API the session talks to
    pub storefront: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Request body for adding a subtitle below a node.
#[derive(Debug, Clone, Deserialize)]
pub struct AddSubtitleIntent {
    #[serde(default)]
    pub target: NodeRef,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for changing a category's status.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub status: CategoryStatus,
}

/// Query parameters of the tree view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_subtitle_omits_absent_parent() {
        let body = AddSubtitleRequest {
            category_id: "cat1".to_string(),
            parent_subtitle_id: None,
            subtitle: SubtitleBody {
                name: "Silk".to_string(),
                description: String::new(),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "categoryId": "cat1", "subtitle": { "name": "Silk", "description": "" } })
        );
    }

    #[test]
    fn test_upstream_error_prefers_message() {
        let body: UpstreamErrorBody =
            serde_json::from_value(json!({ "message": "Duplicate", "error": "E11000" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Duplicate"));

        let body: UpstreamErrorBody = serde_json::from_value(json!({ "error": "Boom" })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Boom"));

        assert_eq!(UpstreamErrorBody::default().into_message(), None);
    }
}

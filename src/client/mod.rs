//! Typed client for the storefront REST API.
//!
//! Every call carries the session's bearer token and a cookie store so
//! credentials are included. Non-success responses are turned into
//! `AppError::Upstream` with the server's `message`/`error` text.

use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    AddSubtitleRequest, Category, CategoryDraft, CategoryEnvelope, CategoryListResponse,
    DeleteSubtitleRequest, NodeDraft, UpdateSubtitleRequest, UpstreamErrorBody,
};
use crate::session::Session;

/// HTTP collaborator owning the authoritative category tree.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl StorefrontClient {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            AppError::Config(format!("Invalid storefront URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Storefront URL {} cannot take a path",
                base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// GET /categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let request = self.request(Method::GET, &["categories"]).await?;
        let body: CategoryListResponse = self.execute(request).await?;
        Ok(body.categories)
    }

    /// POST /categories
    pub async fn create_category(
        &self,
        draft: &CategoryDraft,
    ) -> Result<CategoryEnvelope, AppError> {
        let request = self
            .request(Method::POST, &["categories"])
            .await?
            .json(draft);
        self.execute(request).await
    }

    /// PUT /categories/:id with the whole draft as body.
    pub async fn update_category(&self, id: &str, draft: &NodeDraft) -> Result<Category, AppError> {
        let request = self
            .request(Method::PUT, &["categories", id])
            .await?
            .json(draft);
        let body: CategoryEnvelope = self.execute(request).await?;
        Ok(body.category)
    }

    /// DELETE /categories/:id
    pub async fn delete_category(&self, id: &str) -> Result<(), AppError> {
        let request = self.request(Method::DELETE, &["categories", id]).await?;
        self.execute_discard(request).await
    }

    /// POST /subtitles/add, answered with the updated root category.
    pub async fn add_subtitle(&self, body: &AddSubtitleRequest) -> Result<Category, AppError> {
        let request = self
            .request(Method::POST, &["subtitles", "add"])
            .await?
            .json(body);
        self.execute(request).await
    }

    /// PUT /subtitles/update, answered with the updated root category.
    pub async fn update_subtitle(
        &self,
        body: &UpdateSubtitleRequest,
    ) -> Result<Category, AppError> {
        let request = self
            .request(Method::PUT, &["subtitles", "update"])
            .await?
            .json(body);
        self.execute(request).await
    }

    /// DELETE /subtitles/delete with both ids in the body, answered with the
    /// updated root category.
    pub async fn delete_subtitle(
        &self,
        body: &DeleteSubtitleRequest,
    ) -> Result<Category, AppError> {
        let request = self
            .request(Method::DELETE, &["subtitles", "delete"])
            .await?
            .json(body);
        self.execute(request).await
    }

    /// Storefront URL for `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, AppError> {
        let authorization = self.session.authorization().await?;
        let url = self.endpoint(segments);
        let request_id = Uuid::new_v4();

        tracing::debug!(%request_id, %method, %url, "Storefront request");

        Ok(self
            .http
            .request(method, url)
            .header(header::AUTHORIZATION, authorization)
            .header("x-request-id", request_id.to_string()))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(upstream_error(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("Unexpected storefront response ({}): {}", status, e);
            AppError::Upstream {
                status: status.as_u16(),
                message: format!("Unexpected response from storefront: {}", e),
            }
        })
    }

    async fn execute_discard(&self, request: RequestBuilder) -> Result<(), AppError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = response.bytes().await?;
        Err(upstream_error(status, &bytes))
    }
}

fn upstream_error(status: StatusCode, bytes: &[u8]) -> AppError {
    let message = serde_json::from_slice::<UpstreamErrorBody>(bytes)
        .ok()
        .and_then(UpstreamErrorBody::into_message)
        .unwrap_or_else(|| format!("Storefront returned {}", status));

    tracing::warn!("Storefront error {}: {}", status, message);

    AppError::Upstream {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_uses_server_message() {
        let err = upstream_error(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Category name already exists"}"#,
        );
        assert_eq!(
            err,
            AppError::Upstream {
                status: 400,
                message: "Category name already exists".to_string()
            }
        );
    }

    #[test]
    fn test_upstream_error_falls_back_on_error_field() {
        let err = upstream_error(StatusCode::NOT_FOUND, br#"{"error":"Subtitle not found"}"#);
        assert_eq!(err.message(), "Subtitle not found");
    }

    #[test]
    fn test_upstream_error_without_body() {
        let err = upstream_error(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(err.message(), "Storefront returned 500 Internal Server Error");
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = StorefrontClient::new(
            "https://shop.example.com/api/",
            Duration::from_secs(1),
            Session::default(),
        )
        .unwrap();

        assert_eq!(
            client.endpoint(&["categories", "cat2?x"]).as_str(),
            "https://shop.example.com/api/categories/cat2%3Fx"
        );
        assert_eq!(
            client.endpoint(&["categories", "a/b#c"]).as_str(),
            "https://shop.example.com/api/categories/a%2Fb%23c"
        );
        assert_eq!(
            client.endpoint(&["subtitles", "add"]).as_str(),
            "https://shop.example.com/api/subtitles/add"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = StorefrontClient::new("not a url", Duration::from_secs(1), Session::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_request_requires_session() {
        let client = StorefrontClient::new(
            "http://127.0.0.1:9/api/",
            Duration::from_secs(1),
            Session::default(),
        )
        .unwrap();
        assert_eq!(client.base_url.as_str(), "http://127.0.0.1:9/api");

        let err = client.list_categories().await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}

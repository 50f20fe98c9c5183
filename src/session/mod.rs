//! Storefront session holding the bearer token forwarded on every upstream call.
//!
//! Login populates the session, logout clears it. Nothing reads the token from
//! ambient storage; the session is passed explicitly to the storefront client.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::SessionInfo;

/// Scheme prefix of the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone)]
struct ActiveSession {
    token: String,
    since: DateTime<Utc>,
}

/// Shared handle to the current storefront session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<ActiveSession>>>,
}

impl Session {
    /// Session opened with a configured token, if any.
    pub fn with_token(token: Option<String>) -> Self {
        let active = token.map(|token| ActiveSession {
            token,
            since: Utc::now(),
        });
        Self {
            inner: Arc::new(RwLock::new(active)),
        }
    }

    /// Open the session, replacing any previous token.
    pub async fn login(&self, token: &str) -> Result<(), AppError> {
        let token = token.trim();
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        if token.is_empty() {
            return Err(AppError::Validation("Token is required".to_string()));
        }

        let mut guard = self.inner.write().await;
        *guard = Some(ActiveSession {
            token: token.to_string(),
            since: Utc::now(),
        });
        tracing::info!("Storefront session opened");
        Ok(())
    }

    /// Close the session. Returns whether one was open.
    pub async fn logout(&self) -> bool {
        let was_open = self.inner.write().await.take().is_some();
        if was_open {
            tracing::info!("Storefront session closed");
        }
        was_open
    }

    /// `Authorization` header value for the current session.
    pub async fn authorization(&self) -> Result<String, AppError> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| format!("{}{}", BEARER_PREFIX, s.token))
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
    }

    pub async fn info(&self, storefront: &str) -> SessionInfo {
        let guard = self.inner.read().await;
        SessionInfo {
            logged_in: guard.is_some(),
            storefront: storefront.to_string(),
            since: guard.as_ref().map(|s| s.since.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_session_is_unauthorized() {
        let session = Session::default();
        let err = session.authorization().await.unwrap_err();
        assert_eq!(err, AppError::Unauthorized("Not logged in".to_string()));
        assert!(!session.info("").await.logged_in);
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let session = Session::default();
        session.login("abc123").await.unwrap();
        assert_eq!(session.authorization().await.unwrap(), "Bearer abc123");

        let info = session.info("http://shop.test/api").await;
        assert!(info.logged_in);
        assert_eq!(info.storefront, "http://shop.test/api");
        assert!(info.since.is_some());

        assert!(session.logout().await);
        assert!(!session.logout().await);
        assert!(session.authorization().await.is_err());
    }

    #[tokio::test]
    async fn test_login_strips_bearer_prefix() {
        let session = Session::default();
        session.login("Bearer xyz").await.unwrap();
        assert_eq!(session.authorization().await.unwrap(), "Bearer xyz");
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let session = Session::default();
        assert!(matches!(
            session.login("   ").await,
            Err(AppError::Validation(_))
        ));
        assert!(!session.info("").await.logged_in);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let session = Session::with_token(Some("t1".to_string()));
        let other = session.clone();
        other.logout().await;
        assert!(!session.info("").await.logged_in);
    }
}

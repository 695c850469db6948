//! Order API credential handling.
//!
//! The order API hands us a token that must accompany every artwork
//! download. It is forwarded verbatim as the `Authorization` header value.
//! A token can arrive with the intake request itself or be submitted ahead
//! of time and kept in a [`CredentialCache`] until it goes stale.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;
use tokio::sync::RwLock;
use tracing::debug;

/// A token for the order API and the moment we received it.
#[derive(Clone, Serialize)]
pub struct Credential {
    #[serde(skip_serializing)]
    token: String,
    pub received_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self::received_at(token, Utc::now())
    }

    pub fn received_at(token: impl Into<String>, received_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            received_at,
        }
    }

    /// Builds a credential from an `Authorization` header value.
    ///
    /// The value is kept as sent (including any scheme prefix). Blank
    /// values yield `None`.
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self::new(value))
        }
    }

    /// Value for the outbound `Authorization` header.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.received_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("received_at", &self.received_at)
            .finish()
    }
}

/// Most recently submitted credential, valid for `max_age`.
pub struct CredentialCache {
    current: RwLock<Option<Credential>>,
    max_age: Duration,
}

impl CredentialCache {
    pub fn new(max_age: std::time::Duration) -> Self {
        Self {
            current: RwLock::new(None),
            max_age: Duration::from_std(max_age).unwrap_or(Duration::MAX),
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Replaces the cached credential.
    pub async fn store(&self, credential: Credential) {
        debug!(received_at = %credential.received_at, "Storing order API credential");
        *self.current.write().await = Some(credential);
    }

    /// The cached credential, if one exists and is still fresh.
    pub async fn current(&self) -> Option<Credential> {
        self.current_at(Utc::now()).await
    }

    pub async fn current_at(&self, now: DateTime<Utc>) -> Option<Credential> {
        let guard = self.current.read().await;
        guard
            .as_ref()
            .filter(|c| c.age_at(now) <= self.max_age)
            .cloned()
    }

    pub async fn clear(&self) {
        *self.current.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_authorization_header() {
        let credential = Credential::from_authorization_header("Bearer abc123").unwrap();
        assert_eq!(credential.token(), "Bearer abc123");

        let credential = Credential::from_authorization_header("  abc123 ").unwrap();
        assert_eq!(credential.token(), "abc123");

        assert!(Credential::from_authorization_header("   ").is_none());
        assert!(Credential::from_authorization_header("").is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = Credential::new("super-secret");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_serialize_skips_token() {
        let credential = Credential::new("super-secret");
        let json = serde_json::to_string(&credential).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("received_at"));
    }

    #[tokio::test]
    async fn test_cache_empty() {
        let cache = CredentialCache::new(std::time::Duration::from_secs(60));
        assert!(cache.current().await.is_none());
    }

    #[tokio::test]
    async fn test_cache_store_and_get() {
        let cache = CredentialCache::new(std::time::Duration::from_secs(60));
        cache.store(Credential::new("token-1")).await;
        assert_eq!(cache.current().await.unwrap().token(), "token-1");

        cache.store(Credential::new("token-2")).await;
        assert_eq!(cache.current().await.unwrap().token(), "token-2");
    }

    #[tokio::test]
    async fn test_cache_expires_stale_credential() {
        let cache = CredentialCache::new(std::time::Duration::from_secs(3600));
        let received = Utc::now();
        cache
            .store(Credential::received_at("token", received))
            .await;

        let fresh = received + Duration::seconds(3600);
        assert!(cache.current_at(fresh).await.is_some());

        let stale = received + Duration::seconds(3601);
        assert!(cache.current_at(stale).await.is_none());
    }

    #[test]
    fn test_cache_clear() {
        tokio_test::block_on(async {
            let cache = CredentialCache::new(std::time::Duration::from_secs(60));
            cache.store(Credential::new("token")).await;
            cache.clear().await;
            assert!(cache.current().await.is_none());
        });
    }
}

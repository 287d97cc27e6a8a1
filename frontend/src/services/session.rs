//! # Session
//!
//! Token persistence and the session context handed to every screen that
//! needs to make authenticated calls.
//!
//! The token lives in a key-value [`TokenStore`] under the `token` key. Screens
//! never read storage directly; they receive a [`SessionContext`] and ask it
//! for the current token.

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::UserProfile;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::error::ApiError;

pub const TOKEN_KEY: &str = "token";

/// Bearer token issued at login
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Persistent key-value storage for session data
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// Keeps items in memory; used by tests and one-shot runs
#[derive(Default)]
pub struct MemoryTokenStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// Stores items as a JSON object in a single file
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Corrupt session file {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }

    async fn write_all(&self, items: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}

/// Session state shared by all screens: the persisted token plus the profile
/// fetched for it
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            profile: Arc::new(RwLock::new(None)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Current token. Storage failures are logged and read as "signed out".
    pub async fn token(&self) -> Option<SessionToken> {
        match self.store.get_item(TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => Some(SessionToken::new(token)),
            Ok(_) => None,
            Err(e) => {
                error!("Failed to read session token: {:#}", e);
                None
            }
        }
    }

    pub async fn require_token(&self) -> Result<SessionToken, ApiError> {
        self.token().await.ok_or(ApiError::NotAuthenticated)
    }

    pub async fn is_signed_in(&self) -> bool {
        self.token().await.is_some()
    }

    /// Persist a freshly issued token and remember the user it belongs to
    pub async fn sign_in(&self, token: &str, user: Option<UserProfile>) -> Result<()> {
        self.store.set_item(TOKEN_KEY, token).await?;
        *self.profile.write().await = user;
        info!("🔐 Session started");
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.store.remove_item(TOKEN_KEY).await?;
        *self.profile.write().await = None;
        info!("👋 Session cleared");
        Ok(())
    }

    pub async fn cached_profile(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    pub async fn cache_profile(&self, user: UserProfile) {
        debug!("Caching profile for {}", user.email);
        *self.profile.write().await = Some(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store_set_get_remove() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get_item(TOKEN_KEY).await.unwrap(), None);

        store.set_item(TOKEN_KEY, "abc").await.unwrap();
        assert_eq!(store.get_item(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        store.remove_item(TOKEN_KEY).await.unwrap();
        assert_eq!(store.get_item(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("session.json");

        FileTokenStore::new(&path).set_item(TOKEN_KEY, "persisted").await.unwrap();
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get_item(TOKEN_KEY).await.unwrap().as_deref(), Some("persisted"));

        reopened.remove_item(TOKEN_KEY).await.unwrap();
        assert_eq!(FileTokenStore::new(&path).get_item(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("none.json"));

        assert_eq!(store.get_item(TOKEN_KEY).await.unwrap(), None);
        store.remove_item(TOKEN_KEY).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let session = SessionContext::new(Arc::new(FileTokenStore::new(&path)));
        assert!(session.token().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let session = SessionContext::in_memory();
        assert!(matches!(session.require_token().await, Err(ApiError::NotAuthenticated)));

        let user = UserProfile {
            email: "lan@example.com".to_string(),
            ..Default::default()
        };
        session.sign_in("tok-1", Some(user.clone())).await.unwrap();
        assert_eq!(session.require_token().await.unwrap().as_str(), "tok-1");
        assert_eq!(session.cached_profile().await, Some(user));

        session.sign_out().await.unwrap();
        assert!(!session.is_signed_in().await);
        assert_eq!(session.cached_profile().await, None);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("secret");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
    }
}

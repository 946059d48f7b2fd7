//! Durable storage for the bearer token.

use super::errors::{StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key the token is stored under
pub const TOKEN_KEY: &str = "lobby_auth_token";

/// A single-slot token store.
///
/// Only the session manager writes to it; at most one token is held.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Stored token, if any
    async fn load(&self) -> StorageResult<Option<String>>;

    /// Replace the stored token
    async fn save(&self, token: &str) -> StorageResult<()>;

    /// Remove the stored token. Removing an absent token is not an error.
    async fn clear(&self) -> StorageResult<()>;
}

/// File-backed store: one file named [`TOKEN_KEY`] inside a data directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> StorageResult<Option<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let token = String::from_utf8(bytes).map_err(|_| StorageError::InvalidEncoding)?;
                let token = token.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> StorageResult<()> {
        validate_token(token)?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // Write then rename so a crash never leaves a half-written token.
        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, token.as_bytes()).await?;
        restrict_permissions(&staging).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> StorageResult<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> StorageResult<()> {
    Ok(())
}

/// In-process store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`, as if a previous run had signed in
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }

    /// Current content, without going through the async trait
    pub fn peek(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> StorageResult<Option<String>> {
        Ok(self.peek().filter(|token| !token.is_empty()))
    }

    async fn save(&self, token: &str) -> StorageResult<()> {
        validate_token(token)?;
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

fn validate_token(token: &str) -> StorageResult<()> {
    if token.trim().is_empty() {
        return Err(StorageError::InvalidToken("token is empty".to_string()));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(StorageError::InvalidToken(
            "token contains whitespace".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir() -> PathBuf {
        let rand_id: u64 = rand::random();
        std::env::temp_dir().join(format!("lobby_store_{rand_id}"))
    }

    #[tokio::test]
    async fn test_file_store_lifecycle() {
        let dir = unique_dir();
        let store = FileTokenStore::new(&dir);

        assert_eq!(store.load().await.unwrap(), None);

        store.save("tok123").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("tok123"));
        assert!(store.path().ends_with(TOKEN_KEY));

        store.save("tok456").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("tok456"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_file_store_treats_blank_file_as_absent() {
        let dir = unique_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(TOKEN_KEY), "  \n").unwrap();

        let store = FileTokenStore::new(&dir);
        assert_eq!(store.load().await.unwrap(), None);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_rejects_blank_tokens() {
        let store = MemoryTokenStore::new();
        assert!(matches!(
            store.save("").await,
            Err(StorageError::InvalidToken(_))
        ));
        assert!(store.save("a b").await.is_err());
        assert_eq!(store.peek(), None);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTokenStore::with_token("seed");
        assert_eq!(store.load().await.unwrap().as_deref(), Some("seed"));

        store.save("next").await.unwrap();
        assert_eq!(store.peek().as_deref(), Some("next"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }
}

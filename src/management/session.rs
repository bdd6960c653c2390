use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    spotify,
    types::Token,
};

/// Tokens are treated as expired this many seconds before Spotify says they are.
pub const EXPIRY_MARGIN_SECS: u64 = 240;

pub fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

pub fn expires_at(token: &Token) -> u64 {
    token.obtained_at.saturating_add(token.expires_in)
}

pub fn is_expired(token: &Token, now: u64) -> bool {
    now.saturating_add(EXPIRY_MARGIN_SECS) >= expires_at(token)
}

/// Where the session credential lives between runs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<Token>>;
    async fn set(&self, token: &Token) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Stores the token as json in `<data dir>/cache/token.json`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new() -> Self {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        Self { path }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Result<Option<Token>> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let token: Token = serde_json::from_str(&content)?;
        Ok(Some(token))
    }

    async fn set(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<Token>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<Token>> {
        Ok(self.token.lock().await.clone())
    }

    async fn set(&self, token: &Token) -> Result<()> {
        *self.token.lock().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}

/// Hands out a usable access token, refreshing and re-storing it when it expires.
pub struct SessionManager<S: SessionStore> {
    store: S,
    token: Token,
}

impl<S: SessionStore> SessionManager<S> {
    /// Fails with [`Error::NotAuthenticated`] when the store holds no token.
    pub async fn load(store: S) -> Result<Self> {
        match store.get().await? {
            Some(token) => Ok(Self { store, token }),
            None => Err(Error::NotAuthenticated),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !is_expired(&self.token, now_secs())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Returns the access token, refreshing it first if it has expired.
    ///
    /// A failed refresh is reported as [`Error::SessionExpired`] so callers do
    /// not confuse it with an empty search result.
    pub async fn valid_token(&mut self) -> Result<String> {
        if self.is_authenticated() {
            return Ok(self.token.access_token.clone());
        }

        if self.token.refresh_token.is_empty() {
            return Err(Error::SessionExpired);
        }

        let refreshed = spotify::auth::refresh_token(&self.token.refresh_token)
            .await
            .map_err(|_| Error::SessionExpired)?;
        self.store.set(&refreshed).await?;
        self.token = refreshed;

        Ok(self.token.access_token.clone())
    }

    pub async fn logout(self) -> Result<()> {
        self.store.clear().await
    }
}

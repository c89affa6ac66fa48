use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::utils::home_path;
use super::{Storable, Store};
use crate::config::TOKENS_STORE_PATH;
use crate::impl_store;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Tokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Storable for Tokens {
    fn path() -> Result<PathBuf> {
        home_path(TOKENS_STORE_PATH)
    }
}

impl_store!(Tokens);

/// Durable token storage shared by the HTTP client and the session.
///
/// Every mutation is written through to disk before it returns, so a
/// crashed process never leaves a token the next run can't see.
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
    tokens: Arc<Mutex<Tokens>>,
}

impl TokenStorage {
    pub async fn new() -> Result<Self> {
        Self::open(&Tokens::path()?).await
    }

    pub async fn open(path: &Path) -> Result<Self> {
        let tokens = Tokens::load_from(path).await?;

        Ok(Self {
            path: path.to_path_buf(),
            tokens: Arc::new(Mutex::new(tokens)),
        })
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.lock().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.lock().await.refresh_token.clone()
    }

    pub async fn snapshot(&self) -> Tokens {
        self.tokens.lock().await.clone()
    }

    pub async fn set(&self, access_token: String, refresh_token: Option<String>) -> Result<()> {
        let mut tokens = self.tokens.lock().await;

        tokens.access_token = Some(access_token);
        // the refresh endpoint may only hand back a new access token
        if refresh_token.is_some() {
            tokens.refresh_token = refresh_token;
        }

        tokens.save_to(&self.path).await?;

        Ok(())
    }

    /// Puts back a previous [`TokenStorage::snapshot`].
    pub async fn restore(&self, snapshot: Tokens) -> Result<()> {
        let mut tokens = self.tokens.lock().await;

        *tokens = snapshot;
        tokens.save_to(&self.path).await?;

        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        let mut tokens = self.tokens.lock().await;

        *tokens = Tokens::default();
        tokens.save_to(&self.path).await?;

        Ok(())
    }
}

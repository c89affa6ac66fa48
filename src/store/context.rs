use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::utils::home_path;
use super::Storable;
use crate::config::CONTEXT_STORE_PATH;
use crate::impl_store;

/// Non-secret preferences remembered between runs.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Last email used to log in, offered as the prompt default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Storable for Context {
    fn path() -> Result<PathBuf> {
        home_path(CONTEXT_STORE_PATH)
    }
}

impl_store!(Context);

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub mod context;
pub mod macros;
pub mod tokens;
pub mod utils;

pub trait Storable<T: Serialize + DeserializeOwned + Default + Clone = Self> {
    fn path() -> Result<PathBuf>;
}

#[async_trait]
pub trait Store<T: Storable + Serialize + DeserializeOwned + Default + Clone = Self> {
    // custom trait with its type to implement a macro easily
    #[allow(clippy::new_ret_no_self)]
    async fn new() -> Result<T>;
    async fn save(&self) -> Result<T>;

    /// Loads the store from an explicit location, creating it when missing.
    async fn load_from(path: &Path) -> Result<T>;
    async fn save_to(&self, path: &Path) -> Result<T>;
}

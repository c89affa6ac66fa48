use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(not(windows))]
pub const EXEC_NAME: &str = "ailab";
#[cfg(windows)]
pub const EXEC_NAME: &str = "ailab.exe";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "AILAB_API_URL";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const TOKENS_STORE_PATH: &str = ".ailab/tokens.json";
pub const CONTEXT_STORE_PATH: &str = ".ailab/context.json";

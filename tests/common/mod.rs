#![allow(dead_code)]

use ailab_cli::state::State;
use ailab_cli::store::context::Context;
use ailab_cli::store::tokens::TokenStorage;
use tempfile::TempDir;

pub const ME: &str = r#"{"id": 1, "name": "Test User", "email": "test@ailab.com", "role": "user", "gpu_quota": 4, "is_active": true}"#;

/// A state talking to `api_url` with tokens kept in a throwaway directory.
pub async fn state(api_url: String, access_token: Option<&str>) -> (State, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let tokens = TokenStorage::open(&dir.path().join("tokens.json"))
        .await
        .unwrap();

    if let Some(token) = access_token {
        tokens
            .set(token.to_string(), Some("refresh".to_string()))
            .await
            .unwrap();
    }

    let state = State::from_parts(Context::default(), tokens, Some(api_url)).unwrap();

    (state, dir)
}

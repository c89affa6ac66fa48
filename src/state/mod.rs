pub mod http;
pub mod route;

use anyhow::{bail, Result};

use self::http::HttpClient;
use self::route::Navigator;
use crate::commands::auth::types::User;
use crate::config::{API_URL_ENV, EXEC_NAME};
use crate::session::{Session, SessionStatus};
use crate::store::context::Context;
use crate::store::tokens::TokenStorage;
use crate::store::Store;

#[derive(Debug)]
pub struct State {
    pub ctx: Context,
    pub http: HttpClient,
    pub session: Session,
    pub navigator: Navigator,
}

#[derive(Debug, Default)]
pub struct StateOptions {
    pub override_api_url: Option<String>,
}

impl State {
    pub async fn new(options: StateOptions) -> Result<Self> {
        let ctx = Context::new().await?;
        let tokens = TokenStorage::new().await?;

        // flag, then environment, then whatever was saved last time
        let api_url = options
            .override_api_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .or_else(|| ctx.api_url.clone());

        Self::from_parts(ctx, tokens, api_url)
    }

    pub fn from_parts(ctx: Context, tokens: TokenStorage, api_url: Option<String>) -> Result<Self> {
        let navigator = Navigator::default();
        let http = HttpClient::new(api_url, tokens, navigator.clone())?;
        let session = Session::new(http.clone());

        Ok(State {
            ctx,
            http,
            session,
            navigator,
        })
    }

    /// Restores the session and fails if nobody is logged in.
    pub async fn login(&self) -> Result<User> {
        if matches!(self.session.status(), SessionStatus::Uninitialized) {
            self.session.initialize().await;
        }

        match self.session.user() {
            Some(user) => Ok(user),
            None => bail!("You are not logged in. Please run `{EXEC_NAME} auth login` first."),
        }
    }
}

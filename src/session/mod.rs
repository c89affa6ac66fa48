//! Authenticated-user state for the lifetime of the client.
//!
//! A [`Session`] is the only writer of its [`SessionStatus`]; anything else
//! that cares about the user subscribes to it. It is built once by
//! [`crate::state::State`] and handed down, never reached through a global.

use anyhow::{anyhow, Result};
use tokio::sync::watch;

use crate::commands::auth::types::{LoginRequest, RegisterRequest, User};
use crate::commands::auth::utils::{get_me, login, refresh_token, register};
use crate::state::http::HttpClient;
use crate::state::route::Route;
use crate::store::tokens::TokenStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Loading,
    Authenticated(User),
    Anonymous,
}

impl SessionStatus {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    http: HttpClient,
    status: watch::Sender<SessionStatus>,
}

impl Session {
    pub fn new(http: HttpClient) -> Self {
        let (status, _) = watch::channel(SessionStatus::Uninitialized);

        Self { http, status }
    }

    fn tokens(&self) -> &TokenStorage {
        self.http.tokens()
    }

    fn set_status(&self, status: SessionStatus) {
        self.status.send_replace(status);
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.status.borrow().user().cloned()
    }

    /// Only says the last check succeeded, not that the token is still valid.
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Restores the session from a persisted token, if there is one.
    ///
    /// Failure is not an error: an expired or rejected token just means the
    /// user is logged out.
    pub async fn initialize(&self) {
        self.set_status(SessionStatus::Loading);

        if self.tokens().access_token().await.is_none() {
            self.set_status(SessionStatus::Anonymous);
            return;
        }

        match get_me(&self.http).await {
            Ok(user) => {
                log::debug!("Restored session for `{}`", user.email);

                self.set_status(SessionStatus::Authenticated(user));
            }

            Err(err) => {
                log::debug!("Failed to restore session: {err:#}");

                if let Err(err) = self.tokens().clear().await {
                    log::debug!("Failed to clear tokens: {err:#}");
                }

                self.set_status(SessionStatus::Anonymous);
            }
        }
    }

    /// Overlapping calls are not de-duplicated; each one hits the API.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let tokens = login(
            &self.http,
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await?;

        let previous = self.tokens().snapshot().await;

        self.tokens()
            .set(tokens.access_token, tokens.refresh_token)
            .await?;

        let user = match get_me(&self.http).await {
            Ok(user) => user,
            Err(err) => {
                // a 401 already wiped the tokens, anything else puts the old ones back
                if self.tokens().access_token().await.is_some() {
                    self.tokens().restore(previous).await?;
                } else {
                    self.set_status(SessionStatus::Anonymous);
                }

                return Err(err);
            }
        };

        self.http.navigator().navigate(Route::Dashboard);
        self.set_status(SessionStatus::Authenticated(user.clone()));

        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let created = register(&self.http, request).await?;

        log::debug!("Registered account {} for `{}`", created.id, created.email);

        self.login(&request.email, &request.password).await
    }

    /// Forgets the session locally; the API is not told.
    pub async fn logout(&self) -> Result<()> {
        self.tokens().clear().await?;
        self.set_status(SessionStatus::Anonymous);

        Ok(())
    }

    /// Swaps the stored refresh token for a fresh token pair.
    pub async fn refresh(&self) -> Result<()> {
        let refresh = self
            .tokens()
            .refresh_token()
            .await
            .ok_or_else(|| anyhow!("No refresh token stored, please log in again"))?;

        let tokens = refresh_token(&self.http, &refresh).await?;

        self.tokens()
            .set(tokens.access_token, tokens.refresh_token)
            .await
    }
}

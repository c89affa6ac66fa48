pub mod error;
pub mod types;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client as AsyncClient, StatusCode};
use serde::de::DeserializeOwned;

use self::error::ApiError;
use self::types::ErrorResponse;
use super::route::{Navigator, Route};
use crate::config::{DEFAULT_API_URL, REQUEST_TIMEOUT, VERSION};
use crate::store::tokens::TokenStorage;

#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: AsyncClient,
    pub base_url: String,
    pub ua: String,
    tokens: TokenStorage,
    navigator: Navigator,
}

impl HttpClient {
    pub fn new(
        api_url: Option<String>,
        tokens: TokenStorage,
        navigator: Navigator,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert("accept", HeaderValue::from_static("application/json"));

        let ua = format!(
            "ailab_cli/{VERSION} on {}",
            sys_info::os_type().unwrap_or_else(|_| "unknown".to_string())
        );

        let base_url = api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: AsyncClient::builder()
                .user_agent(ua.clone())
                .default_headers(headers)
                .timeout(REQUEST_TIMEOUT)
                .build()?,
            base_url,
            ua,
            tokens,
            navigator,
        })
    }

    pub fn tokens(&self) -> &TokenStorage {
        &self.tokens
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub async fn handle_response<T>(&self, response: reqwest::Response) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_error(response, status).await);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.bytes().await?;

        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&body).map(Some).map_err(Into::into)
    }

    async fn handle_error(&self, response: reqwest::Response, status: StatusCode) -> ApiError {
        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) => body.into_message(),
            Err(err) => {
                log::debug!("Error deserialize message: {:#?}", err);

                None
            }
        };

        if status == StatusCode::UNAUTHORIZED {
            self.end_session().await;

            return ApiError::Unauthorized { detail };
        }

        if status.is_client_error() {
            return ApiError::Rejected {
                status,
                detail: detail.unwrap_or_else(|| format!("Request failed with HTTP {status}")),
            };
        }

        if let Some(detail) = detail {
            log::debug!("Server error detail: {detail}");
        }

        ApiError::Server { status }
    }

    /// Drops the stored credentials and sends the user to the login view.
    async fn end_session(&self) {
        if let Err(err) = self.tokens.clear().await {
            log::debug!("Failed to clear tokens: {err:#}");
        }

        self.navigator.navigate(Route::Login);
    }

    pub async fn request<T>(
        &self,
        method: &str,
        path: &str,
        data: Option<(reqwest::Body, &str)>,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let method = method
            .parse::<reqwest::Method>()
            .map_err(|_| ApiError::Method(method.to_string()))?;

        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", self.base_url, path));

        if let Some(token) = self.tokens.access_token().await {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        log::debug!("request: {} {}", method, path);

        if let Some((body, content_type)) = data {
            request = request.header("content-type", content_type);

            // show body in debug mode / when developing
            #[cfg(debug_assertions)]
            log::debug!(
                "request body: {}",
                body.as_bytes()
                    .map(String::from_utf8_lossy)
                    .unwrap_or_default()
            );

            request = request.body(body);
        }

        let request = request.build()?;

        let now = tokio::time::Instant::now();

        let response = self.client.execute(request).await?;

        log::debug!(
            "response: {} {} -> {} in {:#?}",
            method,
            path,
            response.status(),
            now.elapsed()
        );

        self.handle_response(response).await
    }
}

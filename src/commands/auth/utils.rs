use anyhow::{anyhow, Result};
use regex::Regex;

use super::types::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, User};
use crate::state::http::HttpClient;

pub async fn login(http: &HttpClient, request: &LoginRequest) -> Result<TokenResponse> {
    http.request::<TokenResponse>(
        "POST",
        "/api/auth/login",
        Some((serde_json::to_string(request)?.into(), "application/json")),
    )
    .await?
    .ok_or_else(|| anyhow!("Error while parsing login response"))
}

pub async fn register(http: &HttpClient, request: &RegisterRequest) -> Result<User> {
    http.request::<User>(
        "POST",
        "/api/auth/register",
        Some((serde_json::to_string(request)?.into(), "application/json")),
    )
    .await?
    .ok_or_else(|| anyhow!("Error while parsing register response"))
}

pub async fn get_me(http: &HttpClient) -> Result<User> {
    http.request::<User>("GET", "/api/auth/me", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub async fn refresh_token(http: &HttpClient, refresh_token: &str) -> Result<TokenResponse> {
    http.request::<TokenResponse>(
        "POST",
        "/api/auth/refresh",
        Some((
            serde_json::to_string(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            })?
            .into(),
            "application/json",
        )),
    )
    .await?
    .ok_or_else(|| anyhow!("Error while parsing refresh response"))
}

pub fn validate_email(email: &str) -> Result<()> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?;

    if re.is_match(email) {
        Ok(())
    } else {
        Err(anyhow!("`{email}` is not a valid email address"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@ailab.com").is_ok());
        assert!(validate_email("first.last@lab.example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("spa ce@ailab.com").is_err());
    }

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "name": "Test", "email": "test@ailab.com"}"#,
        )
        .unwrap();

        assert_eq!(user.id, "7");
        assert_eq!(user.role, "user");
        assert!(user.is_active);
        assert!(!user.is_admin());
    }
}

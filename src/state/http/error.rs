use reqwest::StatusCode;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong, please try again later";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not reach the API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", .detail.as_deref().unwrap_or("Your session has expired"))]
    Unauthorized { detail: Option<String> },

    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Something went wrong, please try again later (HTTP {status})")]
    Server { status: StatusCode },

    #[error("Unexpected response from the API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid HTTP method `{0}`")]
    Method(String),
}

impl ApiError {
    /// Message fit for showing to the user: the backend's own words for
    /// business failures, a generic fallback for everything else.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { detail, .. } => detail.clone(),
            ApiError::Unauthorized { detail } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Same as [`ApiError::user_message`] but for errors that went through `anyhow`.
pub fn user_message(error: &anyhow::Error) -> String {
    error
        .downcast_ref::<ApiError>()
        .map_or_else(|| GENERIC_FAILURE.to_string(), ApiError::user_message)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_user_message() {
        let rejected = ApiError::Rejected {
            status: StatusCode::FORBIDDEN,
            detail: "Insufficient quota for this request".to_string(),
        };
        assert_eq!(rejected.user_message(), "Insufficient quota for this request");

        let server = ApiError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(server.user_message(), GENERIC_FAILURE);

        let wrapped = anyhow::Error::from(rejected);
        assert_eq!(user_message(&wrapped), "Insufficient quota for this request");
        assert_eq!(user_message(&anyhow::anyhow!("boom")), GENERIC_FAILURE);
    }
}

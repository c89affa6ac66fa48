use serde::Deserialize;
use serde_json::Value;

/// Error bodies differ between backends: `{"detail": ...}` from the user
/// platform, `{"error": ...}` from the lab backend.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(Value::String(detail)) => return Some(detail),
            // validation errors come back as a list of objects
            Some(Value::Array(items)) => {
                let messages = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect::<Vec<_>>();

                if !messages.is_empty() {
                    return Some(messages.join(", "));
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => return Some(other.to_string()),
        }

        self.error.or(self.message)
    }
}

/// A list endpoint answers either a bare array or a wrapped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "environments", alias = "users")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}

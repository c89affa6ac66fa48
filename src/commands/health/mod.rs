use anyhow::{anyhow, Result};
use clap::Parser;
use console::style;
use serde::Deserialize;
use serde_json::Value;

use crate::state::http::HttpClient;
use crate::state::State;
use crate::utils::{flatten_json, urlify};

#[derive(Debug, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub components: Value,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Parser)]
#[clap(about = "Check that the AI Lab API is reachable and healthy")]
pub struct Options {}

pub async fn get_health(http: &HttpClient) -> Result<Health> {
    http.request::<Health>("GET", "/health", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub async fn handle(_options: Options, state: State) -> Result<()> {
    let health = get_health(&state.http).await?;

    let status = if health.is_healthy() {
        style(&health.status).green()
    } else {
        style(&health.status).yellow()
    };

    log::info!(
        "{} at {} is {status}",
        health.service.as_deref().unwrap_or("API"),
        urlify(&state.http.base_url)
    );

    if health.components.is_object() {
        for (component, component_status) in flatten_json(&health.components) {
            log::info!("  {component}: {component_status}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_health_without_components() {
        let health: Health = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();

        assert!(!health.is_healthy());
        assert!(health.service.is_none());
        assert!(health.components.is_null());
    }

    #[test]
    fn test_health_components() {
        let health: Health = serde_json::from_str(
            r#"{"status": "healthy", "service": "ai-lab-backend", "components": {"database": "up", "gpus": {"available": 6}}}"#,
        )
        .unwrap();

        assert!(health.is_healthy());
        assert_eq!(
            flatten_json(&health.components),
            vec![
                ("database".to_string(), "up".to_string()),
                ("gpus.available".to_string(), "6".to_string())
            ]
        );
    }
}

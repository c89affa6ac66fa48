use std::io::Write;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tabwriter::TabWriter;

use crate::state::http::HttpClient;
use crate::utils::flatten_json;

// metric payloads have no fixed shape, they are rendered as key/value rows
pub async fn get_system_metrics(http: &HttpClient) -> Result<Value> {
    http.request::<Value>("GET", "/api/monitoring/system", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub async fn get_user_metrics(http: &HttpClient) -> Result<Value> {
    http.request::<Value>("GET", "/api/monitoring/user", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub fn format_metrics(metrics: &Value, title: bool) -> Vec<String> {
    let mut tw = TabWriter::new(vec![]);

    if title {
        writeln!(tw, "METRIC\tVALUE").ok();
    }

    for (key, value) in flatten_json(metrics) {
        writeln!(tw, "{key}\t{value}").ok();
    }

    String::from_utf8(tw.into_inner().unwrap_or_default())
        .unwrap_or_default()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_metrics() {
        let lines = format_metrics(
            &json!({"gpu": {"utilization": 87.5}, "environments": 3}),
            true,
        );

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().any(|l| l.starts_with("gpu.utilization") && l.ends_with("87.5")));
    }
}

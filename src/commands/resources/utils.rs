use anyhow::{anyhow, Result};

use super::types::{Availability, ResourceUsage, Template, Templates};
use crate::commands::environments::types::{Environment, ResourceRequest};
use crate::state::http::HttpClient;

pub async fn get_usage(http: &HttpClient) -> Result<ResourceUsage> {
    http.request::<ResourceUsage>("GET", "/api/resources/usage", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub async fn get_templates(http: &HttpClient) -> Result<Vec<Template>> {
    let response = http
        .request::<Templates>("GET", "/api/resources/templates", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))?;

    Ok(response.templates)
}

pub async fn get_availability(http: &HttpClient) -> Result<Availability> {
    http.request::<Availability>("GET", "/api/resources/availability", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub async fn request_resources(http: &HttpClient, request: &ResourceRequest) -> Result<Environment> {
    http.request::<Environment>(
        "POST",
        "/api/resources/request",
        Some((serde_json::to_string(request)?.into(), "application/json")),
    )
    .await?
    .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub fn find_template<'a>(templates: &'a [Template], id: &str) -> Result<&'a Template> {
    templates.iter().find(|t| t.id == id).ok_or_else(|| {
        anyhow!(
            "Template `{id}` not found, available templates: {}",
            templates
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_usage_with_missing_dimensions() {
        let usage: ResourceUsage = serde_json::from_str(
            r#"{"current_gpus": 2, "current_environments": 1, "quota": {"max_gpus": 4, "max_environments": 10}}"#,
        )
        .unwrap();

        assert_eq!(usage.current_gpus, 2);
        assert_eq!(usage.current_memory_gb, 0);
        assert_eq!(usage.quota.max_gpus, 4);
        assert_eq!(usage.quota.max_storage_gb, 0);
    }

    #[test]
    fn test_find_template() {
        let templates: Templates = serde_json::from_str(
            r#"{"templates": [{
                "id": "vscode-dev",
                "name": "VS Code Development",
                "environment_type": "vscode",
                "recommended_gpu": 1,
                "recommended_memory": 8,
                "packages": {"conda": ["python"], "pip": ["black"]}
            }]}"#,
        )
        .unwrap();

        assert_eq!(
            find_template(&templates.templates, "vscode-dev").unwrap().name,
            "VS Code Development"
        );

        let err = find_template(&templates.templates, "nope").unwrap_err();
        assert!(err.to_string().contains("vscode-dev"));
    }

    #[test]
    fn test_availability_keeps_details() {
        let availability: Availability = serde_json::from_str(
            r#"{"gpus": {"rtx-3090": {"available": 3}}, "total_capacity": {"gpus": 8, "cpu_cores": 64, "memory_gb": 256}}"#,
        )
        .unwrap();

        let capacity = availability.total_capacity.unwrap();
        assert!((capacity.gpus - 8.0).abs() < f64::EPSILON);
        assert!(availability.details.contains_key("gpus"));
    }

    #[test]
    fn test_availability_with_fractional_memory() {
        let availability: Availability = serde_json::from_str(
            r#"{"total_capacity": {"gpus": 8, "cpu_cores": 64, "memory_gb": 251.5}}"#,
        )
        .unwrap();

        let capacity = availability.total_capacity.unwrap();
        assert!((capacity.memory_gb - 251.5).abs() < f64::EPSILON);
        assert!((capacity.cpu_cores - 64.0).abs() < f64::EPSILON);
    }
}

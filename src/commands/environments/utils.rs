use std::io::Write;

use anyhow::{anyhow, ensure, Result};
use serde_json::Value;
use tabwriter::TabWriter;

use super::types::{is_http_url, Environment, EnvironmentStatus};
use crate::commands::dashboard::status::style_status;
use crate::config::EXEC_NAME;
use crate::state::http::types::Listing;
use crate::state::http::HttpClient;
use crate::utils::relative_time;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentAction {
    Open(String),
    Stop,
}

/// What the user may do with an environment right now.
pub fn available_actions(environment: &Environment) -> Vec<EnvironmentAction> {
    if environment.status != EnvironmentStatus::Running {
        return vec![];
    }

    let mut actions = vec![];

    if let Some(url) = environment.access_url.as_ref().filter(|u| is_http_url(u)) {
        actions.push(EnvironmentAction::Open(url.clone()));
    }

    actions.push(EnvironmentAction::Stop);

    actions
}

/// Fails unless the environment can be stopped right now.
pub fn ensure_stoppable(environment: &Environment) -> Result<()> {
    ensure!(
        available_actions(environment).contains(&EnvironmentAction::Stop),
        "`{}` is {}, only running environments can be stopped",
        environment.name,
        environment.status
    );

    Ok(())
}

pub async fn get_all_environments(http: &HttpClient) -> Result<Vec<Environment>> {
    let response = http
        .request::<Listing<Environment>>("GET", "/api/environments", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))?;

    Ok(response.into_vec())
}

pub async fn get_environment(http: &HttpClient, environment_id: &str) -> Result<Environment> {
    http.request::<Environment>("GET", &format!("/api/environments/{environment_id}"), None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))
}

pub async fn stop_environment(http: &HttpClient, environment_id: &str) -> Result<()> {
    http.request::<Value>(
        "DELETE",
        &format!("/api/environments/{environment_id}"),
        None,
    )
    .await?;

    Ok(())
}

pub async fn restart_environment(http: &HttpClient, environment_id: &str) -> Result<()> {
    http.request::<Value>(
        "POST",
        &format!("/api/environments/{environment_id}/restart"),
        None,
    )
    .await?;

    Ok(())
}

/// Resolves an environment from an explicit ID or by asking the user to
/// pick one of those matching `filter`.
pub async fn select_environment<F>(
    http: &HttpClient,
    id: Option<String>,
    prompt: &str,
    filter: F,
) -> Result<Environment>
where
    F: Fn(&Environment) -> bool,
{
    if let Some(id) = id {
        return get_environment(http, &id).await;
    }

    let environments = get_all_environments(http)
        .await?
        .into_iter()
        .filter(|e| filter(e))
        .collect::<Vec<_>>();

    ensure!(!environments.is_empty(), "No matching environments found");

    let environments_fmt = format_environments(&environments, false);

    let idx = dialoguer::Select::new()
        .with_prompt(prompt)
        .items(&environments_fmt)
        .default(0)
        .interact()?;

    Ok(environments[idx].clone())
}

const UNAVAILABLE_ELEMENT: &str = "-";

pub fn format_environments(environments: &[Environment], title: bool) -> Vec<String> {
    let mut tw = TabWriter::new(vec![]).ansi(true);

    if title {
        writeln!(tw, "ID\tNAME\tTYPE\tSTATUS\tGPUS\tCPU\tMEMORY\tCREATED").ok();
    }

    for environment in environments {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            environment.id,
            environment.name,
            environment.environment_type,
            style_status(environment.status),
            match &environment.gpu_type {
                Some(gpu_type) => format!("{}x {gpu_type}", environment.gpu_count),
                None => environment.gpu_count.to_string(),
            },
            environment.cpu_cores,
            format!("{}GB", environment.memory_gb),
            environment
                .created_at
                .map_or_else(|| UNAVAILABLE_ELEMENT.to_string(), |c| format!("{} ago", relative_time(c))),
        )
        .ok();
    }

    String::from_utf8(tw.into_inner().unwrap_or_default())
        .unwrap_or_default()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}

pub fn format_actions(environment: &Environment) -> String {
    let actions = available_actions(environment)
        .iter()
        .map(|action| match action {
            EnvironmentAction::Open(_) => format!("{EXEC_NAME} env open {}", environment.id),
            EnvironmentAction::Stop => format!("{EXEC_NAME} env stop {}", environment.id),
        })
        .collect::<Vec<_>>();

    if actions.is_empty() {
        UNAVAILABLE_ELEMENT.to_string()
    } else {
        actions.join(", ")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn environment(status: EnvironmentStatus, access_url: Option<&str>) -> Environment {
        Environment {
            id: "1".to_string(),
            name: "env".to_string(),
            environment_type: "jupyter".to_string(),
            gpu_count: 1,
            gpu_type: Some("rtx-3090".to_string()),
            cpu_cores: 4,
            memory_gb: 16,
            status,
            access_url: access_url.map(ToString::to_string),
            created_at: None,
        }
    }

    #[test]
    fn test_running_with_url_can_open_and_stop() {
        assert_eq!(
            available_actions(&environment(
                EnvironmentStatus::Running,
                Some("http://lab:8888")
            )),
            vec![
                EnvironmentAction::Open("http://lab:8888".to_string()),
                EnvironmentAction::Stop
            ]
        );
    }

    #[test]
    fn test_running_without_url_can_only_stop() {
        assert_eq!(
            available_actions(&environment(EnvironmentStatus::Running, None)),
            vec![EnvironmentAction::Stop]
        );
        assert_eq!(
            available_actions(&environment(EnvironmentStatus::Running, Some(""))),
            vec![EnvironmentAction::Stop]
        );
        assert_eq!(
            available_actions(&environment(EnvironmentStatus::Running, Some("N/A"))),
            vec![EnvironmentAction::Stop]
        );
    }

    #[test]
    fn test_not_running_has_no_actions() {
        for status in [
            EnvironmentStatus::Creating,
            EnvironmentStatus::Starting,
            EnvironmentStatus::Stopping,
            EnvironmentStatus::Failed,
            EnvironmentStatus::Unknown,
        ] {
            assert!(available_actions(&environment(status, Some("http://lab:8888"))).is_empty());
        }
    }

    #[test]
    fn test_only_running_can_be_stopped() {
        assert!(ensure_stoppable(&environment(EnvironmentStatus::Running, None)).is_ok());

        let err = ensure_stoppable(&environment(EnvironmentStatus::Failed, None)).unwrap_err();
        assert!(err.to_string().contains("is failed"));
    }

    #[test]
    fn test_format_environments() {
        let lines = format_environments(&[environment(EnvironmentStatus::Running, None)], true);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("1x rtx-3090"));
        assert!(lines[1].contains("16GB"));
    }
}

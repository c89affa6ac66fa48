use anyhow::Result;
use console::{style, Term};

use super::gauge::{format_gauges, usage_gauges};
use crate::commands::environments::types::Environment;
use crate::commands::environments::utils::{
    available_actions, format_actions, format_environments, get_all_environments,
};
use crate::commands::resources::types::{ResourceUsage, Template};
use crate::commands::resources::utils::{get_templates, get_usage};
use crate::commands::templates::format_templates;
use crate::config::EXEC_NAME;
use crate::state::http::error::user_message;
use crate::state::http::HttpClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    pub environments: Vec<Environment>,
    pub usage: ResourceUsage,
    pub templates: Vec<Template>,
}

/// Identifies one load; results carrying an older ticket are dropped.
///
/// [`Dashboard::load`] holds `&mut self` for the whole fetch, so loads never
/// overlap within one process. The ticket matters for callers that drive
/// [`Dashboard::begin_load`] and [`Dashboard::finish_load`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct Dashboard {
    generation: u64,
    pub loading: bool,
    pub data: Option<DashboardData>,
    pub error: Option<String>,
}

impl Dashboard {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;

        LoadTicket(self.generation)
    }

    /// Applies a finished load unless a newer one has started since.
    /// Returns whether the result was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<DashboardData>) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "Dropping stale dashboard load {} (current {})",
                ticket.0,
                self.generation
            );

            return false;
        }

        self.loading = false;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }

            // keep showing whatever we had before
            Err(err) => {
                log::debug!("Dashboard load failed: {err:#}");
                self.error = Some(user_message(&err));
            }
        }

        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub async fn load(&mut self, http: &HttpClient) -> bool {
        let ticket = self.begin_load();

        let result = fetch_dashboard(http).await;

        self.finish_load(ticket, result)
    }
}

/// Fetches the three dashboard datasets concurrently; fails if any does.
pub async fn fetch_dashboard(http: &HttpClient) -> Result<DashboardData> {
    let (environments, usage, templates) = tokio::join!(
        get_all_environments(http),
        get_usage(http),
        get_templates(http)
    );

    Ok(DashboardData {
        environments: environments?,
        usage: usage?,
        templates: templates?,
    })
}

/// Loads the dashboard with a loading line on stderr, then prints it.
pub async fn load_and_render(dashboard: &mut Dashboard, http: &HttpClient) -> Result<()> {
    let term = Term::stderr();
    let interactive = term.is_term();

    if interactive {
        term.write_line(&style("Loading dashboard...").dim().to_string())?;
    }

    dashboard.load(http).await;

    if interactive {
        term.clear_last_lines(1)?;
    }

    render(dashboard);

    Ok(())
}

pub fn render(dashboard: &mut Dashboard) {
    if let Some(error) = dashboard.error.clone() {
        log::error!("{error}");
        // nothing retries on its own, the banner is shown once
        dashboard.dismiss_error();
    }

    let Some(data) = &dashboard.data else {
        return;
    };

    println!("{}", style("Resource usage").bold());
    println!("{}\n", format_gauges(&usage_gauges(&data.usage)).join("\n"));

    println!("{}", style("Environments").bold());

    if data.environments.is_empty() {
        println!("No environments yet, create one with `{EXEC_NAME} env new`\n");
    } else {
        println!("{}", format_environments(&data.environments, true).join("\n"));

        for environment in &data.environments {
            if !available_actions(environment).is_empty() {
                println!("  {}: {}", environment.name, format_actions(environment));
            }
        }

        println!();
    }

    println!("{}", style("Templates").bold());
    println!("{}", format_templates(&data.templates, true).join("\n"));
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;

    use super::*;

    fn data(environments: usize) -> DashboardData {
        DashboardData {
            environments: (0..environments)
                .map(|i| {
                    serde_json::from_value(serde_json::json!({
                        "id": i,
                        "name": format!("env-{i}"),
                        "status": "running",
                    }))
                    .unwrap()
                })
                .collect(),
            usage: ResourceUsage::default(),
            templates: vec![],
        }
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut dashboard = Dashboard::default();

        let first = dashboard.begin_load();
        let second = dashboard.begin_load();

        assert!(dashboard.finish_load(second, Ok(data(2))));
        assert!(!dashboard.finish_load(first, Ok(data(1))));

        assert_eq!(dashboard.data.unwrap().environments.len(), 2);
    }

    #[test]
    fn test_loading_until_current_load_finishes() {
        let mut dashboard = Dashboard::default();

        let first = dashboard.begin_load();
        let second = dashboard.begin_load();

        dashboard.finish_load(first, Ok(data(1)));
        assert!(dashboard.loading);

        dashboard.finish_load(second, Ok(data(1)));
        assert!(!dashboard.loading);
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut dashboard = Dashboard::default();

        let ticket = dashboard.begin_load();
        dashboard.finish_load(ticket, Ok(data(3)));

        let ticket = dashboard.begin_load();
        dashboard.finish_load(ticket, Err(anyhow!("connection refused")));

        assert!(dashboard.error.is_some());
        assert_eq!(dashboard.data.as_ref().unwrap().environments.len(), 3);

        dashboard.dismiss_error();
        assert!(dashboard.error.is_none());
    }
}

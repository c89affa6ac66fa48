use anyhow::{anyhow, Result};
use clap::Parser;

use super::types::EnvironmentStatus;
use super::utils::{available_actions, select_environment, EnvironmentAction};
use crate::state::State;
use crate::utils::urlify;

#[derive(Debug, Parser)]
#[clap(about = "Open a running environment in the browser")]
pub struct Options {
    #[clap(help = "ID of the environment")]
    pub environment: Option<String>,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let environment = select_environment(
        &state.http,
        options.environment,
        "Select an environment to open",
        |e| e.status == EnvironmentStatus::Running && e.access_url.is_some(),
    )
    .await?;

    let url = available_actions(&environment)
        .into_iter()
        .find_map(|action| match action {
            EnvironmentAction::Open(url) => Some(url),
            EnvironmentAction::Stop => None,
        })
        .ok_or_else(|| {
            anyhow!(
                "`{}` is {} and has no access URL yet",
                environment.name,
                environment.status
            )
        })?;

    if webbrowser::open(&url).is_err() {
        log::warn!("Could not open a browser, visit {} instead", urlify(&url));
    } else {
        log::info!("Opened {}", urlify(&url));
    }

    Ok(())
}

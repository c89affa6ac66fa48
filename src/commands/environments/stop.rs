use anyhow::{anyhow, Result};
use clap::Parser;

use super::types::EnvironmentStatus;
use super::utils::{ensure_stoppable, select_environment, stop_environment};
use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Stop a running environment")]
pub struct Options {
    #[clap(help = "ID of the environment")]
    pub environment: Option<String>,

    #[clap(short = 'f', long = "force", help = "Skip confirmation")]
    pub force: bool,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let environment = select_environment(
        &state.http,
        options.environment,
        "Select an environment to stop",
        |e| e.status == EnvironmentStatus::Running,
    )
    .await?;

    ensure_stoppable(&environment)?;

    if !options.force {
        dialoguer::Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to stop `{}`?",
                environment.name
            ))
            .interact_opt()?
            .filter(|yes| *yes)
            .ok_or_else(|| anyhow!("Aborted"))?;
    }

    // no local state to update, `env ls` shows what the API reports next
    stop_environment(&state.http, &environment.id).await?;

    log::info!("Stop requested for `{}`", environment.name);

    Ok(())
}

use anyhow::Result;
use clap::Parser;

use super::utils::{restart_environment, select_environment};
use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Restart an environment")]
pub struct Options {
    #[clap(help = "ID of the environment")]
    pub environment: Option<String>,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let environment = select_environment(
        &state.http,
        options.environment,
        "Select an environment to restart",
        |_| true,
    )
    .await?;

    restart_environment(&state.http, &environment.id).await?;

    log::info!("Restart requested for `{}`", environment.name);

    Ok(())
}

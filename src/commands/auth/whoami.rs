use anyhow::Result;
use clap::Parser;

use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Get information about the current user")]
pub struct Options {}

pub async fn handle(_options: Options, state: State) -> Result<()> {
    let me = state.login().await?;

    log::info!("You are logged in as `{}` ({})", me.name, me.email);
    log::info!("Role: {}, GPU quota: {}", me.role, me.gpu_quota);

    if !me.is_active {
        log::warn!("Your account is disabled, ask an administrator to enable it");
    }

    Ok(())
}

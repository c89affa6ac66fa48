use anyhow::Result;
use clap::Parser;

use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Logout the current user")]
pub struct Options {}

pub async fn handle(_options: Options, state: State) -> Result<()> {
    state.session.logout().await?;

    log::info!("You have been logged out");

    Ok(())
}

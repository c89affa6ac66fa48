use anyhow::Result;
use clap::Parser;

use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Exchange the stored refresh token for new tokens")]
pub struct Options {}

pub async fn handle(_options: Options, state: State) -> Result<()> {
    state.session.refresh().await?;

    log::info!("Tokens refreshed");

    Ok(())
}

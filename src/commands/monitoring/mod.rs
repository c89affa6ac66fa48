pub mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use self::utils::{format_metrics, get_system_metrics, get_user_metrics};
use crate::state::State;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[clap(about = "Show cluster-wide metrics")]
    System,
    #[clap(about = "Show metrics for your own environments")]
    User,
}

#[derive(Debug, Parser)]
#[clap(about = "Inspect platform metrics")]
pub struct Options {
    #[clap(subcommand)]
    pub commands: Commands,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let metrics = match options.commands {
        Commands::System => get_system_metrics(&state.http).await?,
        Commands::User => get_user_metrics(&state.http).await?,
    };

    println!("{}", format_metrics(&metrics, true).join("\n"));

    Ok(())
}

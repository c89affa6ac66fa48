mod create;
pub mod form;
mod get;
mod list;
mod open;
mod restart;
mod stop;
pub mod types;
pub mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::state::State;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[clap(name = "new", alias = "create")]
    Create(create::Options),
    #[clap(name = "ls", alias = "list")]
    List(list::Options),
    #[clap(name = "get", alias = "inspect")]
    Get(get::Options),
    #[clap(name = "stop", alias = "rm")]
    Stop(stop::Options),
    Restart(restart::Options),
    Open(open::Options),
}

#[derive(Debug, Parser)]
#[clap(about = "Manage your GPU environments")]
pub struct Options {
    #[clap(subcommand)]
    pub commands: Commands,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    match options.commands {
        Commands::Create(options) => create::handle(options, state).await,
        Commands::List(options) => list::handle(options, state).await,
        Commands::Get(options) => get::handle(options, state).await,
        Commands::Stop(options) => stop::handle(options, state).await,
        Commands::Restart(options) => restart::handle(options, state).await,
        Commands::Open(options) => open::handle(options, state).await,
    }
}

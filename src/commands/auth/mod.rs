mod login;
mod logout;
mod refresh;
mod register;
pub mod types;
pub mod utils;
mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::state::State;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Login(login::Options),
    #[clap(name = "register", alias = "signup")]
    Register(register::Options),
    Logout(logout::Options),
    #[clap(name = "whoami", alias = "me")]
    Whoami(whoami::Options),
    Refresh(refresh::Options),
}

#[derive(Debug, Parser)]
#[clap(about = "Authenticate with AI Lab")]
pub struct Options {
    #[clap(subcommand)]
    pub commands: Commands,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    match options.commands {
        Commands::Login(options) => login::handle(options, state).await,
        Commands::Register(options) => register::handle(options, state).await,
        Commands::Logout(options) => logout::handle(options, state).await,
        Commands::Whoami(options) => whoami::handle(options, state).await,
        Commands::Refresh(options) => refresh::handle(options, state).await,
    }
}

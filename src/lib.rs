#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod commands;
pub mod config;
pub mod session;
pub mod state;
pub mod store;
pub mod utils;

use clap::Parser;
use commands::Commands;

#[derive(Debug, Parser)]
#[clap(
    name = "ailab",
    about = "🧪 Request and monitor AI Lab GPU environments",
    version,
    author
)]
pub struct CLI {
    #[clap(subcommand)]
    pub commands: Commands,

    #[clap(
        long = "api-url",
        help = "Base URL of the AI Lab API",
        global = true
    )]
    pub api_url: Option<String>,

    #[clap(
        short = 'v',
        long = "verbose",
        help = "Print more information",
        global = true
    )]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_cli() {
        use super::*;
        use clap::CommandFactory;

        CLI::command().debug_assert();
    }
}

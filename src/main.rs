#![warn(clippy::pedantic)]

use ailab_cli::commands::{handle_command, Commands};
use ailab_cli::config::EXEC_NAME;
use ailab_cli::state::route::Route;
use ailab_cli::state::{State, StateOptions};
use ailab_cli::{utils, CLI};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // setup panic hook
    utils::set_hook();

    let cli = CLI::parse();

    utils::logs(cli.verbose);

    let state = match State::new(StateOptions {
        override_api_url: cli.api_url,
    })
    .await
    {
        Ok(state) => state,
        Err(error) => {
            log::error!("{error:#}");
            std::process::exit(1);
        }
    };

    let navigator = state.navigator.clone();
    let is_auth_command = matches!(cli.commands, Commands::Auth(_));

    let result = handle_command(cli.commands, state).await;

    // a 401 anywhere sends the user back to the login view
    if navigator.current() == Route::Login && !is_auth_command {
        log::warn!("Your session has ended. Please run `{EXEC_NAME} auth login` to continue.");
    }

    if let Err(error) = result {
        log::error!("{error:#}");
        std::process::exit(1);
    }

    Ok(())
}

pub mod admin;
pub mod auth;
pub mod completions;
pub mod dashboard;
pub mod environments;
pub mod health;
pub mod monitoring;
pub mod resources;
pub mod templates;

use anyhow::Result;
use clap::Subcommand;

use crate::state::State;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Auth(auth::Options),
    #[clap(alias = "dash")]
    Dashboard(dashboard::Options),
    #[clap(name = "env", alias = "environments")]
    Environments(environments::Options),
    Templates(templates::Options),
    Resources(resources::Options),
    Monitoring(monitoring::Options),
    Admin(admin::Options),
    Health(health::Options),
    Completions(completions::Options),
}

pub async fn handle_command(command: Commands, state: State) -> Result<()> {
    match command {
        Commands::Auth(options) => auth::handle(options, state).await,
        Commands::Completions(options) => completions::handle(options),
        Commands::Health(options) => health::handle(options, state).await,

        authorized_command => {
            // login so these commands can run
            state.login().await?;

            match authorized_command {
                Commands::Auth(_) | Commands::Completions(_) | Commands::Health(_) => {
                    unreachable!()
                }
                Commands::Dashboard(options) => dashboard::handle(options, state).await,
                Commands::Environments(options) => environments::handle(options, state).await,
                Commands::Templates(options) => templates::handle(options, state).await,
                Commands::Resources(options) => resources::handle(options, state).await,
                Commands::Monitoring(options) => monitoring::handle(options, state).await,
                Commands::Admin(options) => admin::handle(options, state).await,
            }
        }
    }
}

pub mod types;
pub mod utils;

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};

use self::types::QuotaUpdate;
use self::utils::{format_users, get_all_users, update_quota};
use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Change the resource quota of a user")]
pub struct QuotaOptions {
    #[clap(help = "ID of the user")]
    pub user: String,

    #[clap(long, help = "Maximum number of GPUs")]
    pub gpus: u32,

    #[clap(long, help = "Maximum number of CPU cores")]
    pub cpus: Option<u32>,

    #[clap(long, help = "Maximum memory in GB")]
    pub memory: Option<u32>,

    #[clap(long, help = "Maximum storage in GB")]
    pub storage: Option<u32>,

    #[clap(long, help = "Maximum number of concurrent environments")]
    pub environments: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[clap(name = "users", alias = "ls", about = "List all users")]
    Users {
        #[clap(short, long, help = "Only print the IDs of the users")]
        quiet: bool,
    },
    Quota(QuotaOptions),
}

#[derive(Debug, Parser)]
#[clap(about = "Administer AI Lab users")]
pub struct Options {
    #[clap(subcommand)]
    pub commands: Commands,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    // the API enforces this too, checking here gives a clearer message
    ensure!(
        state.session.user().is_some_and(|u| u.is_admin()),
        "Only administrators can use admin commands"
    );

    match options.commands {
        Commands::Users { quiet } => {
            let users = get_all_users(&state.http).await?;

            if quiet {
                let ids = users
                    .iter()
                    .map(|u| u.id.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");

                println!("{ids}");
            } else {
                println!("{}", format_users(&users, true).join("\n"));
            }
        }

        Commands::Quota(quota) => {
            update_quota(
                &state.http,
                &quota.user,
                &QuotaUpdate {
                    gpu_quota: quota.gpus,
                    cpu_quota: quota.cpus,
                    memory_quota: quota.memory,
                    storage_quota: quota.storage,
                    max_environments: quota.environments,
                },
            )
            .await?;

            log::info!("Updated quota of user `{}`", quota.user);
        }
    }

    Ok(())
}

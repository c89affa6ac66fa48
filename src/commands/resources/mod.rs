pub mod types;
pub mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;

use self::utils::{get_availability, get_usage};
use crate::commands::dashboard::gauge::{format_gauges, usage_gauges};
use crate::state::State;
use crate::utils::flatten_json;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[clap(about = "Show your resource usage against your quota")]
    Usage,
    #[clap(name = "availability", alias = "avail", about = "Show cluster capacity")]
    Availability,
}

#[derive(Debug, Parser)]
#[clap(about = "Inspect resource usage and availability")]
pub struct Options {
    #[clap(subcommand)]
    pub commands: Commands,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    match options.commands {
        Commands::Usage => {
            let usage = get_usage(&state.http).await?;

            println!("{}", format_gauges(&usage_gauges(&usage)).join("\n"));
        }

        Commands::Availability => {
            let availability = get_availability(&state.http).await?;

            if let Some(capacity) = &availability.total_capacity {
                println!("{}", style("Total capacity").bold());
                println!(
                    "{} GPUs, {} CPU cores, {} GB memory\n",
                    capacity.gpus, capacity.cpu_cores, capacity.memory_gb
                );
            }

            let details = flatten_json(&serde_json::Value::Object(availability.details));

            for (key, value) in details {
                println!("{}: {value}", style(key).dim());
            }
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;

use super::utils::{format_environments, get_all_environments};
use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "List your environments")]
pub struct Options {
    #[clap(short, long, help = "Only print the IDs of the environments")]
    pub quiet: bool,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let environments = get_all_environments(&state.http).await?;

    if options.quiet {
        let ids = environments
            .iter()
            .map(|e| e.id.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        println!("{ids}");
    } else {
        println!("{}", format_environments(&environments, true).join("\n"));
    }

    Ok(())
}

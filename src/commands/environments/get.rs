use std::io::Write;

use anyhow::{anyhow, Result};
use clap::Parser;
use tabwriter::TabWriter;

use super::utils::{format_actions, select_environment};
use crate::commands::dashboard::status::style_status;
use crate::state::State;
use crate::utils::urlify;

#[derive(Debug, Parser)]
#[clap(about = "Show details of an environment")]
pub struct Options {
    #[clap(help = "ID of the environment")]
    pub environment: Option<String>,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let environment = select_environment(
        &state.http,
        options.environment,
        "Select an environment",
        |_| true,
    )
    .await?;

    let mut tw = TabWriter::new(vec![]).ansi(true);

    writeln!(tw, "ID\t{}", environment.id)?;
    writeln!(tw, "Name\t{}", environment.name)?;
    writeln!(tw, "Type\t{}", environment.environment_type)?;
    writeln!(tw, "Status\t{}", style_status(environment.status))?;
    writeln!(
        tw,
        "GPUs\t{} {}",
        environment.gpu_count,
        environment.gpu_type.as_deref().unwrap_or_default()
    )?;
    writeln!(tw, "CPU cores\t{}", environment.cpu_cores)?;
    writeln!(tw, "Memory\t{}GB", environment.memory_gb)?;

    if let Some(url) = &environment.access_url {
        writeln!(tw, "URL\t{}", urlify(url))?;
    }

    if let Some(created_at) = environment.created_at {
        writeln!(tw, "Created\t{}", created_at.to_rfc2822())?;
    }

    writeln!(tw, "Actions\t{}", format_actions(&environment))?;

    print!(
        "{}",
        String::from_utf8(
            tw.into_inner()
                .map_err(|_| anyhow!("Failed to format environment"))?
        )?
    );

    Ok(())
}

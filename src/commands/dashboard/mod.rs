pub mod gauge;
pub mod status;
pub mod view;

use anyhow::Result;
use clap::Parser;

use self::view::{load_and_render, Dashboard};
use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "Show your resource usage, environments and templates")]
pub struct Options {}

pub async fn handle(_options: Options, state: State) -> Result<()> {
    if let Some(user) = state.session.user() {
        log::info!("Signed in as `{}` ({})", user.name, user.email);
    }

    let mut dashboard = Dashboard::default();

    load_and_render(&mut dashboard, &state.http).await
}

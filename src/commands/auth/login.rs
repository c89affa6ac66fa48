use anyhow::Result;
use clap::Parser;

use super::utils::validate_email;
use crate::state::State;
use crate::store::Store;

#[derive(Debug, Parser)]
#[clap(about = "Login to AI Lab")]
pub struct Options {
    #[clap(long = "email", help = "Email")]
    pub email: Option<String>,
    #[clap(
        long = "password",
        help = "Password",
        long_help = "Password, you will be prompted for it when left out"
    )]
    pub password: Option<String>,
}

pub async fn handle(options: Options, mut state: State) -> Result<()> {
    let email = match options.email {
        Some(email) => email,
        None => {
            let mut input = dialoguer::Input::<String>::new();
            input.with_prompt("Email");

            if let Some(last) = &state.ctx.email {
                input.default(last.clone());
            }

            input.interact_text()?
        }
    };

    validate_email(&email)?;

    let password = match options.password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?,
    };

    let user = state.session.login(&email, &password).await?;

    // remember where and as whom we logged in
    state.ctx.email = Some(email);
    state.ctx.api_url = Some(state.http.base_url.clone());
    state.ctx.save().await?;

    log::info!("Logged in as: `{}` ({})", user.name, user.email);

    Ok(())
}

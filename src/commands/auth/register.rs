use anyhow::Result;
use clap::Parser;

use super::types::RegisterRequest;
use super::utils::validate_email;
use crate::state::State;
use crate::store::Store;

#[derive(Debug, Parser)]
#[clap(about = "Create an AI Lab account and log into it")]
pub struct Options {
    #[clap(long = "name", help = "Display name")]
    pub name: Option<String>,
    #[clap(long = "email", help = "Email")]
    pub email: Option<String>,
    #[clap(long = "password", help = "Password")]
    pub password: Option<String>,
}

pub async fn handle(options: Options, mut state: State) -> Result<()> {
    let name = match options.name {
        Some(name) => name,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Name")
            .interact_text()?,
    };

    let email = match options.email {
        Some(email) => email,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .validate_with(|email: &String| validate_email(email).map_err(|e| e.to_string()))
            .interact_text()?,
    };

    validate_email(&email)?;

    let password = match options.password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user = state
        .session
        .register(&RegisterRequest {
            name,
            email: email.clone(),
            password,
        })
        .await?;

    state.ctx.email = Some(email);
    state.ctx.api_url = Some(state.http.base_url.clone());
    state.ctx.save().await?;

    log::info!(
        "Welcome {}! Your account has a quota of {} GPUs",
        user.name,
        user.gpu_quota
    );

    Ok(())
}

use anyhow::{bail, ensure, Result};
use chrono::Utc;
use clap::Parser;

use super::form::{
    CreateDialog, EnvironmentForm, CPU_CORES_RANGE, GPU_COUNT_RANGE, MEMORY_GB_RANGE,
    MEMORY_GB_STEP,
};
use super::types::{EnvironmentType, GpuType};
use crate::commands::dashboard::view::{load_and_render, Dashboard};
use crate::commands::resources::utils::{find_template, get_templates, request_resources};
use crate::commands::templates::format_template_choice;
use crate::state::http::error::user_message;
use crate::state::route::Route;
use crate::state::State;
use crate::utils::ask_question_iter;

#[derive(Debug, Parser, Default)]
#[clap(about = "Request a new environment")]
pub struct Options {
    #[clap(short, long, help = "ID of the template to start from")]
    pub template: Option<String>,

    #[clap(short, long, help = "Name of the environment")]
    pub name: Option<String>,

    #[clap(long = "type", help = "Type of the environment: jupyter, vscode or custom")]
    pub environment_type: Option<EnvironmentType>,

    #[clap(long, help = "Number of GPUs (1-4)")]
    pub gpus: Option<u32>,

    #[clap(long = "gpu-type", help = "GPU model: rtx-3090 or rtx-2080-ti")]
    pub gpu_type: Option<GpuType>,

    #[clap(long, help = "Number of CPU cores (1-16)")]
    pub cpus: Option<u32>,

    #[clap(long, help = "Memory in GB (4-64, multiple of 4)")]
    pub memory: Option<u32>,

    #[clap(long, help = "Storage in GB")]
    pub storage: Option<u32>,

    #[clap(long, help = "Image to run for custom environments")]
    pub image: Option<String>,

    #[clap(short, long, help = "Don't prompt, use flags and defaults as-is")]
    pub yes: bool,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let templates = get_templates(&state.http).await?;
    let mut dialog = CreateDialog::default();

    let interactive = !options.yes;

    match &options.template {
        Some(id) => dialog.select_template(find_template(&templates, id)?, Utc::now()),

        None if interactive && !templates.is_empty() => {
            let mut choices = vec!["Start from scratch".to_string()];
            choices.extend(templates.iter().map(format_template_choice));

            let idx = dialoguer::Select::new()
                .with_prompt("Select a template")
                .items(&choices)
                .default(0)
                .interact()?;

            match idx {
                0 => dialog.open(),
                idx => dialog.select_template(&templates[idx - 1], Utc::now()),
            }
        }

        None => dialog.open(),
    }

    apply_overrides(&mut dialog.form, &options);

    if interactive {
        prompt_form(&mut dialog.form, &options, dialog.selected_template.is_some())?;
    }

    ensure!(
        dialog.form.can_submit(),
        "Environment name is required, pass `--name` or pick a template"
    );

    loop {
        let request = dialog.form.to_request()?;

        match request_resources(&state.http, &request).await {
            Ok(environment) => {
                log::info!(
                    "Requested environment `{}`, it is {}",
                    environment.name,
                    environment.status
                );

                dialog.submit_succeeded();
                break;
            }

            Err(err) => {
                let message = user_message(&err);
                log::debug!("Resource request failed: {err:#}");

                dialog.submit_failed(message.clone());

                if state.navigator.current() == Route::Login {
                    bail!(message);
                }

                log::error!("{message}");

                let retry = interactive
                    && dialoguer::Confirm::new()
                        .with_prompt("Try again?")
                        .default(false)
                        .interact()?;

                if !retry {
                    bail!("Failed to create environment");
                }
            }
        }
    }

    // the list only ever reflects what the API confirmed
    let mut dashboard = Dashboard::default();

    load_and_render(&mut dashboard, &state.http).await
}

fn apply_overrides(form: &mut EnvironmentForm, options: &Options) {
    if let Some(name) = &options.name {
        form.environment_name = name.clone();
    }

    if let Some(environment_type) = options.environment_type {
        form.environment_type = environment_type;
    }

    if let Some(gpus) = options.gpus {
        form.gpu_count = gpus;
    }

    if let Some(gpu_type) = options.gpu_type {
        form.gpu_type = gpu_type;
    }

    if let Some(cpus) = options.cpus {
        form.cpu_cores = cpus;
    }

    if let Some(memory) = options.memory {
        form.memory_gb = memory;
    }

    if let Some(storage) = options.storage {
        form.storage_gb = storage;
    }

    if options.image.is_some() {
        form.custom_image = options.image.clone();
    }
}

fn prompt_form(form: &mut EnvironmentForm, options: &Options, from_template: bool) -> Result<()> {
    if options.name.is_none() {
        form.environment_name = dialoguer::Input::<String>::new()
            .with_prompt("Name of the environment")
            .with_initial_text(form.environment_name.clone())
            .interact_text()?;
    }

    if options.environment_type.is_none() && !from_template {
        form.environment_type = ask_question_iter(
            "Select the environment type",
            &EnvironmentType::values(),
            Some(form.environment_type),
        )?;
    }

    if options.gpus.is_none() {
        form.gpu_count = dialoguer::Input::<u32>::new()
            .with_prompt("Number of GPUs")
            .default(form.gpu_count)
            .validate_with(|count: &u32| {
                if GPU_COUNT_RANGE.contains(count) {
                    Ok(())
                } else {
                    Err(format!(
                        "Must be between {} and {}",
                        GPU_COUNT_RANGE.start(),
                        GPU_COUNT_RANGE.end()
                    ))
                }
            })
            .interact_text()?;
    }

    if options.gpu_type.is_none() {
        form.gpu_type =
            ask_question_iter("Select the GPU type", &GpuType::values(), Some(form.gpu_type))?;
    }

    if options.cpus.is_none() {
        form.cpu_cores = dialoguer::Input::<u32>::new()
            .with_prompt("Number of CPU cores")
            .default(form.cpu_cores)
            .validate_with(|cores: &u32| {
                if CPU_CORES_RANGE.contains(cores) {
                    Ok(())
                } else {
                    Err(format!(
                        "Must be between {} and {}",
                        CPU_CORES_RANGE.start(),
                        CPU_CORES_RANGE.end()
                    ))
                }
            })
            .interact_text()?;
    }

    if options.memory.is_none() {
        let sizes = MEMORY_GB_RANGE
            .step_by(MEMORY_GB_STEP as usize)
            .collect::<Vec<_>>();

        let idx = dialoguer::Select::new()
            .with_prompt("Memory")
            .items(
                &sizes
                    .iter()
                    .map(|size| format!("{size}GB"))
                    .collect::<Vec<_>>(),
            )
            .default(sizes.iter().position(|s| *s == form.memory_gb).unwrap_or(0))
            .interact()?;

        form.memory_gb = sizes[idx];
    }

    if options.storage.is_none() {
        form.storage_gb = dialoguer::Input::<u32>::new()
            .with_prompt("Storage in GB")
            .default(form.storage_gb)
            .interact_text()?;
    }

    if form.environment_type == EnvironmentType::Custom && options.image.is_none() {
        let image = dialoguer::Input::<String>::new()
            .with_prompt("Image to run (leave empty for the default)")
            .allow_empty(true)
            .interact_text()?;

        form.custom_image = Some(image).filter(|i| !i.is_empty());
    }

    if !form.conda_packages.is_empty() || !form.pip_packages.is_empty() {
        log::info!(
            "Packages from the template: conda [{}], pip [{}]",
            form.conda_packages.join(", "),
            form.pip_packages.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_overrides_win_over_template() {
        let mut form = EnvironmentForm {
            environment_name: "pytorch-jupyter-1".to_string(),
            gpu_count: 1,
            ..EnvironmentForm::default()
        };

        apply_overrides(
            &mut form,
            &Options {
                name: Some("mine".to_string()),
                gpus: Some(2),
                memory: Some(32),
                ..Options::default()
            },
        );

        assert_eq!(form.environment_name, "mine");
        assert_eq!(form.gpu_count, 2);
        assert_eq!(form.memory_gb, 32);
        assert_eq!(form.cpu_cores, EnvironmentForm::default().cpu_cores);
    }
}

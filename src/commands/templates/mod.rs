use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tabwriter::TabWriter;

use crate::commands::resources::types::Template;
use crate::commands::resources::utils::get_templates;
use crate::state::State;

#[derive(Debug, Parser)]
#[clap(about = "List environment templates")]
pub struct Options {
    #[clap(short, long, help = "Only print the IDs of the templates")]
    pub quiet: bool,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let templates = get_templates(&state.http).await?;

    if options.quiet {
        let ids = templates
            .iter()
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        println!("{ids}");
    } else {
        println!("{}", format_templates(&templates, true).join("\n"));
    }

    Ok(())
}

pub fn format_templates(templates: &[Template], title: bool) -> Vec<String> {
    let mut tw = TabWriter::new(vec![]);

    if title {
        writeln!(tw, "ID\tNAME\tTYPE\tGPUS\tMEMORY\tPACKAGES").ok();
    }

    for template in templates {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}GB\t{}",
            template.id,
            template.name,
            template.environment_type,
            template.recommended_gpu,
            template.recommended_memory,
            template
                .packages
                .conda
                .iter()
                .chain(template.packages.pip.iter())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
        .ok();
    }

    String::from_utf8(tw.into_inner().unwrap_or_default())
        .unwrap_or_default()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}

pub fn format_template_choice(template: &Template) -> String {
    if template.description.is_empty() {
        template.name.clone()
    } else {
        format!("{} - {}", template.name, template.description)
    }
}

use console::{style, StyledObject};

use crate::commands::environments::types::EnvironmentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Warning,
    Error,
    Info,
    Default,
}

/// Display only; the client never moves an environment between states.
pub fn status_color(status: EnvironmentStatus) -> StatusColor {
    match status {
        EnvironmentStatus::Running => StatusColor::Success,
        EnvironmentStatus::Starting | EnvironmentStatus::Stopping => StatusColor::Warning,
        EnvironmentStatus::Failed => StatusColor::Error,
        EnvironmentStatus::Creating => StatusColor::Info,
        EnvironmentStatus::Unknown => StatusColor::Default,
    }
}

pub fn style_status(status: EnvironmentStatus) -> StyledObject<String> {
    let styled = style(status.to_string());

    match status_color(status) {
        StatusColor::Success => styled.green(),
        StatusColor::Warning => styled.yellow(),
        StatusColor::Error => styled.red(),
        StatusColor::Info => styled.cyan(),
        StatusColor::Default => styled.dim(),
    }
}

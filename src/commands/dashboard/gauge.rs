use std::fmt::Display;

use console::style;

use crate::commands::resources::types::ResourceUsage;

const BAR_WIDTH: usize = 24;

/// One quota dimension, e.g. "3/4 GPUs".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gauge {
    pub label: &'static str,
    pub current: u64,
    pub max: u64,
}

impl Gauge {
    /// Progress in `[0, 1]`; over-quota usage is clamped, an unset quota reads as empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }

        (self.current as f64 / self.max as f64).min(1.0)
    }

    pub fn is_exceeded(&self) -> bool {
        self.current > self.max
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bar(&self) -> String {
        let filled = (self.fraction() * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));

        if self.is_exceeded() || self.fraction() >= 0.9 {
            style(bar).red().to_string()
        } else if self.fraction() >= 0.7 {
            style(bar).yellow().to_string()
        } else {
            style(bar).green().to_string()
        }
    }
}

impl Display for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} {}", self.current, self.max, self.label)
    }
}

pub fn usage_gauges(usage: &ResourceUsage) -> Vec<Gauge> {
    vec![
        Gauge {
            label: "GPUs",
            current: usage.current_gpus,
            max: usage.quota.max_gpus,
        },
        Gauge {
            label: "CPU cores",
            current: usage.current_cpu_cores,
            max: usage.quota.max_cpu_cores,
        },
        Gauge {
            label: "GB memory",
            current: usage.current_memory_gb,
            max: usage.quota.max_memory_gb,
        },
        Gauge {
            label: "GB storage",
            current: usage.current_storage_gb,
            max: usage.quota.max_storage_gb,
        },
        Gauge {
            label: "environments",
            current: usage.current_environments,
            max: usage.quota.max_environments,
        },
    ]
}

pub fn format_gauges(gauges: &[Gauge]) -> Vec<String> {
    gauges
        .iter()
        .map(|gauge| format!("{} {gauge}", gauge.bar()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commands::resources::types::ResourceQuota;

    #[test]
    fn test_gpu_gauge() {
        let usage = ResourceUsage {
            current_gpus: 3,
            quota: ResourceQuota {
                max_gpus: 4,
                ..ResourceQuota::default()
            },
            ..ResourceUsage::default()
        };

        let gauges = usage_gauges(&usage);
        let gpus = &gauges[0];

        assert_eq!(gpus.to_string(), "3/4 GPUs");
        assert!((gpus.fraction() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_edges() {
        let empty = Gauge {
            label: "GPUs",
            current: 2,
            max: 0,
        };
        assert!(empty.fraction().abs() < f64::EPSILON);

        let over = Gauge {
            label: "GPUs",
            current: 6,
            max: 4,
        };
        assert!((over.fraction() - 1.0).abs() < f64::EPSILON);
        assert!(over.is_exceeded());
        assert_eq!(over.to_string(), "6/4 GPUs");
    }

    #[test]
    fn test_bar_width() {
        console::set_colors_enabled(false);

        let gauge = Gauge {
            label: "GPUs",
            current: 1,
            max: 2,
        };

        assert_eq!(gauge.bar().chars().count(), BAR_WIDTH);
    }
}

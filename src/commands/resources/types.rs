use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commands::environments::types::EnvironmentType;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceQuota {
    pub max_gpus: u64,
    pub max_cpu_cores: u64,
    pub max_memory_gb: u64,
    pub max_storage_gb: u64,
    pub max_environments: u64,
}

/// Point-in-time snapshot; the lab backend leaves out dimensions it
/// doesn't track, which read as zero.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceUsage {
    pub current_gpus: u64,
    pub current_cpu_cores: u64,
    pub current_memory_gb: u64,
    pub current_storage_gb: u64,
    pub current_environments: u64,
    pub quota: ResourceQuota,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Packages {
    pub conda: Vec<String>,
    pub pip: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub environment_type: EnvironmentType,
    pub recommended_gpu: u32,
    pub recommended_memory: u32,
    #[serde(default)]
    pub packages: Packages,
}

#[derive(Debug, Deserialize)]
pub struct Templates {
    pub templates: Vec<Template>,
}

/// Summed over nodes, so memory in particular may be fractional.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Capacity {
    pub gpus: f64,
    pub cpu_cores: f64,
    pub memory_gb: f64,
}

/// Cluster-wide availability; only the totals have a fixed shape.
#[derive(Debug, Deserialize, Clone)]
pub struct Availability {
    #[serde(default)]
    pub total_capacity: Option<Capacity>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}

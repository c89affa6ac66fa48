use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::{deserialize_id, deserialize_timestamp};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentType {
    #[default]
    #[serde(rename = "jupyter")]
    Jupyter,
    #[serde(rename = "vscode")]
    Vscode,
    #[serde(rename = "custom")]
    Custom,
}

impl FromStr for EnvironmentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(&format!("\"{}\"", s.to_lowercase()))
            .map_err(|_| anyhow!("Unknown environment type `{s}`, expected jupyter, vscode or custom"))
    }
}

impl Display for EnvironmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string(self)
                .map_err(|_| std::fmt::Error)?
                .replace('"', "")
        )
    }
}

impl EnvironmentType {
    pub fn values() -> Vec<EnvironmentType> {
        vec![
            EnvironmentType::Jupyter,
            EnvironmentType::Vscode,
            EnvironmentType::Custom,
        ]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuType {
    #[default]
    #[serde(rename = "rtx-3090")]
    Rtx3090,
    #[serde(rename = "rtx-2080-ti")]
    Rtx2080Ti,
}

impl FromStr for GpuType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(&format!("\"{}\"", s.to_lowercase()))
            .map_err(|_| anyhow!("Unknown GPU type `{s}`, expected rtx-3090 or rtx-2080-ti"))
    }
}

impl Display for GpuType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string(self)
                .map_err(|_| std::fmt::Error)?
                .replace('"', "")
        )
    }
}

impl GpuType {
    pub fn values() -> Vec<GpuType> {
        vec![GpuType::Rtx3090, GpuType::Rtx2080Ti]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentStatus {
    Creating,
    Starting,
    Running,
    Stopping,
    Failed,
    #[serde(other)]
    Unknown,
}

impl Display for EnvironmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string(self)
                .map_err(|_| std::fmt::Error)?
                .replace('"', "")
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Environment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    // kept loose, the lab backend reports types like `mlflow` too
    #[serde(default, alias = "type")]
    pub environment_type: String,
    #[serde(default)]
    pub gpu_count: u32,
    #[serde(default)]
    pub gpu_type: Option<String>,
    #[serde(default)]
    pub cpu_cores: u32,
    #[serde(default)]
    pub memory_gb: u32,
    pub status: EnvironmentStatus,
    #[serde(default, deserialize_with = "deserialize_access_url")]
    pub access_url: Option<String>,
    #[serde(
        default,
        alias = "created",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Whether `url` is something a browser can open.
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// The lab backend reports `"N/A"` when an environment has no URL.
fn deserialize_access_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    Ok(raw.filter(|url| is_http_url(url)))
}

/// Body of `POST /api/resources/request`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub environment_name: String,
    pub environment_type: EnvironmentType,
    pub gpu_count: u32,
    pub gpu_type: GpuType,
    pub cpu_cores: u32,
    pub memory_gb: u32,
    pub storage_gb: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_image: Option<String>,
    pub conda_packages: Vec<String>,
    pub pip_packages: Vec<String>,
}

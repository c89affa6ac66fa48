use std::ops::RangeInclusive;

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};

use super::types::{EnvironmentType, GpuType, ResourceRequest};
use crate::commands::resources::types::Template;

pub const GPU_COUNT_RANGE: RangeInclusive<u32> = 1..=4;
pub const CPU_CORES_RANGE: RangeInclusive<u32> = 1..=16;
pub const MEMORY_GB_RANGE: RangeInclusive<u32> = 4..=64;
pub const MEMORY_GB_STEP: u32 = 4;
pub const DEFAULT_STORAGE_GB: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentForm {
    pub environment_name: String,
    pub environment_type: EnvironmentType,
    pub gpu_count: u32,
    pub gpu_type: GpuType,
    pub cpu_cores: u32,
    pub memory_gb: u32,
    pub storage_gb: u32,
    pub custom_image: Option<String>,
    // only ever filled in from a template
    pub conda_packages: Vec<String>,
    pub pip_packages: Vec<String>,
}

impl Default for EnvironmentForm {
    fn default() -> Self {
        Self {
            environment_name: String::new(),
            environment_type: EnvironmentType::Jupyter,
            gpu_count: 1,
            gpu_type: GpuType::Rtx3090,
            cpu_cores: 4,
            memory_gb: 16,
            storage_gb: DEFAULT_STORAGE_GB,
            custom_image: None,
            conda_packages: vec![],
            pip_packages: vec![],
        }
    }
}

impl EnvironmentForm {
    /// Copies the template's recommendations over the current values and
    /// names the environment `<template id>-<unix millis>`.
    pub fn apply_template(&mut self, template: &Template, now: DateTime<Utc>) {
        self.environment_name = format!("{}-{}", template.id, now.timestamp_millis());
        self.environment_type = template.environment_type;
        self.gpu_count = template.recommended_gpu;
        self.memory_gb = template.recommended_memory;
        self.conda_packages = template.packages.conda.clone();
        self.pip_packages = template.packages.pip.clone();
    }

    pub fn can_submit(&self) -> bool {
        !self.environment_name.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.can_submit(), "Environment name is required");
        ensure!(
            GPU_COUNT_RANGE.contains(&self.gpu_count),
            "GPU count must be between {} and {}",
            GPU_COUNT_RANGE.start(),
            GPU_COUNT_RANGE.end()
        );
        ensure!(
            CPU_CORES_RANGE.contains(&self.cpu_cores),
            "CPU cores must be between {} and {}",
            CPU_CORES_RANGE.start(),
            CPU_CORES_RANGE.end()
        );
        ensure!(
            MEMORY_GB_RANGE.contains(&self.memory_gb) && self.memory_gb % MEMORY_GB_STEP == 0,
            "Memory must be a multiple of {MEMORY_GB_STEP} GB between {} and {} GB",
            MEMORY_GB_RANGE.start(),
            MEMORY_GB_RANGE.end()
        );
        ensure!(self.storage_gb > 0, "Storage must be at least 1 GB");

        Ok(())
    }

    pub fn to_request(&self) -> Result<ResourceRequest> {
        self.validate()?;

        Ok(ResourceRequest {
            environment_name: self.environment_name.clone(),
            environment_type: self.environment_type,
            gpu_count: self.gpu_count,
            gpu_type: self.gpu_type,
            cpu_cores: self.cpu_cores,
            memory_gb: self.memory_gb,
            storage_gb: self.storage_gb,
            custom_image: self
                .custom_image
                .clone()
                .filter(|_| self.environment_type == EnvironmentType::Custom),
            conda_packages: self.conda_packages.clone(),
            pip_packages: self.pip_packages.clone(),
        })
    }
}

/// The "create environment" dialog: open state, selected template, the form
/// behind it and the last submission error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDialog {
    pub open: bool,
    pub selected_template: Option<String>,
    pub form: EnvironmentForm,
    pub error: Option<String>,
}

impl CreateDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn select_template(&mut self, template: &Template, now: DateTime<Utc>) {
        self.form.apply_template(template, now);
        self.selected_template = Some(template.id.clone());
        self.open = true;
    }

    pub fn submit_succeeded(&mut self) {
        *self = Self::default();
    }

    /// Keeps the dialog open with the form as-is so the user can retry.
    pub fn submit_failed(&mut self, message: String) {
        self.error = Some(message);
    }
}

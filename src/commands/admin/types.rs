use serde::Serialize;

/// Body of `PUT /api/admin/users/:id/quota`; unset limits are left as-is.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct QuotaUpdate {
    pub gpu_quota: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_quota: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_quota: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_quota: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_environments: Option<u32>,
}

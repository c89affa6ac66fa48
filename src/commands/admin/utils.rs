use std::io::Write;

use anyhow::{anyhow, Result};
use console::style;
use serde_json::Value;
use tabwriter::TabWriter;

use super::types::QuotaUpdate;
use crate::commands::auth::types::User;
use crate::state::http::types::Listing;
use crate::state::http::HttpClient;

pub async fn get_all_users(http: &HttpClient) -> Result<Vec<User>> {
    let response = http
        .request::<Listing<User>>("GET", "/api/admin/users", None)
        .await?
        .ok_or_else(|| anyhow!("Error while parsing response"))?;

    Ok(response.into_vec())
}

pub async fn update_quota(http: &HttpClient, user_id: &str, update: &QuotaUpdate) -> Result<()> {
    http.request::<Value>(
        "PUT",
        &format!("/api/admin/users/{user_id}/quota"),
        Some((serde_json::to_string(update)?.into(), "application/json")),
    )
    .await?;

    Ok(())
}

pub fn format_users(users: &[User], title: bool) -> Vec<String> {
    let mut tw = TabWriter::new(vec![]).ansi(true);

    if title {
        writeln!(tw, "ID\tNAME\tEMAIL\tROLE\tGPU QUOTA\tACTIVE").ok();
    }

    for user in users {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}\t{}",
            user.id,
            user.name,
            user.email,
            user.role,
            user.gpu_quota,
            if user.is_active {
                style("yes").green()
            } else {
                style("no").red()
            }
        )
        .ok();
    }

    String::from_utf8(tw.into_inner().unwrap_or_default())
        .unwrap_or_default()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_quota_update_body() {
        let body = serde_json::to_value(QuotaUpdate {
            gpu_quota: 4,
            max_environments: Some(10),
            ..QuotaUpdate::default()
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"gpu_quota": 4, "max_environments": 10}));
    }
}

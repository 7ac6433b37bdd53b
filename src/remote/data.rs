use anyhow::{Context, Result};

use super::RemoteClient;
use super::http_client::fail_message;
use crate::model::{DataStatus, ProgressSnapshot, UpdateType};

/// Acknowledgement for an update request. `already_running` sits at the
/// top level of the payload, outside the usual envelope shape.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateAck {
    pub success: bool,

    #[serde(default)]
    pub already_running: bool,

    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteClient {
    pub fn data_status(&self) -> Result<DataStatus> {
        let resp = self.get("/api/data/status").send().context("data status")?;
        self.envelope_data(resp, "data status")
    }

    /// Kick off a server-side ingestion run.
    pub fn start_update(&self, update_type: UpdateType, overwrite_mode: bool) -> Result<UpdateAck> {
        let resp = self
            .post("/api/data/update")
            .json(&serde_json::json!({
                "update_type": update_type.as_str(),
                "overwrite_mode": overwrite_mode,
            }))
            .send()
            .context("start update")?;
        let ack: UpdateAck = self
            .ensure_ok(resp, "start update")?
            .json()
            .context("parse start update")?;
        if !ack.success {
            anyhow::bail!("start update: {}", fail_message(ack.message));
        }
        Ok(ack)
    }

    pub fn progress(&self) -> Result<ProgressSnapshot> {
        let resp = self.get("/api/data/progress").send().context("progress")?;
        self.envelope_data(resp, "progress")
    }
}

use anyhow::{Context, Result};

use super::RemoteClient;
use crate::model::{
    Announcement, AppConfig, ManagedUser, PermissionDef, Role, SystemConfigEntry,
};

impl RemoteClient {
    pub fn list_users(&self) -> Result<Vec<ManagedUser>> {
        let resp = self.get("/api/users").send().context("list users")?;
        self.envelope_data(resp, "list users")
    }

    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
        expires_at: Option<&str>,
    ) -> Result<()> {
        let resp = self
            .post("/api/users")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
                "role": role,
                "expires_at": expires_at,
            }))
            .send()
            .context("create user")?;
        self.envelope_ack(resp, "create user")
    }

    /// Partial update; only the provided fields change.
    pub fn update_user(&self, id: i64, changes: serde_json::Value) -> Result<()> {
        let resp = self
            .put(&format!("/api/users/{}", id))
            .json(&changes)
            .send()
            .context("update user")?;
        self.envelope_ack(resp, "update user")
    }

    pub fn delete_user(&self, id: i64) -> Result<()> {
        let resp = self
            .delete(&format!("/api/users/{}", id))
            .send()
            .context("delete user")?;
        self.envelope_ack(resp, "delete user")
    }

    pub fn user_permissions(&self, id: i64) -> Result<Vec<String>> {
        let resp = self
            .get(&format!("/api/users/{}/permissions", id))
            .send()
            .context("user permissions")?;
        self.envelope_data(resp, "user permissions")
    }

    pub fn set_user_permissions(&self, id: i64, codes: &[String]) -> Result<()> {
        let resp = self
            .put(&format!("/api/users/{}/permissions", id))
            .json(&serde_json::json!({ "permissions": codes }))
            .send()
            .context("set user permissions")?;
        self.envelope_ack(resp, "set user permissions")
    }

    /// Static catalog of grantable permissions; reference data, never
    /// mutated by the client.
    pub fn permission_catalog(&self) -> Result<Vec<PermissionDef>> {
        let resp = self.get("/api/permissions").send().context("permissions")?;
        self.envelope_data(resp, "permissions")
    }

    pub fn app_config(&self) -> Result<AppConfig> {
        let resp = self.get("/api/config").send().context("app config")?;
        self.envelope_data(resp, "app config")
    }

    pub fn save_app_config(&self, cfg: &AppConfig) -> Result<()> {
        let resp = self
            .post("/api/config")
            .json(cfg)
            .send()
            .context("save app config")?;
        self.envelope_ack(resp, "save app config")
    }

    pub fn system_config(&self) -> Result<Vec<SystemConfigEntry>> {
        let resp = self
            .get("/api/system/config")
            .send()
            .context("system config")?;
        self.envelope_data(resp, "system config")
    }

    pub fn save_system_config(&self, entries: &[SystemConfigEntry]) -> Result<()> {
        let resp = self
            .post("/api/system/config")
            .json(&serde_json::json!({ "entries": entries }))
            .send()
            .context("save system config")?;
        self.envelope_ack(resp, "save system config")
    }

    /// Active announcements for the home pane.
    pub fn announcements(&self) -> Result<Vec<Announcement>> {
        let resp = self
            .get("/api/announcements")
            .send()
            .context("announcements")?;
        self.envelope_data(resp, "announcements")
    }

    /// Every announcement including inactive ones, for the admin surface.
    pub fn announcements_all(&self) -> Result<Vec<Announcement>> {
        let resp = self
            .get("/api/announcements/all")
            .send()
            .context("all announcements")?;
        self.envelope_data(resp, "all announcements")
    }

    pub fn create_announcement(
        &self,
        title: &str,
        content: &str,
        is_active: bool,
        priority: i32,
    ) -> Result<()> {
        let resp = self
            .post("/api/announcements")
            .json(&serde_json::json!({
                "title": title,
                "content": content,
                "is_active": is_active,
                "priority": priority,
            }))
            .send()
            .context("create announcement")?;
        self.envelope_ack(resp, "create announcement")
    }

    pub fn update_announcement(&self, id: i64, changes: serde_json::Value) -> Result<()> {
        let resp = self
            .put(&format!("/api/announcements/{}", id))
            .json(&changes)
            .send()
            .context("update announcement")?;
        self.envelope_ack(resp, "update announcement")
    }

    pub fn delete_announcement(&self, id: i64) -> Result<()> {
        let resp = self
            .delete(&format!("/api/announcements/{}", id))
            .send()
            .context("delete announcement")?;
        self.envelope_ack(resp, "delete announcement")
    }
}

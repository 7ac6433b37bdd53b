use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::RemoteClient;

/// The backend wraps JSON responses in `{success, data?, message?}`.
#[derive(Debug, serde::Deserialize)]
pub(super) struct Envelope<T> {
    pub(super) success: bool,

    #[serde(default = "none")]
    pub(super) data: Option<T>,

    #[serde(default)]
    pub(super) message: Option<String>,
}

/// Auth endpoints report the identity under `user` instead of `data`.
#[derive(Debug, serde::Deserialize)]
pub(super) struct AuthEnvelope {
    pub(super) success: bool,

    #[serde(default)]
    pub(super) user: Option<crate::model::SessionUser>,

    #[serde(default)]
    pub(super) message: Option<String>,
}

fn none<T>() -> Option<T> {
    None
}

/// A request bounced with 401: the session cookie is missing or no longer
/// honored. Callers downcast to this to drop back to the login flow.
#[derive(Debug)]
pub struct NotLoggedIn;

impl std::fmt::Display for NotLoggedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "not logged in (run `tickerboard login <username> --password ...`)"
        )
    }
}

impl std::error::Error for NotLoggedIn {}

/// User-facing failure text for a `success:false` envelope: the server
/// message verbatim, a generic fallback when it is empty, and a fixed
/// permission message when it carries a permission-denied marker.
pub fn fail_message(message: Option<String>) -> String {
    match message {
        None => "request failed".to_string(),
        Some(m) if m.trim().is_empty() => "request failed".to_string(),
        Some(m) if m.contains("permission") || m.contains("权限") => {
            "you do not have the required permission".to_string()
        }
        Some(m) => m,
    }
}

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn get(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.with_session(self.client.get(self.url(path)))
    }

    pub(super) fn post(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.with_session(self.client.post(self.url(path)))
    }

    pub(super) fn put(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.with_session(self.client.put(self.url(path)))
    }

    pub(super) fn delete(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.with_session(self.client.delete(self.url(path)))
    }

    fn with_session(
        &self,
        rb: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.cookie {
            Some(cookie) => rb.header(reqwest::header::COOKIE, cookie),
            None => rb,
        }
    }

    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!(NotLoggedIn);
        }
        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            anyhow::bail!("forbidden (insufficient permissions for this operation)");
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    /// Unwrap an envelope that must carry `data`.
    pub(super) fn envelope_data<T: DeserializeOwned>(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<T> {
        let env: Envelope<T> = self
            .ensure_ok(resp, label)?
            .json()
            .with_context(|| format!("parse {}", label))?;
        if !env.success {
            anyhow::bail!("{}: {}", label, fail_message(env.message));
        }
        env.data
            .with_context(|| format!("{}: empty data in response", label))
    }

    /// Unwrap an envelope where only the ack matters.
    pub(super) fn envelope_ack(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<()> {
        let env: Envelope<serde_json::Value> = self
            .ensure_ok(resp, label)?
            .json()
            .with_context(|| format!("parse {}", label))?;
        if !env.success {
            anyhow::bail!("{}: {}", label, fail_message(env.message));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;

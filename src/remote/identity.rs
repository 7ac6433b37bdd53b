use anyhow::{Context, Result};

use super::RemoteClient;
use super::http_client::{AuthEnvelope, fail_message};
use crate::model::SessionUser;

impl RemoteClient {
    /// Resolve the current session, if any. A missing or rejected session
    /// is `Ok(None)`, not an error; transport failures still propagate.
    pub fn current_user(&self) -> Result<Option<SessionUser>> {
        let resp = self
            .get("/api/auth/current-user")
            .send()
            .context("current user")?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let env: AuthEnvelope = self
            .ensure_ok(resp, "current user")?
            .json()
            .context("parse current user")?;
        if env.success {
            Ok(env.user)
        } else {
            Ok(None)
        }
    }

    /// Start a session. On success returns the user plus the session
    /// cookie value from the response, ready to persist.
    pub fn login(&self, username: &str, password: &str) -> Result<(SessionUser, Option<String>)> {
        let resp = self
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .context("login")?;

        let cookie = session_cookie_from(&resp);

        let env: AuthEnvelope = resp.json().context("parse login response")?;
        if !env.success {
            anyhow::bail!("login failed: {}", fail_message(env.message));
        }
        let user = env.user.context("login: no user in response")?;
        Ok((user, cookie))
    }

    pub fn logout(&self) -> Result<()> {
        let resp = self.post("/api/auth/logout").send().context("logout")?;
        self.envelope_ack(resp, "logout")
    }

    pub fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let resp = self
            .post("/api/auth/change-password")
            .json(&serde_json::json!({
                "old_password": old_password,
                "new_password": new_password,
            }))
            .send()
            .context("change password")?;
        self.envelope_ack(resp, "change password")
    }
}

fn session_cookie_from(resp: &reqwest::blocking::Response) -> Option<String> {
    let raw = resp
        .headers()
        .get(reqwest::header::SET_COOKIE)?
        .to_str()
        .ok()?;
    // Keep only the name=value pair; attributes are for the browser.
    let pair = raw.split(';').next()?.trim();
    (!pair.is_empty()).then(|| pair.to_string())
}

/// Client-side password policy, checked before any request is sent:
/// at least 8 characters, with both a letter and a digit.
pub fn validate_password_strength(password: &str) -> std::result::Result<(), &'static str> {
    if password.is_empty() {
        return Err("password must not be empty");
    }
    if password.chars().count() < 8 {
        return Err("password must be at least 8 characters");
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err("password must contain both letters and digits");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/remote/identity_tests.rs"]
mod tests;

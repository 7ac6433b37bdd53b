//! The single current-user slot. Exactly one session is live at a time;
//! login, restore, and logout each run to completion before another
//! session-mutating flow starts.

use anyhow::{Context, Result, bail};

use crate::model::SessionUser;
use crate::remote::RemoteClient;
use crate::store::LocalStore;

/// Why the slot is empty after a restore attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    SignedIn,
    SignedOut,
    /// The account itself has lapsed; the caller should surface the
    /// message and show the login screen.
    Expired(String),
}

#[derive(Default)]
pub struct SessionStore {
    current: Option<SessionUser>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Try to pick up an existing server session (page-load equivalent).
    /// Failure to restore is a normal outcome, not an error.
    pub fn restore(&mut self, client: &RemoteClient) -> Result<RestoreOutcome> {
        self.current = None;
        let Some(user) = client.current_user().context("restore session")? else {
            return Ok(RestoreOutcome::SignedOut);
        };
        if user.expired {
            let msg = user
                .expired_message
                .unwrap_or_else(|| "account has expired; contact an administrator".to_string());
            return Ok(RestoreOutcome::Expired(msg));
        }
        self.current = Some(user);
        Ok(RestoreOutcome::SignedIn)
    }

    /// Authenticate and persist the session cookie. Field validation runs
    /// before any request goes out.
    pub fn login(
        &mut self,
        client: &mut RemoteClient,
        store: &LocalStore,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            bail!("username and password are required");
        }
        let (user, cookie) = client.login(username.trim(), password)?;
        if user.expired {
            let msg = user
                .expired_message
                .unwrap_or_else(|| "account has expired; contact an administrator".to_string());
            bail!("{msg}");
        }
        if let Some(cookie) = &cookie {
            store
                .set_session_cookie(Some(cookie.clone()))
                .context("persist session")?;
        }
        client.set_cookie(cookie);
        self.current = Some(user);
        Ok(())
    }

    /// End the session. The slot and stored cookie are cleared even when
    /// the logout request itself fails.
    pub fn logout(&mut self, client: &mut RemoteClient, store: &LocalStore) -> Result<()> {
        let res = client.logout();
        self.current = None;
        client.set_cookie(None);
        store.set_session_cookie(None).context("clear session")?;
        res
    }

    /// Drop the slot without a server round-trip (detected expiry).
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

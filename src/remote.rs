use anyhow::{Context, Result};

mod http_client;
pub use self::http_client::{NotLoggedIn, fail_message};

mod admin;
mod analysis;
mod data;
mod export;
mod identity;
mod stocks;

pub use self::data::UpdateAck;
pub use self::export::ExportKind;
pub use self::identity::validate_password_strength;

/// Blocking client for the stats backend. Session credentials are a cookie
/// captured at login and replayed as a header on every request.
pub struct RemoteClient {
    base_url: String,
    cookie: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: String, cookie: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("tickerboard")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url,
            cookie,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_cookie(&mut self, cookie: Option<String>) {
        self.cookie = cookie;
    }
}

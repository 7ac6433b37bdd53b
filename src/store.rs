use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, ClientState};

const STORE_DIR: &str = ".tickerboard";

/// On-disk client settings: `config.json` holds the backend URL,
/// `state.json` holds the session cookie. Both are written atomically.
#[derive(Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn store_dir(home: &Path) -> PathBuf {
        home.join(STORE_DIR)
    }

    /// Open the store under the given home directory, creating it with
    /// default contents on first use.
    pub fn open(home: &Path) -> Result<Self> {
        let root = Self::store_dir(home);
        if !root.is_dir() {
            fs::create_dir_all(&root)
                .with_context(|| format!("create {}", root.display()))?;
        }
        let store = Self { root };
        if !store.root.join("config.json").exists() {
            store.write_config(&ClientConfig {
                version: 1,
                base_url: None,
            })?;
        }
        Ok(store)
    }

    pub fn open_default() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("HOME is not set"))?;
        Self::open(&home)
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ClientState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ClientState {
                version: 1,
                session_cookie: None,
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(st)
    }

    pub fn write_state(&self, st: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn set_session_cookie(&self, cookie: Option<String>) -> Result<()> {
        let mut st = self.read_state()?;
        st.session_cookie = cookie;
        self.write_state(&st)
    }

    pub fn session_cookie(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.session_cookie)
    }

    pub fn base_url(&self) -> Result<String> {
        self.read_config()?.base_url.context(
            "no backend configured (run `tickerboard remote set --url http://...`)",
        )
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

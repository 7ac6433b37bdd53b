use anyhow::{Context, Result};

use tickerboard::model::ClientConfig;
use tickerboard::store::LocalStore;

#[test]
fn first_open_seeds_config() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = LocalStore::open(tmp.path())?;

    let cfg = store.read_config()?;
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.base_url, None);
    assert!(LocalStore::store_dir(tmp.path()).join("config.json").is_file());
    Ok(())
}

#[test]
fn base_url_unconfigured_names_the_fix() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = LocalStore::open(tmp.path())?;

    let err = store.base_url().unwrap_err();
    assert!(format!("{err:#}").contains("tickerboard remote set"));
    Ok(())
}

#[test]
fn config_survives_reopen() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    {
        let store = LocalStore::open(tmp.path())?;
        store.write_config(&ClientConfig {
            version: 1,
            base_url: Some("http://localhost:8000".to_string()),
        })?;
    }

    let store = LocalStore::open(tmp.path())?;
    assert_eq!(store.base_url()?, "http://localhost:8000");
    Ok(())
}

#[test]
fn session_cookie_roundtrip_and_clear() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = LocalStore::open(tmp.path())?;

    assert_eq!(store.session_cookie()?, None);

    store.set_session_cookie(Some("session=abc123".to_string()))?;
    assert_eq!(store.session_cookie()?, Some("session=abc123".to_string()));

    // Reopen picks up the persisted cookie.
    let reopened = LocalStore::open(tmp.path())?;
    assert_eq!(reopened.session_cookie()?, Some("session=abc123".to_string()));

    reopened.set_session_cookie(None)?;
    assert_eq!(store.session_cookie()?, None);
    Ok(())
}

#[test]
fn cookie_update_keeps_config_intact() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = LocalStore::open(tmp.path())?;
    store.write_config(&ClientConfig {
        version: 1,
        base_url: Some("http://example:9000".to_string()),
    })?;

    store.set_session_cookie(Some("session=zzz".to_string()))?;

    assert_eq!(store.base_url()?, "http://example:9000");
    assert_eq!(store.session_cookie()?, Some("session=zzz".to_string()));
    Ok(())
}

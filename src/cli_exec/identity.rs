use anyhow::{Result, bail};

use tickerboard::model::Role;
use tickerboard::remote::{RemoteClient, validate_password_strength};
use tickerboard::session::SessionStore;
use tickerboard::store::LocalStore;

pub(super) fn login(
    store: &LocalStore,
    url: Option<String>,
    username: &str,
    password: &str,
) -> Result<()> {
    let mut client = super::client(store, url)?;
    let mut session = SessionStore::new();
    session.login(&mut client, store, username, password)?;
    println!("Signed in as {username}");
    Ok(())
}

pub(super) fn logout(store: &LocalStore, url: Option<String>) -> Result<()> {
    let mut client = super::client(store, url)?;
    let mut session = SessionStore::new();
    session.logout(&mut client, store)?;
    println!("Signed out");
    Ok(())
}

pub(super) fn whoami(client: &RemoteClient, json: bool) -> Result<()> {
    let Some(user) = client.current_user()? else {
        println!("Not signed in");
        return Ok(());
    };
    if json {
        super::print_json(&user)?;
        return Ok(());
    }
    let role = match user.role {
        Role::Admin => "admin",
        Role::User => "user",
    };
    println!("username: {}", user.username);
    println!("role: {role}");
    if user.role == Role::User {
        if user.permissions.is_empty() {
            println!("permissions: none");
        } else {
            println!("permissions: {}", user.permissions.join(", "));
        }
    }
    if user.expired {
        println!(
            "note: {}",
            user.expired_message
                .as_deref()
                .unwrap_or("account has expired")
        );
    }
    Ok(())
}

pub(super) fn change_password(client: &RemoteClient, current: &str, new: &str) -> Result<()> {
    if let Err(reason) = validate_password_strength(new) {
        bail!("{reason}");
    }
    client.change_password(current, new)?;
    println!("Password changed");
    Ok(())
}

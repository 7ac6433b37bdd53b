use anyhow::{Result, bail};

use tickerboard::model::{Role, SystemConfigEntry};
use tickerboard::remote::{RemoteClient, validate_password_strength};

use crate::cli_subcommands::{AdminCommands, AnnounceCommands, ConfigCommands, UserCommands};

pub(super) fn handle(client: &RemoteClient, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Users { command } => users(client, command),
        AdminCommands::Announce { command } => announce(client, command),
        AdminCommands::Config { command } => config(client, command),
    }
}

fn parse_role(s: &str) -> Result<Role> {
    match s {
        "admin" => Ok(Role::Admin),
        "user" => Ok(Role::User),
        _ => bail!("role must be admin or user"),
    }
}

fn users(client: &RemoteClient, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List { json } => {
            let users = client.list_users()?;
            if json {
                return super::print_json(&users);
            }
            for u in &users {
                let role = match u.role {
                    Role::Admin => "admin",
                    Role::User => "user",
                };
                println!(
                    "{:>4} {:<16} {:<6} expires={}",
                    u.id,
                    u.username,
                    role,
                    u.expires_at.as_deref().unwrap_or("-")
                );
            }
        }
        UserCommands::Create {
            username,
            password,
            role,
            expires,
        } => {
            if let Err(reason) = validate_password_strength(&password) {
                bail!("{reason}");
            }
            let role = parse_role(&role)?;
            client.create_user(&username, &password, role, expires.as_deref())?;
            println!("Created {username}");
        }
        UserCommands::Update {
            id,
            password,
            role,
            expires,
        } => {
            let mut changes = serde_json::Map::new();
            if let Some(password) = password {
                if let Err(reason) = validate_password_strength(&password) {
                    bail!("{reason}");
                }
                changes.insert("password".to_string(), password.into());
            }
            if let Some(role) = role {
                let role = parse_role(&role)?;
                changes.insert("role".to_string(), serde_json::to_value(role)?);
            }
            if let Some(expires) = expires {
                changes.insert("expires_at".to_string(), expires.into());
            }
            if changes.is_empty() {
                bail!("nothing to change");
            }
            client.update_user(id, serde_json::Value::Object(changes))?;
            println!("Updated user {id}");
        }
        UserCommands::Delete { id } => {
            client.delete_user(id)?;
            println!("Deleted user {id}");
        }
        UserCommands::Perms { id, json } => {
            let codes = client.user_permissions(id)?;
            if json {
                return super::print_json(&codes);
            }
            if codes.is_empty() {
                println!("No permissions granted");
            } else {
                for code in &codes {
                    println!("{code}");
                }
            }
        }
        UserCommands::SetPerms { id, codes } => {
            client.set_user_permissions(id, &codes)?;
            println!("Updated permissions for user {id}");
        }
        UserCommands::Catalog { json } => {
            let defs = client.permission_catalog()?;
            if json {
                return super::print_json(&defs);
            }
            for d in &defs {
                println!("{:<24} {:<20} {}", d.code, d.name, d.description);
            }
        }
    }
    Ok(())
}

fn announce(client: &RemoteClient, command: AnnounceCommands) -> Result<()> {
    match command {
        AnnounceCommands::List { all, json } => {
            let items = if all {
                client.announcements_all()?
            } else {
                client.announcements()?
            };
            if json {
                return super::print_json(&items);
            }
            for a in &items {
                let state = if a.is_active { "active" } else { "off" };
                println!("[{:>3}] {:<6} p={} {}", a.id, state, a.priority, a.title);
            }
        }
        AnnounceCommands::Create {
            title,
            content,
            priority,
            inactive,
        } => {
            client.create_announcement(&title, &content, !inactive, priority)?;
            println!("Created announcement");
        }
        AnnounceCommands::Update {
            id,
            title,
            content,
            priority,
            active,
        } => {
            let mut changes = serde_json::Map::new();
            if let Some(title) = title {
                changes.insert("title".to_string(), title.into());
            }
            if let Some(content) = content {
                changes.insert("content".to_string(), content.into());
            }
            if let Some(priority) = priority {
                changes.insert("priority".to_string(), priority.into());
            }
            if let Some(active) = active {
                changes.insert("is_active".to_string(), active.into());
            }
            if changes.is_empty() {
                bail!("nothing to change");
            }
            client.update_announcement(id, serde_json::Value::Object(changes))?;
            println!("Updated announcement {id}");
        }
        AnnounceCommands::Delete { id } => {
            client.delete_announcement(id)?;
            println!("Deleted announcement {id}");
        }
    }
    Ok(())
}

fn config(client: &RemoteClient, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let cfg = client.app_config()?;
            if json {
                return super::print_json(&cfg);
            }
            println!(
                "default data source: {}",
                cfg.default_data_source.as_deref().unwrap_or("-")
            );
            println!(
                "data sources: {}",
                if cfg.data_sources.is_empty() {
                    "-".to_string()
                } else {
                    cfg.data_sources.join(", ")
                }
            );
        }
        ConfigCommands::Set {
            default_source,
            sources,
        } => {
            let mut cfg = client.app_config()?;
            if default_source.is_none() && sources.is_none() {
                bail!("nothing to change");
            }
            if let Some(default_source) = default_source {
                cfg.default_data_source = Some(default_source);
            }
            if let Some(sources) = sources {
                cfg.data_sources = sources;
            }
            client.save_app_config(&cfg)?;
            println!("Configuration saved");
        }
        ConfigCommands::System { json } => {
            let entries = client.system_config()?;
            if json {
                return super::print_json(&entries);
            }
            for e in &entries {
                println!("{:<24} {:<16} {}", e.key, e.value, e.description);
            }
        }
        ConfigCommands::SystemSet { key, value } => {
            let mut entries = client.system_config()?;
            match entries.iter_mut().find(|e| e.key == key) {
                Some(entry) => entry.value = value,
                None => entries.push(SystemConfigEntry {
                    key,
                    value,
                    description: String::new(),
                }),
            }
            client.save_system_config(&entries)?;
            println!("Configuration saved");
        }
    }
    Ok(())
}

use anyhow::{Context, Result};

use tickerboard::remote::RemoteClient;
use tickerboard::store::LocalStore;

use crate::Commands;
use crate::cli_subcommands::RemoteCommands;

mod admin;
mod data;
mod identity;
mod queries;

pub(crate) fn handle_command(command: Commands, url: Option<String>) -> Result<()> {
    let store = LocalStore::open_default()?;

    match command {
        Commands::Remote { command } => remote_config(&store, command),

        Commands::Login { username, password } => {
            identity::login(&store, url, &username, &password)
        }
        Commands::Logout => identity::logout(&store, url),
        Commands::Whoami { json } => identity::whoami(&client(&store, url)?, json),
        Commands::ChangePassword { current, new } => {
            identity::change_password(&client(&store, url)?, &current, &new)
        }

        Commands::Status { json } => queries::status(&client(&store, url)?, json),
        Commands::Update {
            full,
            overwrite,
            watch,
        } => data::update(&client(&store, url)?, full, overwrite, watch),
        Commands::Progress { json } => data::progress(&client(&store, url)?, json),

        Commands::Search {
            keyword,
            limit,
            json,
        } => queries::search(&client(&store, url)?, &keyword, limit, json),
        Commands::Stock {
            symbol,
            months,
            start_year,
            end_year,
            source,
            json,
        } => queries::stock(
            &client(&store, url)?,
            &symbol,
            &months,
            start_year,
            end_year,
            source.as_deref(),
            json,
        ),
        Commands::MonthFilter {
            month,
            min_years,
            source,
            json,
        } => queries::month_filter(&client(&store, url)?, month, min_years, source.as_deref(), json),
        Commands::Industries { json } => queries::industries(&client(&store, url)?, json),
        Commands::Industry {
            month,
            industry_type,
            source,
            json,
        } => queries::industry(
            &client(&store, url)?,
            month,
            industry_type.as_deref(),
            source.as_deref(),
            json,
        ),
        Commands::TopStocks {
            industry,
            month,
            source,
            json,
        } => queries::top_stocks(&client(&store, url)?, &industry, month, source.as_deref(), json),
        Commands::Compare { symbol, year, json } => {
            queries::compare(&client(&store, url)?, &symbol, year, json)
        }
        Commands::Export { command } => queries::export(&client(&store, url)?, command),

        Commands::Admin { command } => admin::handle(&client(&store, url)?, command),
    }
}

fn client(store: &LocalStore, url: Option<String>) -> Result<RemoteClient> {
    let base_url = match url {
        Some(url) => url,
        None => store.base_url()?,
    };
    let cookie = store.session_cookie().context("read session")?;
    RemoteClient::new(base_url, cookie)
}

fn remote_config(store: &LocalStore, command: RemoteCommands) -> Result<()> {
    match command {
        RemoteCommands::Show { json } => {
            let cfg = store.read_config()?;
            if json {
                print_json(&cfg)?;
            } else if let Some(url) = cfg.base_url {
                println!("url: {url}");
            } else {
                println!("No backend configured");
            }
        }
        RemoteCommands::Set { url } => {
            let mut cfg = store.read_config()?;
            cfg.base_url = Some(url);
            store.write_config(&cfg)?;
            println!("Backend configured");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize json")?
    );
    Ok(())
}

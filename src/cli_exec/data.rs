use std::time::Duration;

use anyhow::Result;

use tickerboard::model::UpdateType;
use tickerboard::remote::RemoteClient;

pub(super) fn update(client: &RemoteClient, full: bool, overwrite: bool, watch: bool) -> Result<()> {
    let update_type = if full || overwrite {
        UpdateType::Full
    } else {
        UpdateType::Incremental
    };
    let ack = client.start_update(update_type, overwrite)?;
    if ack.already_running {
        println!("An update is already running");
    } else {
        println!("{} update started", update_type.as_str());
    }
    if watch {
        watch_progress(client)?;
    }
    Ok(())
}

pub(super) fn progress(client: &RemoteClient, json: bool) -> Result<()> {
    let snap = client.progress()?;
    if json {
        return super::print_json(&snap);
    }
    if snap.is_running {
        println!(
            "{} {}/{} ({:.0}%)",
            snap.message,
            snap.current,
            snap.total,
            snap.percent()
        );
    } else {
        println!("No update running");
    }
    Ok(())
}

fn watch_progress(client: &RemoteClient) -> Result<()> {
    loop {
        let snap = client.progress()?;
        if !snap.is_running {
            println!("Update finished");
            return Ok(());
        }
        println!(
            "{} {}/{} ({:.0}%)",
            snap.message,
            snap.current,
            snap.total,
            snap.percent()
        );
        std::thread::sleep(Duration::from_millis(1000));
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use tickerboard::model::StockStatistics;
use tickerboard::remote::{ExportKind, RemoteClient};

use crate::cli_subcommands::ExportCommands;

pub(super) fn status(client: &RemoteClient, json: bool) -> Result<()> {
    let status = client.data_status()?;
    if json {
        return super::print_json(&status);
    }
    println!("total stocks: {}", status.total_stocks);
    println!("total data rows: {}", status.total_data_count);
    println!(
        "latest date: {}",
        status.latest_date.as_deref().unwrap_or("-")
    );
    for s in &status.data_sources {
        println!(
            "{:<12} rows={} stocks={} latest={}",
            s.data_source,
            s.data_count,
            s.stock_count,
            s.latest_date.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub(super) fn search(client: &RemoteClient, keyword: &str, limit: usize, json: bool) -> Result<()> {
    let hits = client.search_stocks(keyword, limit)?;
    if json {
        return super::print_json(&hits);
    }
    if hits.is_empty() {
        println!("No matches");
        return Ok(());
    }
    for hit in &hits {
        println!("{:<10} {:<16} {}", hit.symbol, hit.name, hit.exchange);
    }
    Ok(())
}

fn check_months(months: &[u8]) -> Result<()> {
    if months.is_empty() {
        bail!("at least one month is required");
    }
    if let Some(bad) = months.iter().find(|m| !(1..=12).contains(*m)) {
        bail!("month {bad} is out of range (1-12)");
    }
    Ok(())
}

pub(super) fn stock(
    client: &RemoteClient,
    symbol: &str,
    months: &[u8],
    start_year: i32,
    end_year: i32,
    source: Option<&str>,
    json: bool,
) -> Result<()> {
    check_months(months)?;
    let stats = if months.len() == 1 {
        client.stock_statistics(symbol, months[0], start_year, end_year, source)?
    } else {
        client.multi_month_statistics(symbol, months, start_year, end_year, source)?
    };
    if json {
        return super::print_json(&stats);
    }
    print_statistics(&stats);
    Ok(())
}

fn print_statistics(stats: &StockStatistics) {
    println!("{} {}", stats.symbol, stats.name);
    if stats.rows.is_empty() {
        println!("No data for the selected range");
        return;
    }
    println!(
        "{:>4} {:>5} {:>4} {:>5} {:>5} {:>8} {:>8}",
        "year", "month", "up", "down", "flat", "up%", "avg chg"
    );
    for r in &stats.rows {
        println!(
            "{:>4} {:>5} {:>4} {:>5} {:>5} {:>7.1}% {:>7.2}%",
            r.year, r.month, r.up_days, r.down_days, r.flat_days, r.up_ratio, r.avg_change
        );
    }
}

pub(super) fn month_filter(
    client: &RemoteClient,
    month: u8,
    min_years: u32,
    source: Option<&str>,
    json: bool,
) -> Result<()> {
    let rows = client.month_filter(month, min_years, source)?;
    if json {
        return super::print_json(&rows);
    }
    if rows.is_empty() {
        println!("No stocks matched the filter");
        return Ok(());
    }
    for r in &rows {
        println!(
            "{:<10} {:<16} up {}/{} years ({:.1}%)",
            r.symbol, r.name, r.up_years, r.total_years, r.up_ratio
        );
    }
    Ok(())
}

pub(super) fn industries(client: &RemoteClient, json: bool) -> Result<()> {
    let names = client.industries()?;
    if json {
        return super::print_json(&names);
    }
    for name in &names {
        println!("{name}");
    }
    Ok(())
}

pub(super) fn industry(
    client: &RemoteClient,
    month: u8,
    industry_type: Option<&str>,
    source: Option<&str>,
    json: bool,
) -> Result<()> {
    let rows = client.industry_statistics(month, industry_type, source)?;
    if json {
        return super::print_json(&rows);
    }
    if rows.is_empty() {
        println!("No industry data");
        return Ok(());
    }
    for r in &rows {
        println!(
            "{:<20} stocks={:<5} up {:.1}% avg {:.2}%",
            r.industry, r.stock_count, r.avg_up_ratio, r.avg_change
        );
    }
    Ok(())
}

pub(super) fn top_stocks(
    client: &RemoteClient,
    industry: &str,
    month: u8,
    source: Option<&str>,
    json: bool,
) -> Result<()> {
    let rows = client.industry_top_stocks(industry, month, source)?;
    if json {
        return super::print_json(&rows);
    }
    if rows.is_empty() {
        println!("No stocks for industry {industry}");
        return Ok(());
    }
    for r in &rows {
        println!(
            "{:<10} {:<16} up {:.1}% avg {:.2}%",
            r.symbol, r.name, r.up_ratio, r.avg_change
        );
    }
    Ok(())
}

pub(super) fn compare(client: &RemoteClient, symbol: &str, year: i32, json: bool) -> Result<()> {
    let rows = client.compare_sources(symbol, year)?;
    if json {
        return super::print_json(&rows);
    }
    if rows.is_empty() {
        println!("No comparison data");
        return Ok(());
    }
    for r in &rows {
        println!(
            "{:<12} rows={:<10} up={:<5} down={:<5} avg {:.2}%{}",
            r.data_source,
            r.data_count,
            r.up_days,
            r.down_days,
            r.avg_change,
            if r.is_base { " (base)" } else { "" }
        );
    }
    Ok(())
}

pub(super) fn export(client: &RemoteClient, command: ExportCommands) -> Result<()> {
    let (kind, body, out) = match command {
        ExportCommands::Stock {
            symbol,
            months,
            start_year,
            end_year,
            source,
            out,
        } => {
            check_months(&months)?;
            if months.len() == 1 {
                (
                    ExportKind::StockStatistics,
                    serde_json::json!({
                        "code": symbol,
                        "month": months[0],
                        "start_year": start_year,
                        "end_year": end_year,
                        "data_source": source,
                    }),
                    out,
                )
            } else {
                (
                    ExportKind::MultiMonthStatistics,
                    serde_json::json!({
                        "code": symbol,
                        "months": months,
                        "start_year": start_year,
                        "end_year": end_year,
                        "data_source": source,
                    }),
                    out,
                )
            }
        }
        ExportCommands::MonthFilter {
            month,
            min_years,
            source,
            out,
        } => (
            ExportKind::MonthFilter,
            serde_json::json!({
                "month": month,
                "min_count": min_years,
                "data_source": source,
            }),
            out,
        ),
        ExportCommands::Industry {
            month,
            industry_type,
            source,
            out,
        } => (
            ExportKind::IndustryStatistics,
            serde_json::json!({
                "month": month,
                "industry_type": industry_type,
                "data_source": source,
            }),
            out,
        ),
        ExportCommands::TopStocks {
            industry,
            month,
            source,
            out,
        } => (
            ExportKind::IndustryTopStocks,
            serde_json::json!({
                "industry": industry,
                "month": month,
                "data_source": source,
            }),
            out,
        ),
        ExportCommands::Compare { symbol, year, out } => (
            ExportKind::CompareSources,
            serde_json::json!({ "code": symbol, "year": year }),
            out,
        ),
    };

    let (filename, bytes) = client.export(kind, body)?;
    let path = out.unwrap_or_else(|| PathBuf::from(filename));
    std::fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

//! Plain-text table builders for the result panes.

use crate::model::{
    Announcement, DataStatus, FilteredStock, IndustryStatRow, ManagedUser, Role,
    SourceCompareRow, StockStatistics, TopStockRow,
};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Rfc3339 timestamps shortened for list display; anything unparseable is
/// shown as-is.
pub(super) fn fmt_ts(ts: &str) -> String {
    match OffsetDateTime::parse(ts, &Rfc3339) {
        Ok(t) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            t.year(),
            u8::from(t.month()),
            t.day(),
            t.hour(),
            t.minute()
        ),
        Err(_) => ts.to_string(),
    }
}

pub(super) fn data_status_lines(status: &DataStatus) -> Vec<String> {
    let mut lines = vec![
        format!("total stocks:     {}", status.total_stocks),
        format!("total data rows:  {}", status.total_data_count),
        format!(
            "latest date:      {}",
            status.latest_date.as_deref().unwrap_or("-")
        ),
    ];
    if !status.data_sources.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{:<12} {:>12} {:>8} {:>12}",
            "source", "rows", "stocks", "latest"
        ));
        for s in &status.data_sources {
            lines.push(format!(
                "{:<12} {:>12} {:>8} {:>12}",
                s.data_source,
                s.data_count,
                s.stock_count,
                s.latest_date.as_deref().unwrap_or("-")
            ));
        }
    }
    lines
}

pub(super) fn stock_statistics_lines(stats: &StockStatistics) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", stats.symbol, stats.name),
        format!(
            "{:>4} {:>5} {:>4} {:>5} {:>5} {:>8} {:>8}",
            "year", "month", "up", "down", "flat", "up%", "avg chg"
        ),
    ];
    for r in &stats.rows {
        lines.push(format!(
            "{:>4} {:>5} {:>4} {:>5} {:>5} {:>7.1}% {:>7.2}%",
            r.year, r.month, r.up_days, r.down_days, r.flat_days, r.up_ratio, r.avg_change
        ));
    }
    if stats.rows.is_empty() {
        lines.push("no data for the selected range".to_string());
    }
    lines
}

pub(super) fn month_filter_lines(rows: &[FilteredStock]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["no stocks matched the filter".to_string()];
    }
    let mut lines = vec![format!(
        "{:<10} {:<16} {:>8} {:>8} {:>8}",
        "symbol", "name", "up yrs", "years", "up%"
    )];
    for r in rows {
        lines.push(format!(
            "{:<10} {:<16} {:>8} {:>8} {:>7.1}%",
            r.symbol, r.name, r.up_years, r.total_years, r.up_ratio
        ));
    }
    lines
}

pub(super) fn industry_lines(rows: &[IndustryStatRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["no industry data".to_string()];
    }
    let mut lines = vec![format!(
        "{:<20} {:>8} {:>8} {:>8}",
        "industry", "stocks", "up%", "avg chg"
    )];
    for r in rows {
        lines.push(format!(
            "{:<20} {:>8} {:>7.1}% {:>7.2}%",
            r.industry, r.stock_count, r.avg_up_ratio, r.avg_change
        ));
    }
    lines
}

pub(super) fn top_stocks_lines(industry: &str, rows: &[TopStockRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec![format!("no stocks for industry {industry}")];
    }
    let mut lines = vec![
        format!("top stocks in {industry}"),
        format!("{:<10} {:<16} {:>8} {:>8}", "symbol", "name", "up%", "avg chg"),
    ];
    for r in rows {
        lines.push(format!(
            "{:<10} {:<16} {:>7.1}% {:>7.2}%",
            r.symbol, r.name, r.up_ratio, r.avg_change
        ));
    }
    lines
}

pub(super) fn compare_lines(rows: &[SourceCompareRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["no comparison data".to_string()];
    }
    let mut lines = vec![format!(
        "{:<12} {:>10} {:>6} {:>6} {:>8}  {}",
        "source", "rows", "up", "down", "avg chg", ""
    )];
    for r in rows {
        lines.push(format!(
            "{:<12} {:>10} {:>6} {:>6} {:>7.2}%  {}",
            r.data_source,
            r.data_count,
            r.up_days,
            r.down_days,
            r.avg_change,
            if r.is_base { "(base)" } else { "" }
        ));
    }
    lines
}

pub(super) fn announcement_lines(items: &[Announcement], with_state: bool) -> Vec<String> {
    if items.is_empty() {
        return vec!["no announcements".to_string()];
    }
    let mut lines = Vec::new();
    for a in items {
        let when = a
            .created_at
            .as_deref()
            .map(fmt_ts)
            .unwrap_or_else(|| "-".to_string());
        if with_state {
            let state = if a.is_active { "active" } else { "off" };
            lines.push(format!("[{:>3}] {:<6} {}  {}", a.id, state, when, a.title));
        } else {
            lines.push(format!("{}  {}", when, a.title));
        }
        for body_line in a.content.lines() {
            lines.push(format!("      {}", body_line));
        }
    }
    lines
}

pub(super) fn user_lines(users: &[ManagedUser]) -> Vec<String> {
    if users.is_empty() {
        return vec!["no users".to_string()];
    }
    let mut lines = vec![format!(
        "{:>4} {:<16} {:<6} {:<12} {}",
        "id", "username", "role", "expires", "permissions"
    )];
    for u in users {
        let role = match u.role {
            Role::Admin => "admin",
            Role::User => "user",
        };
        let perms = if u.role == Role::Admin {
            "(all)".to_string()
        } else if u.permissions.is_empty() {
            "-".to_string()
        } else {
            u.permissions.join(",")
        };
        lines.push(format!(
            "{:>4} {:<16} {:<6} {:<12} {}",
            u.id,
            u.username,
            role,
            u.expires_at.as_deref().unwrap_or("-"),
            perms
        ));
    }
    lines
}

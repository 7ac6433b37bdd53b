//! Everything the key handlers trigger: session flows, per-tab queries,
//! exports, and the data-update commands.

use std::time::Instant;

use anyhow::{Result, bail};

use crate::access;
use crate::model::{Role, Tab, UpdateType};
use crate::remote::{ExportKind, NotLoggedIn, validate_password_strength};
use crate::session::RestoreOutcome;

use super::super::panes;
use super::{App, ClientProgress, Modal, Screen};

impl App {
    /// Page-load equivalent: pick up a persisted session if the server
    /// still honors it, otherwise stay on the login screen.
    pub(super) fn startup(&mut self, now: Instant) {
        match self.session.restore(&self.client) {
            Ok(RestoreOutcome::SignedIn) => self.enter_main(now),
            Ok(RestoreOutcome::SignedOut) => {}
            Ok(RestoreOutcome::Expired(msg)) => self.login_note = Some(msg),
            Err(err) => self.login_note = Some(format!("{err:#}")),
        }
    }

    fn enter_main(&mut self, now: Instant) {
        let Some(user) = self.session.current() else {
            return;
        };
        let tabs = access::visible_tabs(user);
        let default = access::resolve_default_tab(user, &tabs);
        let can_manage = access::data_management_allowed(user);
        self.active = default
            .and_then(|tab| tabs.iter().position(|t| *t == tab))
            .unwrap_or(0);
        self.tabs = tabs;
        self.screen = Screen::Main;
        self.scroll = 0;
        self.status_line = None;

        // A job left running by an earlier session gets tracked again.
        if can_manage {
            let mut src = ClientProgress(&self.client);
            self.poller.resume(now, &mut src);
        }

        self.refresh_home();
        self.refresh_active();
    }

    pub(super) fn submit_login(&mut self, now: Instant) {
        let username = self.login_form.value(0).to_string();
        let password = self.login_form.fields[1].value.clone();
        match self
            .session
            .login(&mut self.client, &self.store, &username, &password)
        {
            Ok(()) => {
                self.login_form.clear_values();
                self.login_note = None;
                self.enter_main(now);
            }
            Err(err) => self.login_note = Some(format!("{err:#}")),
        }
    }

    pub(super) fn logout(&mut self) {
        let res = self.session.logout(&mut self.client, &self.store);
        let note = res.err().map(|err| format!("{err:#}"));
        self.sign_out_to_login(note);
    }

    fn sign_out_to_login(&mut self, note: Option<String>) {
        self.session.invalidate();
        self.screen = Screen::Login;
        self.login_note = note;
        self.login_form.clear_values();
        self.account_form.clear_values();
        self.panes.clear();
        self.tabs.clear();
        self.active = 0;
        self.scroll = 0;
        self.poller.cancel();
        self.modal = None;
        self.status_line = None;
    }

    /// A request bounced for lack of a session means the cookie went stale
    /// under us; fall back to the login screen instead of surfacing the
    /// raw error.
    fn check_expiry(&mut self, err: &anyhow::Error) -> bool {
        if err.downcast_ref::<NotLoggedIn>().is_some() {
            self.sign_out_to_login(Some("session ended, sign in again".to_string()));
            true
        } else {
            false
        }
    }

    fn set_pane(&mut self, tab: Tab, lines: Vec<String>) {
        self.scroll = 0;
        self.panes.insert(tab, lines);
    }

    fn report_query_error(&mut self, tab: Tab, err: anyhow::Error) {
        if self.check_expiry(&err) {
            return;
        }
        self.set_pane(tab, vec![format!("error: {err:#}")]);
    }

    fn alert(&mut self, text: impl Into<String>) {
        self.modal = Some(Modal::Alert(text.into()));
    }

    pub(super) fn refresh_active(&mut self) {
        let Some(tab) = self.current_tab() else {
            return;
        };
        match tab {
            Tab::Home => self.refresh_home(),
            Tab::Config => self.refresh_config(),
            Tab::UserManagement => self.refresh_users(),
            Tab::Account => self.refresh_account(),
            Tab::StockAnalysis | Tab::MonthFilter | Tab::IndustryAnalysis | Tab::SourceCompare => {
                self.panes.entry(tab).or_insert_with(|| {
                    vec!["fill in the fields and press Enter to run".to_string()]
                });
            }
        }
    }

    pub(super) fn refresh_home(&mut self) {
        let mut lines = match self.client.data_status() {
            Ok(status) => panes::data_status_lines(&status),
            Err(err) => {
                self.report_query_error(Tab::Home, err);
                return;
            }
        };
        // Announcements are decoration on the status view; a failed fetch
        // does not take the view down.
        if let Ok(items) = self.client.announcements()
            && !items.is_empty()
        {
            lines.push(String::new());
            lines.push("announcements".to_string());
            lines.extend(panes::announcement_lines(&items, false));
        }
        self.set_pane(Tab::Home, lines);
    }

    fn refresh_config(&mut self) {
        let mut lines = Vec::new();
        match self.client.app_config() {
            Ok(cfg) => {
                lines.push(format!(
                    "default data source: {}",
                    cfg.default_data_source.as_deref().unwrap_or("-")
                ));
                lines.push(format!(
                    "data sources:        {}",
                    if cfg.data_sources.is_empty() {
                        "-".to_string()
                    } else {
                        cfg.data_sources.join(", ")
                    }
                ));
            }
            Err(err) => {
                self.report_query_error(Tab::Config, err);
                return;
            }
        }
        match self.client.system_config() {
            Ok(entries) => {
                lines.push(String::new());
                lines.push(format!("{:<24} {:<16} {}", "key", "value", "description"));
                for e in &entries {
                    lines.push(format!("{:<24} {:<16} {}", e.key, e.value, e.description));
                }
            }
            Err(err) => {
                self.report_query_error(Tab::Config, err);
                return;
            }
        }
        match self.client.announcements_all() {
            Ok(items) => {
                lines.push(String::new());
                lines.push("announcements".to_string());
                lines.extend(panes::announcement_lines(&items, true));
            }
            Err(err) => {
                self.report_query_error(Tab::Config, err);
                return;
            }
        }
        lines.push(String::new());
        lines.push("edit values with `tickerboard admin config` and `tickerboard admin announce`".to_string());
        self.set_pane(Tab::Config, lines);
    }

    fn refresh_users(&mut self) {
        match self.client.list_users() {
            Ok(users) => {
                let mut lines = panes::user_lines(&users);
                lines.push(String::new());
                lines.push("manage accounts with `tickerboard admin users`".to_string());
                self.set_pane(Tab::UserManagement, lines);
            }
            Err(err) => self.report_query_error(Tab::UserManagement, err),
        }
    }

    fn refresh_account(&mut self) {
        let Some(user) = self.session.current() else {
            return;
        };
        let role = match user.role {
            Role::Admin => "admin",
            Role::User => "user",
        };
        let mut lines = vec![format!("signed in as {} ({})", user.username, role)];
        if user.role == Role::User {
            lines.push(if user.permissions.is_empty() {
                "permissions: none".to_string()
            } else {
                format!("permissions: {}", user.permissions.join(", "))
            });
        }
        lines.push(String::new());
        lines.push("fill both password fields and press Enter to change the password".to_string());
        lines.push("a password needs at least 8 characters with a letter and a digit".to_string());
        self.set_pane(Tab::Account, lines);
    }

    pub(super) fn run_active(&mut self) {
        let Some(tab) = self.current_tab() else {
            return;
        };
        match tab {
            Tab::Home | Tab::Config | Tab::UserManagement => self.refresh_active(),
            Tab::StockAnalysis => self.run_stock_analysis(),
            Tab::MonthFilter => self.run_month_filter(),
            Tab::IndustryAnalysis => self.run_industry(),
            Tab::SourceCompare => self.run_compare(),
            Tab::Account => self.run_change_password(),
        }
    }

    fn run_stock_analysis(&mut self) {
        let symbol = self.stock_form.value(0).to_string();
        if symbol.is_empty() {
            self.set_pane(
                Tab::StockAnalysis,
                vec!["enter a stock symbol first".to_string()],
            );
            return;
        }
        let parsed = parse_months(self.stock_form.value(1)).and_then(|months| {
            let start = parse_year(self.stock_form.value(2))?;
            let end = parse_year(self.stock_form.value(3))?;
            Ok((months, start, end))
        });
        let (months, start, end) = match parsed {
            Ok(v) => v,
            Err(err) => {
                self.set_pane(Tab::StockAnalysis, vec![format!("error: {err:#}")]);
                return;
            }
        };
        let source = opt_str(self.stock_form.value(4));
        let res = if months.len() == 1 {
            self.client
                .stock_statistics(&symbol, months[0], start, end, source.as_deref())
        } else {
            self.client
                .multi_month_statistics(&symbol, &months, start, end, source.as_deref())
        };
        match res {
            Ok(stats) => {
                let lines = panes::stock_statistics_lines(&stats);
                self.set_pane(Tab::StockAnalysis, lines);
            }
            Err(err) => self.report_query_error(Tab::StockAnalysis, err),
        }
    }

    fn run_month_filter(&mut self) {
        let parsed = parse_month(self.filter_form.value(0))
            .and_then(|month| Ok((month, parse_count(self.filter_form.value(1))?)));
        let (month, min_count) = match parsed {
            Ok(v) => v,
            Err(err) => {
                self.set_pane(Tab::MonthFilter, vec![format!("error: {err:#}")]);
                return;
            }
        };
        let source = opt_str(self.filter_form.value(2));
        match self.client.month_filter(month, min_count, source.as_deref()) {
            Ok(rows) => {
                let lines = panes::month_filter_lines(&rows);
                self.set_pane(Tab::MonthFilter, lines);
            }
            Err(err) => self.report_query_error(Tab::MonthFilter, err),
        }
    }

    fn run_industry(&mut self) {
        let month = match parse_month(self.industry_form.value(0)) {
            Ok(m) => m,
            Err(err) => {
                self.set_pane(Tab::IndustryAnalysis, vec![format!("error: {err:#}")]);
                return;
            }
        };
        let industry_type = opt_str(self.industry_form.value(1));
        let industry = self.industry_form.value(2).to_string();
        let source = opt_str(self.industry_form.value(3));

        if industry.is_empty() {
            match self
                .client
                .industry_statistics(month, industry_type.as_deref(), source.as_deref())
            {
                Ok(rows) => {
                    let lines = panes::industry_lines(&rows);
                    self.set_pane(Tab::IndustryAnalysis, lines);
                }
                Err(err) => self.report_query_error(Tab::IndustryAnalysis, err),
            }
        } else {
            match self
                .client
                .industry_top_stocks(&industry, month, source.as_deref())
            {
                Ok(rows) => {
                    let lines = panes::top_stocks_lines(&industry, &rows);
                    self.set_pane(Tab::IndustryAnalysis, lines);
                }
                Err(err) => self.report_query_error(Tab::IndustryAnalysis, err),
            }
        }
    }

    fn run_compare(&mut self) {
        let symbol = self.compare_form.value(0).to_string();
        if symbol.is_empty() {
            self.set_pane(
                Tab::SourceCompare,
                vec!["enter a stock symbol first".to_string()],
            );
            return;
        }
        let year = match parse_year(self.compare_form.value(1)) {
            Ok(y) => y,
            Err(err) => {
                self.set_pane(Tab::SourceCompare, vec![format!("error: {err:#}")]);
                return;
            }
        };
        match self.client.compare_sources(&symbol, year) {
            Ok(rows) => {
                let lines = panes::compare_lines(&rows);
                self.set_pane(Tab::SourceCompare, lines);
            }
            Err(err) => self.report_query_error(Tab::SourceCompare, err),
        }
    }

    fn run_change_password(&mut self) {
        let old = self.account_form.fields[0].value.clone();
        let new = self.account_form.fields[1].value.clone();
        if old.is_empty() || new.is_empty() {
            self.alert("both password fields are required");
            return;
        }
        if let Err(reason) = validate_password_strength(&new) {
            self.alert(reason);
            return;
        }
        match self.client.change_password(&old, &new) {
            Ok(()) => {
                self.account_form.clear_values();
                self.status_line = Some("password changed".to_string());
            }
            Err(err) => {
                if !self.check_expiry(&err) {
                    self.alert(format!("{err:#}"));
                }
            }
        }
    }

    pub(super) fn export_active(&mut self) {
        let Some(user) = self.session.current() else {
            return;
        };
        if !access::export_visible(user) {
            self.status_line = Some("export is not available for this account".to_string());
            return;
        }
        let Some(tab) = self.current_tab() else {
            return;
        };
        let Some((kind, body)) = self.export_request(tab) else {
            self.status_line = Some("nothing to export on this view".to_string());
            return;
        };
        match self.client.export(kind, body) {
            Ok((filename, bytes)) => match std::fs::write(&filename, &bytes) {
                Ok(()) => self.status_line = Some(format!("exported {filename}")),
                Err(err) => self.alert(format!("write {filename}: {err}")),
            },
            Err(err) => {
                if !self.check_expiry(&err) {
                    self.alert(format!("{err:#}"));
                }
            }
        }
    }

    /// Mirror the current tab's form into the matching export request.
    fn export_request(&self, tab: Tab) -> Option<(ExportKind, serde_json::Value)> {
        match tab {
            Tab::StockAnalysis => {
                let symbol = self.stock_form.value(0);
                if symbol.is_empty() {
                    return None;
                }
                let months = parse_months(self.stock_form.value(1)).ok()?;
                let start = parse_year(self.stock_form.value(2)).ok()?;
                let end = parse_year(self.stock_form.value(3)).ok()?;
                let source = opt_str(self.stock_form.value(4));
                if months.len() == 1 {
                    Some((
                        ExportKind::StockStatistics,
                        serde_json::json!({
                            "code": symbol,
                            "month": months[0],
                            "start_year": start,
                            "end_year": end,
                            "data_source": source,
                        }),
                    ))
                } else {
                    Some((
                        ExportKind::MultiMonthStatistics,
                        serde_json::json!({
                            "code": symbol,
                            "months": months,
                            "start_year": start,
                            "end_year": end,
                            "data_source": source,
                        }),
                    ))
                }
            }
            Tab::MonthFilter => {
                let month = parse_month(self.filter_form.value(0)).ok()?;
                let min_count = parse_count(self.filter_form.value(1)).ok()?;
                Some((
                    ExportKind::MonthFilter,
                    serde_json::json!({
                        "month": month,
                        "min_count": min_count,
                        "data_source": opt_str(self.filter_form.value(2)),
                    }),
                ))
            }
            Tab::IndustryAnalysis => {
                let month = parse_month(self.industry_form.value(0)).ok()?;
                let source = opt_str(self.industry_form.value(3));
                let industry = self.industry_form.value(2);
                if industry.is_empty() {
                    Some((
                        ExportKind::IndustryStatistics,
                        serde_json::json!({
                            "month": month,
                            "industry_type": opt_str(self.industry_form.value(1)),
                            "data_source": source,
                        }),
                    ))
                } else {
                    Some((
                        ExportKind::IndustryTopStocks,
                        serde_json::json!({
                            "industry": industry,
                            "month": month,
                            "data_source": source,
                        }),
                    ))
                }
            }
            Tab::SourceCompare => {
                let symbol = self.compare_form.value(0);
                if symbol.is_empty() {
                    return None;
                }
                let year = parse_year(self.compare_form.value(1)).ok()?;
                Some((
                    ExportKind::CompareSources,
                    serde_json::json!({ "code": symbol, "year": year }),
                ))
            }
            _ => None,
        }
    }

    pub(super) fn start_update(&mut self, update_type: UpdateType, overwrite: bool, now: Instant) {
        let Some(user) = self.session.current() else {
            return;
        };
        if !access::data_management_allowed(user) {
            self.status_line =
                Some("data updates need the data management permission".to_string());
            return;
        }
        match self.client.start_update(update_type, overwrite) {
            Ok(ack) => {
                self.status_line = Some(if ack.already_running {
                    "an update is already running; tracking it".to_string()
                } else {
                    format!("{} update started", update_type.as_str())
                });
                self.poller.start(now);
            }
            Err(err) => {
                if !self.check_expiry(&err) {
                    self.alert(format!("{err:#}"));
                }
            }
        }
    }

    pub(super) fn request_overwrite(&mut self) {
        let Some(user) = self.session.current() else {
            return;
        };
        if !access::data_management_allowed(user) {
            self.status_line =
                Some("data updates need the data management permission".to_string());
            return;
        }
        self.modal = Some(Modal::ConfirmOverwrite);
    }
}

fn opt_str(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn parse_month(s: &str) -> Result<u8> {
    let month: u8 = s.parse().map_err(|_| anyhow::anyhow!("month must be a number"))?;
    if !(1..=12).contains(&month) {
        bail!("month must be between 1 and 12");
    }
    Ok(month)
}

fn parse_months(s: &str) -> Result<Vec<u8>> {
    let mut months = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let month = parse_month(part)?;
        if !months.contains(&month) {
            months.push(month);
        }
    }
    if months.is_empty() {
        bail!("at least one month is required");
    }
    Ok(months)
}

fn parse_year(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("year must be a number, e.g. 2024"))
}

fn parse_count(s: &str) -> Result<u32> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("minimum years must be a whole number"))
}

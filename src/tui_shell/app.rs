use std::collections::HashMap;
use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::{ProgressSnapshot, StockHit, Tab, UpdateType};
use crate::progress::{PollOutcome, ProgressPoller, ProgressSource};
use crate::remote::RemoteClient;
use crate::session::SessionStore;
use crate::store::LocalStore;
use crate::suggest::{KeyOutcome, NavKey, SymbolSource, SymbolSuggest};
use crate::tui::TuiRunOptions;

use super::{Form, FormField};

mod actions;

pub(super) fn run(opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let store = LocalStore::open_default()?;
    let base_url = match opts.base_url {
        Some(url) => url,
        None => store.base_url()?,
    };
    let cookie = store.session_cookie().context("read session")?;
    let client = RemoteClient::new(base_url, cookie)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(store, client);
    app.startup(Instant::now());
    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    app.handle_key(k, Instant::now());
                }
                _ => {}
            }
        }
    }
}

/// Lends the remote client to the progress state machine.
struct ClientProgress<'a>(&'a RemoteClient);

impl ProgressSource for ClientProgress<'_> {
    fn progress(&mut self) -> Result<ProgressSnapshot> {
        self.0.progress()
    }
}

/// Lends the remote client to the autocomplete components.
struct ClientSearch<'a>(&'a RemoteClient);

impl SymbolSource for ClientSearch<'_> {
    fn search(&mut self, keyword: &str, limit: usize) -> Result<Vec<StockHit>> {
        self.0.search_stocks(keyword, limit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Screen {
    Login,
    Main,
}

pub(super) enum Modal {
    Alert(String),
    ConfirmOverwrite,
}

pub(super) struct App {
    pub(super) store: LocalStore,
    pub(super) client: RemoteClient,
    pub(super) session: SessionStore,

    pub(super) screen: Screen,
    pub(super) login_form: Form,
    pub(super) login_note: Option<String>,

    pub(super) tabs: Vec<Tab>,
    pub(super) active: usize,

    pub(super) stock_form: Form,
    pub(super) stock_suggest: SymbolSuggest,
    pub(super) filter_form: Form,
    pub(super) industry_form: Form,
    pub(super) compare_form: Form,
    pub(super) compare_suggest: SymbolSuggest,
    pub(super) account_form: Form,

    pub(super) panes: HashMap<Tab, Vec<String>>,
    pub(super) scroll: u16,
    pub(super) status_line: Option<String>,
    pub(super) modal: Option<Modal>,

    pub(super) poller: ProgressPoller,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(store: LocalStore, client: RemoteClient) -> Self {
        Self {
            store,
            client,
            session: SessionStore::new(),
            screen: Screen::Login,
            login_form: Form::new(vec![
                FormField::new("username"),
                FormField::masked("password"),
            ]),
            login_note: None,
            tabs: Vec::new(),
            active: 0,
            stock_form: Form::new(vec![
                FormField::new("symbol"),
                FormField::with_value("months (e.g. 3 or 3,4,5)", "3"),
                FormField::with_value("start year", "2015"),
                FormField::with_value("end year", "2025"),
                FormField::new("data source (blank = default)"),
            ]),
            stock_suggest: SymbolSuggest::new(),
            filter_form: Form::new(vec![
                FormField::with_value("month", "3"),
                FormField::with_value("min years of data", "10"),
                FormField::new("data source (blank = default)"),
            ]),
            industry_form: Form::new(vec![
                FormField::with_value("month", "3"),
                FormField::new("industry type (blank = default)"),
                FormField::new("industry (blank = overview)"),
                FormField::new("data source (blank = default)"),
            ]),
            compare_form: Form::new(vec![
                FormField::new("symbol"),
                FormField::with_value("year", "2025"),
            ]),
            compare_suggest: SymbolSuggest::new(),
            account_form: Form::new(vec![
                FormField::masked("current password"),
                FormField::masked("new password"),
            ]),
            panes: HashMap::new(),
            scroll: 0,
            status_line: None,
            modal: None,
            poller: ProgressPoller::new(),
            quit: false,
        }
    }

    pub(super) fn current_tab(&self) -> Option<Tab> {
        self.tabs.get(self.active).copied()
    }

    pub(super) fn form(&self) -> Option<&Form> {
        match self.current_tab()? {
            Tab::StockAnalysis => Some(&self.stock_form),
            Tab::MonthFilter => Some(&self.filter_form),
            Tab::IndustryAnalysis => Some(&self.industry_form),
            Tab::SourceCompare => Some(&self.compare_form),
            Tab::Account => Some(&self.account_form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut Form> {
        match self.current_tab()? {
            Tab::StockAnalysis => Some(&mut self.stock_form),
            Tab::MonthFilter => Some(&mut self.filter_form),
            Tab::IndustryAnalysis => Some(&mut self.industry_form),
            Tab::SourceCompare => Some(&mut self.compare_form),
            Tab::Account => Some(&mut self.account_form),
            _ => None,
        }
    }

    /// The dropdown wired to the current tab, if it has one.
    pub(super) fn suggest(&self) -> Option<&SymbolSuggest> {
        match self.current_tab()? {
            Tab::StockAnalysis => Some(&self.stock_suggest),
            Tab::SourceCompare => Some(&self.compare_suggest),
            _ => None,
        }
    }

    fn suggest_mut(&mut self) -> Option<&mut SymbolSuggest> {
        match self.current_tab()? {
            Tab::StockAnalysis => Some(&mut self.stock_suggest),
            Tab::SourceCompare => Some(&mut self.compare_suggest),
            _ => None,
        }
    }

    fn symbol_field_focused(&self) -> bool {
        matches!(
            self.current_tab(),
            Some(Tab::StockAnalysis | Tab::SourceCompare)
        ) && self.form().is_some_and(|f| f.focus == 0)
    }

    /// Deadline-driven work: progress ticks and debounced searches.
    fn tick(&mut self, now: Instant) {
        if self.screen != Screen::Main {
            return;
        }

        let outcome = {
            let mut src = ClientProgress(&self.client);
            self.poller.poll(now, &mut src)
        };
        if outcome == PollOutcome::RefreshStatus {
            self.refresh_home();
        }

        let mut src = ClientSearch(&self.client);
        self.stock_suggest.poll(now, &mut src);
        self.compare_suggest.poll(now, &mut src);
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(modal) = &self.modal {
            match modal {
                Modal::Alert(_) => {
                    self.modal = None;
                }
                Modal::ConfirmOverwrite => {
                    self.modal = None;
                    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                        self.start_update(UpdateType::Full, true, now);
                    } else {
                        self.status_line = Some("overwrite cancelled".to_string());
                    }
                }
            }
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key, now),
            Screen::Main => self.handle_main_key(key, now),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Tab | KeyCode::Down => self.login_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.login_form.focus_prev(),
            KeyCode::Enter => self.submit_login(now),
            KeyCode::Backspace => self.login_form.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login_form.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit = true,
                KeyCode::Char('r') => self.refresh_active(),
                KeyCode::Char('e') => self.export_active(),
                KeyCode::Char('u') => self.start_update(UpdateType::Incremental, false, now),
                KeyCode::Char('f') => self.start_update(UpdateType::Full, false, now),
                KeyCode::Char('o') => self.request_overwrite(),
                KeyCode::Char('d') => self.logout(),
                _ => {}
            }
            return;
        }

        // The open dropdown gets first claim on navigation keys.
        let nav = match key.code {
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            _ => None,
        };
        if let Some(nav) = nav
            && let Some(sg) = self.suggest_mut()
        {
            match sg.on_key(nav) {
                KeyOutcome::Committed(symbol) => {
                    // Committing fills the field; it does not re-search.
                    if let Some(form) = self.form_mut() {
                        form.fields[0].value = symbol;
                    }
                    return;
                }
                KeyOutcome::Handled => return,
                KeyOutcome::Ignored => {}
            }
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab => self.switch_tab(1, now),
            KeyCode::BackTab => self.switch_tab(-1, now),
            KeyCode::Down => self.move_focus(true, now),
            KeyCode::Up => self.move_focus(false, now),
            KeyCode::Enter => self.run_active(),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Backspace => {
                if let Some(form) = self.form_mut() {
                    form.backspace();
                    self.notify_edit(now);
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.form_mut() {
                    form.insert_char(c);
                    self.notify_edit(now);
                }
            }
            _ => {}
        }
    }

    fn switch_tab(&mut self, delta: i32, now: Instant) {
        if self.tabs.is_empty() {
            return;
        }
        if self.symbol_field_focused()
            && let Some(sg) = self.suggest_mut()
        {
            sg.on_blur(now);
        }
        let n = self.tabs.len() as i32;
        self.active = ((self.active as i32 + delta).rem_euclid(n)) as usize;
        self.scroll = 0;
    }

    fn move_focus(&mut self, forward: bool, now: Instant) {
        let was_symbol = self.symbol_field_focused();
        let Some(form) = self.form_mut() else {
            return;
        };
        if forward {
            form.focus_next();
        } else {
            form.focus_prev();
        }
        let is_symbol = self.symbol_field_focused();
        if was_symbol && !is_symbol {
            if let Some(sg) = self.suggest_mut() {
                sg.on_blur(now);
            }
        } else if !was_symbol && is_symbol {
            let value = self.form().map(|f| f.fields[0].value.clone());
            if let (Some(value), Some(sg)) = (value, self.suggest_mut()) {
                sg.on_focus(&value, now);
            }
        }
    }

    /// After an edit, keep the symbol autocomplete in sync with the field.
    fn notify_edit(&mut self, now: Instant) {
        if !self.symbol_field_focused() {
            return;
        }
        let value = self.form().map(|f| f.fields[0].value.clone());
        if let (Some(value), Some(sg)) = (value, self.suggest_mut()) {
            sg.on_input(&value, now);
        }
    }
}

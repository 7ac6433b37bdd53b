use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Tabs, Wrap};

use super::app::{App, Modal, Screen};
use super::forms::Form;

pub(super) fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => draw_login(f, app),
        Screen::Main => draw_main(f, app),
    }
    if let Some(modal) = &app.modal {
        draw_modal(f, modal);
    }
}

fn draw_login(f: &mut Frame, app: &App) {
    let area = centered_rect(f.area(), 46, 10);
    let mut lines = form_lines(&app.login_form);
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("backend: {}", app.client.base_url()),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(note) = &app.login_note {
        lines.push(Line::styled(
            note.clone(),
            Style::default().fg(Color::Red),
        ));
    } else {
        lines.push(Line::styled(
            "Enter to sign in, Esc to quit",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" tickerboard sign in ");
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_main(f: &mut Frame, app: &App) {
    let form_height = app.form().map(|form| form.fields.len() as u16 + 2);
    let dropdown_height = app
        .suggest()
        .filter(|sg| sg.is_open())
        .map(|sg| sg.results().len().min(10) as u16 + 2);
    let gauge_height = app.poller.display().map(|_| 3u16);

    let mut constraints = vec![Constraint::Length(3)];
    if let Some(h) = form_height {
        constraints.push(Constraint::Length(h));
    }
    if let Some(h) = dropdown_height {
        constraints.push(Constraint::Length(h));
    }
    if let Some(h) = gauge_height {
        constraints.push(Constraint::Length(h));
    }
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());
    let mut next = 0usize;
    let mut take = || {
        let r = chunks[next];
        next += 1;
        r
    };

    let titles: Vec<Line> = app.tabs.iter().map(|t| Line::raw(t.title())).collect();
    let tab_bar = Tabs::new(titles)
        .select(app.active)
        .block(Block::default().borders(Borders::ALL).title(" tickerboard "))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tab_bar, take());

    if form_height.is_some()
        && let Some(form) = app.form()
    {
        let block = Block::default().borders(Borders::ALL);
        f.render_widget(Paragraph::new(form_lines(form)).block(block), take());
    }

    if dropdown_height.is_some()
        && let Some(sg) = app.suggest()
    {
        let mut lines = Vec::new();
        for (i, hit) in sg.results().iter().enumerate() {
            let text = format!("{:<10} {:<16} {}", hit.symbol, hit.name, hit.exchange);
            if i == sg.active_index() {
                lines.push(Line::styled(
                    text,
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            } else {
                lines.push(Line::raw(text));
            }
        }
        let block = Block::default().borders(Borders::ALL).title(" matches ");
        f.render_widget(Paragraph::new(lines).block(block), take());
    }

    if gauge_height.is_some()
        && let Some(snap) = app.poller.display()
    {
        let percent = snap.percent();
        let label = format!(
            "{} {}/{} ({:.0}%)",
            snap.message, snap.current, snap.total, percent
        );
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" data update "))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(percent / 100.0)
            .label(label);
        f.render_widget(gauge, take());
    }

    let pane_lines: Vec<Line> = app
        .current_tab()
        .and_then(|tab| app.panes.get(&tab))
        .map(|lines| lines.iter().map(|l| Line::raw(l.clone())).collect())
        .unwrap_or_default();
    let pane = Paragraph::new(pane_lines)
        .block(Block::default().borders(Borders::ALL))
        .scroll((app.scroll, 0));
    f.render_widget(pane, take());

    let status = app.status_line.clone().unwrap_or_else(|| {
        "Tab switch | Enter run | Ctrl+R refresh | Ctrl+E export | Ctrl+U/F/O update | Ctrl+D sign out | Esc quit"
            .to_string()
    });
    f.render_widget(
        Paragraph::new(Line::styled(status, Style::default().fg(Color::DarkGray))),
        take(),
    );
}

fn form_lines(form: &Form) -> Vec<Line<'static>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let marker = if i == form.focus { "> " } else { "  " };
            let label = format!("{marker}{:<28}", format!("{}:", field.label));
            let value = field.display_value();
            if i == form.focus {
                Line::from(vec![
                    Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(value, Style::default().fg(Color::Cyan)),
                ])
            } else {
                Line::from(vec![Span::raw(label), Span::raw(value)])
            }
        })
        .collect()
}

fn draw_modal(f: &mut Frame, modal: &Modal) {
    let (title, body, hint) = match modal {
        Modal::Alert(text) => (" notice ", text.clone(), "press any key"),
        Modal::ConfirmOverwrite => (
            " confirm overwrite ",
            "A full overwrite update re-fetches and replaces all stored data."
                .to_string(),
            "y to start, any other key to cancel",
        ),
    };
    let area = centered_rect(f.area(), 56, 7);
    let lines = vec![
        Line::raw(body),
        Line::raw(""),
        Line::styled(hint, Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

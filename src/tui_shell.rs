use anyhow::Result;

mod app;
mod forms;
mod panes;
mod render;

// Shared form primitives, reachable from submodules via `super::...`.
use forms::{Form, FormField};

pub fn run() -> Result<()> {
    run_with_options(crate::tui::TuiRunOptions::default())
}

pub fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}

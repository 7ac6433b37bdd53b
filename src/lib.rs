pub mod access;
pub mod model;
pub mod progress;
pub mod remote;
pub mod session;
pub mod store;
pub mod suggest;
pub mod tui;
pub mod tui_shell;

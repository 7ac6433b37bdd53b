use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli_exec;
mod cli_subcommands;

use cli_subcommands::{AdminCommands, ExportCommands, RemoteCommands};

#[derive(Parser)]
#[command(name = "tickerboard")]
#[command(about = "Stock statistics dashboard client", long_about = None)]
struct Cli {
    /// Override the configured backend URL for this invocation
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the signed-in account
    Whoami {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the account password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },

    /// Configure or show the backend
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },

    /// Show dataset coverage per data source
    Status {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a server-side data update job
    Update {
        /// Full refresh instead of incremental
        #[arg(long)]
        full: bool,
        /// Re-fetch and replace existing rows (implies --full)
        #[arg(long)]
        overwrite: bool,
        /// Poll progress until the job finishes
        #[arg(long)]
        watch: bool,
    },

    /// Show data update progress
    Progress {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Search stocks by symbol or name
    Search {
        keyword: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly statistics for one stock
    Stock {
        symbol: String,
        /// Months to analyze, comma separated
        #[arg(long, value_delimiter = ',', default_value = "3")]
        months: Vec<u8>,
        #[arg(long, default_value_t = 2015)]
        start_year: i32,
        #[arg(long, default_value_t = 2025)]
        end_year: i32,
        #[arg(long)]
        source: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Stocks whose history clears a bar in one month
    MonthFilter {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
        #[arg(long, default_value_t = 10)]
        min_years: u32,
        #[arg(long)]
        source: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List known industries
    Industries {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-industry statistics for a month
    Industry {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
        #[arg(long)]
        industry_type: Option<String>,
        #[arg(long)]
        source: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Best stocks of one industry in a month
    TopStocks {
        industry: String,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
        #[arg(long)]
        source: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Reconcile one stock's numbers across data sources
    Compare {
        symbol: String,
        #[arg(long, default_value_t = 2025)]
        year: i32,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Download analysis results as a spreadsheet
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },

    /// Administrative operations
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => tickerboard::tui::run_with_options(tickerboard::tui::TuiRunOptions {
            base_url: cli.url,
        }),
        Some(command) => cli_exec::handle_command(command, cli.url),
    }
}

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum RemoteCommands {
    /// Show the configured backend
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the configured backend
    Set {
        #[arg(long)]
        url: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ExportCommands {
    /// Monthly statistics for one stock
    Stock {
        symbol: String,
        #[arg(long, value_delimiter = ',', default_value = "3")]
        months: Vec<u8>,
        #[arg(long, default_value_t = 2015)]
        start_year: i32,
        #[arg(long, default_value_t = 2025)]
        end_year: i32,
        #[arg(long)]
        source: Option<String>,
        /// Output path (defaults to the server-provided filename)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Month filter results
    MonthFilter {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
        #[arg(long, default_value_t = 10)]
        min_years: u32,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Per-industry statistics
    Industry {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
        #[arg(long)]
        industry_type: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Top stocks of one industry
    TopStocks {
        industry: String,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Cross-source comparison for one stock
    Compare {
        symbol: String,
        #[arg(long, default_value_t = 2025)]
        year: i32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum AdminCommands {
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage announcements
    Announce {
        #[command(subcommand)]
        command: AnnounceCommands,
    },
    /// Manage server configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// List accounts
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account
    Create {
        username: String,
        #[arg(long)]
        password: String,
        /// Role: admin|user
        #[arg(long, default_value = "user")]
        role: String,
        /// Expiry date, e.g. 2027-01-01
        #[arg(long)]
        expires: Option<String>,
    },

    /// Update an account; only the provided fields change
    Update {
        id: i64,
        #[arg(long)]
        password: Option<String>,
        /// Role: admin|user
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        expires: Option<String>,
    },

    /// Delete an account
    Delete { id: i64 },

    /// Show an account's granted permissions
    Perms {
        id: i64,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace an account's granted permissions
    SetPerms {
        id: i64,
        /// Permission codes, e.g. month_filter export_excel
        codes: Vec<String>,
    },

    /// List grantable permissions
    Catalog {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum AnnounceCommands {
    /// List announcements (active only by default)
    List {
        /// Include inactive announcements
        #[arg(long)]
        all: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an announcement
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value_t = 0)]
        priority: i32,
        /// Create in the inactive state
        #[arg(long)]
        inactive: bool,
    },

    /// Update an announcement; only the provided fields change
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        priority: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete an announcement
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the application configuration
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the application configuration
    Set {
        #[arg(long)]
        default_source: Option<String>,
        /// Comma-separated list of data sources
        #[arg(long, value_delimiter = ',')]
        sources: Option<Vec<String>>,
    },

    /// Show system configuration entries
    System {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Set one system configuration entry
    SystemSet { key: String, value: String },
}

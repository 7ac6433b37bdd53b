use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// The authenticated identity as the backend reports it. `permissions` may
/// be absent in the payload for admin accounts; it deserializes to empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,

    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub expired: bool,

    #[serde(default)]
    pub expired_message: Option<String>,
}

impl SessionUser {
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|p| p == code)
    }
}

pub mod perm {
    pub const STOCK_ANALYSIS_SINGLE: &str = "stock_analysis_single";
    pub const STOCK_ANALYSIS_MULTI: &str = "stock_analysis_multi";
    pub const MONTH_FILTER: &str = "month_filter";
    pub const INDUSTRY_STATISTICS: &str = "industry_statistics";
    pub const INDUSTRY_TOP_STOCKS: &str = "industry_top_stocks";
    pub const SOURCE_COMPARE: &str = "source_compare";
    pub const DATA_MANAGEMENT: &str = "data_management";
    pub const EXPORT_EXCEL: &str = "export_excel";
}

/// Top-level dashboard sections. `Config` and `UserManagement` are
/// admin-only; `Home` and `Account` carry no permission requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    StockAnalysis,
    MonthFilter,
    IndustryAnalysis,
    SourceCompare,
    Config,
    UserManagement,
    Account,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::StockAnalysis => "stock-analysis",
            Tab::MonthFilter => "month-filter",
            Tab::IndustryAnalysis => "industry-analysis",
            Tab::SourceCompare => "source-compare",
            Tab::Config => "config",
            Tab::UserManagement => "user-management",
            Tab::Account => "account",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::StockAnalysis => "Stock analysis",
            Tab::MonthFilter => "Month filter",
            Tab::IndustryAnalysis => "Industry analysis",
            Tab::SourceCompare => "Source compare",
            Tab::Config => "System config",
            Tab::UserManagement => "Users",
            Tab::Account => "Account",
        }
    }
}

/// One status sample of the server-side ingestion job.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub is_running: bool,

    #[serde(default)]
    pub current: u64,

    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub message: String,
}

impl ProgressSnapshot {
    /// Percent complete in [0, 100]. A zero total reads as 0% rather than
    /// dividing by zero.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// One autocomplete suggestion from the symbol search endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockHit {
    #[serde(default, alias = "ts_code")]
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub exchange: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceStat {
    pub data_source: String,
    pub data_count: u64,
    pub stock_count: u64,

    #[serde(default)]
    pub latest_date: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataStatus {
    #[serde(default)]
    pub total_stocks: u64,

    #[serde(default)]
    pub total_data_count: u64,

    #[serde(default)]
    pub latest_date: Option<String>,

    #[serde(default)]
    pub data_sources: Vec<SourceStat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    Incremental,
    Full,
}

impl UpdateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Incremental => "incremental",
            UpdateType::Full => "full",
        }
    }
}

/// Per-month statistics row for a single stock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthStatRow {
    pub year: i32,
    pub month: u8,

    #[serde(default)]
    pub up_days: u32,

    #[serde(default)]
    pub down_days: u32,

    #[serde(default)]
    pub flat_days: u32,

    #[serde(default)]
    pub up_ratio: f64,

    #[serde(default)]
    pub avg_change: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockStatistics {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub rows: Vec<MonthStatRow>,
}

/// One stock in the month-filter result set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilteredStock {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub up_years: u32,

    #[serde(default)]
    pub total_years: u32,

    #[serde(default)]
    pub up_ratio: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndustryStatRow {
    pub industry: String,

    #[serde(default)]
    pub stock_count: u32,

    #[serde(default)]
    pub avg_up_ratio: f64,

    #[serde(default)]
    pub avg_change: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopStockRow {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub up_ratio: f64,

    #[serde(default)]
    pub avg_change: f64,
}

/// One per-source row of the cross-source reconciliation table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceCompareRow {
    pub data_source: String,

    #[serde(default)]
    pub data_count: u64,

    #[serde(default)]
    pub up_days: u32,

    #[serde(default)]
    pub down_days: u32,

    #[serde(default)]
    pub avg_change: f64,

    #[serde(default)]
    pub is_base: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,

    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub expires_at: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Static catalog entry describing one grantable permission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PermissionDef {
    pub code: String,
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub default_data_source: Option<String>,

    #[serde(default)]
    pub data_sources: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfigEntry {
    pub key: String,
    pub value: String,

    #[serde(default)]
    pub description: String,
}

/// Client-side settings persisted in `config.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub base_url: Option<String>,
}

/// Mutable client state persisted in `state.json`. The session cookie is
/// captured from the login response and replayed on every request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    #[serde(default)]
    pub session_cookie: Option<String>,
}

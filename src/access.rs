//! Pure visibility decisions: which tabs a session may see and which tab
//! is shown first. No I/O, no rendering; the TUI applies the results.

use crate::model::{Role, SessionUser, Tab, perm};

pub struct TabDef {
    pub tab: Tab,
    /// Any one of these unlocks the tab. Empty means no restriction.
    pub required: &'static [&'static str],
    pub admin_only: bool,
}

/// Declarative tab registry, in display order.
pub const TAB_REGISTRY: &[TabDef] = &[
    TabDef {
        tab: Tab::Home,
        required: &[],
        admin_only: false,
    },
    TabDef {
        tab: Tab::StockAnalysis,
        required: &[perm::STOCK_ANALYSIS_SINGLE, perm::STOCK_ANALYSIS_MULTI],
        admin_only: false,
    },
    TabDef {
        tab: Tab::MonthFilter,
        required: &[perm::MONTH_FILTER],
        admin_only: false,
    },
    TabDef {
        tab: Tab::IndustryAnalysis,
        required: &[perm::INDUSTRY_STATISTICS, perm::INDUSTRY_TOP_STOCKS],
        admin_only: false,
    },
    TabDef {
        tab: Tab::SourceCompare,
        required: &[perm::SOURCE_COMPARE],
        admin_only: false,
    },
    TabDef {
        tab: Tab::Config,
        required: &[],
        admin_only: true,
    },
    TabDef {
        tab: Tab::UserManagement,
        required: &[],
        admin_only: true,
    },
    TabDef {
        tab: Tab::Account,
        required: &[],
        admin_only: false,
    },
];

/// Every gating decision consults this first; admin implies every
/// capability regardless of the permissions list.
pub fn is_admin(user: &SessionUser) -> bool {
    user.role == Role::Admin
}

fn registry_entry(tab: Tab) -> Option<&'static TabDef> {
    TAB_REGISTRY.iter().find(|d| d.tab == tab)
}

pub fn can_access_tab(user: &SessionUser, tab: Tab) -> bool {
    if is_admin(user) {
        return true;
    }
    let Some(def) = registry_entry(tab) else {
        return false;
    };
    if def.admin_only {
        return false;
    }
    if def.required.is_empty() {
        return true;
    }
    def.required.iter().any(|p| user.has_permission(p))
}

/// Visibility for every registered tab, in registry order. Recomputing is
/// idempotent; the same session always yields the same map.
pub fn visibility(user: &SessionUser) -> Vec<(Tab, bool)> {
    TAB_REGISTRY
        .iter()
        .map(|d| (d.tab, can_access_tab(user, d.tab)))
        .collect()
}

pub fn visible_tabs(user: &SessionUser) -> Vec<Tab> {
    visibility(user)
        .into_iter()
        .filter_map(|(tab, on)| on.then_some(tab))
        .collect()
}

/// Export controls are gated separately from tabs.
pub fn export_visible(user: &SessionUser) -> bool {
    is_admin(user) || user.has_permission(perm::EXPORT_EXCEL)
}

pub fn data_management_allowed(user: &SessionUser) -> bool {
    is_admin(user) || user.has_permission(perm::DATA_MANAGEMENT)
}

/// Fixed priority walked when no home tab exists.
const DEFAULT_TAB_PRIORITY: &[Tab] = &[
    Tab::StockAnalysis,
    Tab::MonthFilter,
    Tab::IndustryAnalysis,
    Tab::SourceCompare,
];

/// Pick the landing tab among the tabs actually present. Home always wins
/// when present; an admin falls through to stock analysis; otherwise the
/// first accessible tab in priority order, then the first visible tab in
/// registry order, then nothing.
pub fn resolve_default_tab(user: &SessionUser, present: &[Tab]) -> Option<Tab> {
    let here = |tab: Tab| present.contains(&tab);

    if here(Tab::Home) {
        return Some(Tab::Home);
    }

    if is_admin(user) && here(Tab::StockAnalysis) {
        return Some(Tab::StockAnalysis);
    }

    for &tab in DEFAULT_TAB_PRIORITY {
        if here(tab) && can_access_tab(user, tab) {
            return Some(tab);
        }
    }

    TAB_REGISTRY
        .iter()
        .map(|d| d.tab)
        .find(|&tab| here(tab) && can_access_tab(user, tab))
}

#[cfg(test)]
#[path = "tests/access_tests.rs"]
mod tests;

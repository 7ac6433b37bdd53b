//! Persona walkthroughs of the gating rules: what each kind of account
//! sees at sign-in and where it lands.

use tickerboard::access::{
    data_management_allowed, export_visible, resolve_default_tab, visible_tabs,
};
use tickerboard::model::{Role, SessionUser, Tab, perm};

fn user_with(permissions: &[&str]) -> SessionUser {
    SessionUser {
        id: 7,
        username: "analyst".to_string(),
        role: Role::User,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        expired: false,
        expired_message: None,
    }
}

fn admin() -> SessionUser {
    SessionUser {
        id: 1,
        username: "root".to_string(),
        role: Role::Admin,
        permissions: Vec::new(),
        expired: false,
        expired_message: None,
    }
}

#[test]
fn admin_gets_the_full_dashboard() {
    let admin = admin();
    let tabs = visible_tabs(&admin);
    assert_eq!(
        tabs,
        vec![
            Tab::Home,
            Tab::StockAnalysis,
            Tab::MonthFilter,
            Tab::IndustryAnalysis,
            Tab::SourceCompare,
            Tab::Config,
            Tab::UserManagement,
            Tab::Account,
        ]
    );
    assert_eq!(resolve_default_tab(&admin, &tabs), Some(Tab::Home));
    assert!(export_visible(&admin));
    assert!(data_management_allowed(&admin));
}

#[test]
fn single_permission_analyst_sees_a_narrow_dashboard() {
    let analyst = user_with(&[perm::MONTH_FILTER]);
    let tabs = visible_tabs(&analyst);
    assert_eq!(tabs, vec![Tab::Home, Tab::MonthFilter, Tab::Account]);
    assert_eq!(resolve_default_tab(&analyst, &tabs), Some(Tab::Home));
    assert!(!export_visible(&analyst));
    assert!(!data_management_allowed(&analyst));
}

#[test]
fn either_stock_permission_unlocks_the_analysis_tab() {
    for code in [perm::STOCK_ANALYSIS_SINGLE, perm::STOCK_ANALYSIS_MULTI] {
        let analyst = user_with(&[code]);
        assert!(visible_tabs(&analyst).contains(&Tab::StockAnalysis));
    }
}

#[test]
fn landing_without_home_follows_priority() {
    let analyst = user_with(&[perm::SOURCE_COMPARE, perm::INDUSTRY_STATISTICS]);
    let mut tabs = visible_tabs(&analyst);
    tabs.retain(|t| *t != Tab::Home);
    // Industry analysis outranks source compare in the priority walk.
    assert_eq!(
        resolve_default_tab(&analyst, &tabs),
        Some(Tab::IndustryAnalysis)
    );
}

#[test]
fn admin_without_home_lands_on_stock_analysis() {
    let admin = admin();
    let mut tabs = visible_tabs(&admin);
    tabs.retain(|t| *t != Tab::Home);
    assert_eq!(resolve_default_tab(&admin, &tabs), Some(Tab::StockAnalysis));
}

#[test]
fn bare_account_still_has_somewhere_to_land() {
    let bare = user_with(&[]);
    let mut tabs = visible_tabs(&bare);
    tabs.retain(|t| *t != Tab::Home);
    assert_eq!(tabs, vec![Tab::Account]);
    assert_eq!(resolve_default_tab(&bare, &tabs), Some(Tab::Account));
}

#[test]
fn tab_identifiers_are_stable() {
    // These ids appear in saved links and scripts; renaming them is a
    // breaking change.
    let ids: Vec<&str> = visible_tabs(&admin()).iter().map(|t| t.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "home",
            "stock-analysis",
            "month-filter",
            "industry-analysis",
            "source-compare",
            "config",
            "user-management",
            "account",
        ]
    );
}

#[test]
fn export_and_data_management_are_separate_grants() {
    let exporter = user_with(&[perm::MONTH_FILTER, perm::EXPORT_EXCEL]);
    assert!(export_visible(&exporter));
    assert!(!data_management_allowed(&exporter));

    let operator = user_with(&[perm::DATA_MANAGEMENT]);
    assert!(!export_visible(&operator));
    assert!(data_management_allowed(&operator));
    // The grant gates the update actions, not any tab of its own.
    assert_eq!(visible_tabs(&operator), vec![Tab::Home, Tab::Account]);
}

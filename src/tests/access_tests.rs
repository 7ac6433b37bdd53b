use super::*;
use crate::model::perm;

fn user(role: Role, perms: &[&str]) -> SessionUser {
    SessionUser {
        id: 1,
        username: "t".into(),
        role,
        permissions: perms.iter().map(|s| s.to_string()).collect(),
        expired: false,
        expired_message: None,
    }
}

fn all_tabs() -> Vec<Tab> {
    TAB_REGISTRY.iter().map(|d| d.tab).collect()
}

#[test]
fn admin_sees_every_tab_even_with_empty_permissions() {
    let admin = user(Role::Admin, &[]);
    for def in TAB_REGISTRY {
        assert!(can_access_tab(&admin, def.tab), "admin blocked from {:?}", def.tab);
    }
}

#[test]
fn admin_ignores_permission_list_contents() {
    let admin = user(Role::Admin, &["something_unrelated"]);
    assert!(can_access_tab(&admin, Tab::Config));
    assert!(export_visible(&admin));
}

#[test]
fn user_access_matches_any_of_required_set() {
    let u = user(Role::User, &[perm::STOCK_ANALYSIS_MULTI]);
    assert!(can_access_tab(&u, Tab::StockAnalysis));
    assert!(!can_access_tab(&u, Tab::MonthFilter));
    assert!(!can_access_tab(&u, Tab::SourceCompare));
}

#[test]
fn unrestricted_tabs_visible_to_any_user() {
    let u = user(Role::User, &[]);
    assert!(can_access_tab(&u, Tab::Home));
    assert!(can_access_tab(&u, Tab::Account));
}

#[test]
fn admin_only_tabs_hidden_from_users_regardless_of_permissions() {
    let u = user(Role::User, &[perm::DATA_MANAGEMENT, perm::EXPORT_EXCEL]);
    assert!(!can_access_tab(&u, Tab::Config));
    assert!(!can_access_tab(&u, Tab::UserManagement));
}

#[test]
fn export_requires_export_excel_for_users() {
    assert!(!export_visible(&user(Role::User, &[perm::SOURCE_COMPARE])));
    assert!(export_visible(&user(Role::User, &[perm::EXPORT_EXCEL])));
}

#[test]
fn home_always_wins_as_default() {
    let u = user(Role::User, &[perm::MONTH_FILTER]);
    assert_eq!(resolve_default_tab(&u, &all_tabs()), Some(Tab::Home));
    let admin = user(Role::Admin, &[]);
    assert_eq!(resolve_default_tab(&admin, &all_tabs()), Some(Tab::Home));
}

#[test]
fn admin_without_home_prefers_stock_analysis() {
    let admin = user(Role::Admin, &[]);
    let present: Vec<Tab> = all_tabs().into_iter().filter(|t| *t != Tab::Home).collect();
    assert_eq!(resolve_default_tab(&admin, &present), Some(Tab::StockAnalysis));
}

#[test]
fn user_without_home_lands_on_first_permitted_priority_tab() {
    let u = user(Role::User, &[perm::SOURCE_COMPARE]);
    let present: Vec<Tab> = all_tabs().into_iter().filter(|t| *t != Tab::Home).collect();
    assert_eq!(resolve_default_tab(&u, &present), Some(Tab::SourceCompare));
}

#[test]
fn no_permissions_falls_back_to_first_visible_tab() {
    let u = user(Role::User, &[]);
    let present: Vec<Tab> = all_tabs().into_iter().filter(|t| *t != Tab::Home).collect();
    // Nothing in the priority list is accessible; account is the first
    // remaining unrestricted tab in registry order.
    assert_eq!(resolve_default_tab(&u, &present), Some(Tab::Account));
}

#[test]
fn nothing_accessible_yields_none() {
    let u = user(Role::User, &[]);
    assert_eq!(resolve_default_tab(&u, &[Tab::Config, Tab::UserManagement]), None);
}

#[test]
fn visibility_map_is_idempotent() {
    let u = user(Role::User, &[perm::INDUSTRY_TOP_STOCKS]);
    assert_eq!(visibility(&u), visibility(&u));
}

#[test]
fn visible_tabs_for_single_permission_user() {
    let u = user(Role::User, &[perm::SOURCE_COMPARE]);
    let tabs = visible_tabs(&u);
    assert!(tabs.contains(&Tab::Home));
    assert!(tabs.contains(&Tab::SourceCompare));
    assert!(tabs.contains(&Tab::Account));
    assert!(!tabs.contains(&Tab::StockAnalysis));
    assert!(!tabs.contains(&Tab::Config));
}

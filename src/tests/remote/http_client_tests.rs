use super::*;

#[test]
fn verbatim_server_message_passes_through() {
    assert_eq!(
        fail_message(Some("stock 600519 not found".into())),
        "stock 600519 not found"
    );
}

#[test]
fn empty_message_gets_the_generic_fallback() {
    assert_eq!(fail_message(None), "request failed");
    assert_eq!(fail_message(Some("   ".into())), "request failed");
}

#[test]
fn permission_markers_substitute_the_permission_message() {
    assert_eq!(
        fail_message(Some("permission denied for data update".into())),
        "you do not have the required permission"
    );
    // The backend localizes some denials.
    assert_eq!(
        fail_message(Some("您没有数据管理权限".into())),
        "you do not have the required permission"
    );
}

#[test]
fn not_logged_in_is_detectable_through_context_layers() {
    let err = anyhow::Error::new(NotLoggedIn).context("data status");
    assert!(err.downcast_ref::<NotLoggedIn>().is_some());
    // The rendered chain still carries the sign-in guidance.
    assert!(format!("{err:#}").contains("tickerboard login"));
}

#[test]
fn envelope_tolerates_missing_data_and_message() {
    let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
    assert!(env.success);
    assert!(env.data.is_none());
    assert!(env.message.is_none());
}

#[test]
fn auth_envelope_reads_user_key() {
    let env: AuthEnvelope = serde_json::from_str(
        r#"{"success": true, "user": {"id": 7, "username": "ops", "role": "admin"}}"#,
    )
    .unwrap();
    let user = env.user.unwrap();
    assert_eq!(user.username, "ops");
    assert!(user.permissions.is_empty());
    assert!(!user.expired);
}

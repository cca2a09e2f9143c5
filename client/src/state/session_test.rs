use super::*;

// =============================================================
// Session defaults
// =============================================================

#[test]
fn session_default_is_anonymous() {
    let session = Session::default();
    assert_eq!(session, Session::Anonymous);
    assert!(!session.is_logged_in());
    assert_eq!(session.user_id(), None);
}

// =============================================================
// Mutators
// =============================================================

#[test]
fn set_user_logs_in_with_id() {
    let mut session = Session::default();
    session.set_user("abc");
    assert!(session.is_logged_in());
    assert_eq!(session.user_id(), Some("abc"));
}

#[test]
fn set_user_replaces_previous_identity() {
    let mut session = Session::default();
    session.set_user("first");
    session.set_user("second");
    assert_eq!(session.user_id(), Some("second"));
}

#[test]
fn clear_user_returns_to_initial_state() {
    let mut session = Session::default();
    session.set_user("abc");
    session.clear_user();
    assert_eq!(session, Session::default());
}

#[test]
fn clear_user_is_idempotent() {
    let mut session = Session::default();
    session.clear_user();
    session.clear_user();
    assert_eq!(session, Session::Anonymous);
}

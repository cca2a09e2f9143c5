use std::cell::RefCell;

use super::*;
use crate::routes::ROUTES;
use crate::util::storage::{MemoryStorage, SESSION_RECORD_KEY, StorageScope};

fn protected_paths() -> Vec<String> {
    ROUTES
        .iter()
        .filter(|route| route.requires_auth)
        .map(|route| route.path.replace(":id", "42"))
        .collect()
}

fn public_paths() -> Vec<String> {
    ROUTES.iter().filter(|route| !route.requires_auth).map(|route| route.path.to_owned()).collect()
}

fn user(id: &str) -> AuthUser {
    AuthUser { id: id.to_owned(), username: None, email: None, subscription_plan: None }
}

// =============================================================
// Rehydration
// =============================================================

#[test]
fn rehydrate_without_record_is_anonymous() {
    assert_eq!(rehydrate(&MemoryStorage::new()), Session::Anonymous);
}

#[test]
fn rehydrate_restores_identity_from_session_scope() {
    let storage = MemoryStorage::new().with_item(StorageScope::Session, SESSION_RECORD_KEY, r#"{"id":"tab"}"#);
    assert_eq!(rehydrate(&storage), Session::Authenticated { user_id: "tab".to_owned() });
}

// =============================================================
// Guard decisions
// =============================================================

#[test]
fn protected_routes_redirect_when_anonymous_and_nothing_stored() {
    for path in protected_paths() {
        let storage = MemoryStorage::new();
        let mut session = Session::Anonymous;
        assert_eq!(
            evaluate_navigation(&mut session, &storage, &path),
            NavigationDecision::Redirect { to: LOGIN_PATH },
            "path {path}"
        );
        assert_eq!(session, Session::Anonymous);
    }
}

#[test]
fn protected_routes_proceed_after_rehydration() {
    for path in protected_paths() {
        let storage = MemoryStorage::new().with_item(StorageScope::Local, SESSION_RECORD_KEY, r#"{"id":"u1"}"#);
        let mut session = Session::Anonymous;
        assert_eq!(evaluate_navigation(&mut session, &storage, &path), NavigationDecision::Proceed, "path {path}");
        assert_eq!(session, Session::Authenticated { user_id: "u1".to_owned() });
    }
}

#[test]
fn public_routes_proceed_regardless_of_session() {
    for path in public_paths() {
        let mut session = Session::Anonymous;
        assert_eq!(evaluate_navigation(&mut session, &MemoryStorage::new(), &path), NavigationDecision::Proceed);
    }
}

#[test]
fn authenticated_navigation_does_not_read_storage() {
    for path in public_paths().into_iter().chain(protected_paths()) {
        let storage = MemoryStorage::new();
        let mut session = Session::Authenticated { user_id: "abc".to_owned() };
        assert_eq!(evaluate_navigation(&mut session, &storage, &path), NavigationDecision::Proceed);
        assert_eq!(storage.reads(), 0, "path {path}");
    }
}

#[test]
fn myurls_with_local_record_logs_in_and_proceeds() {
    let storage = MemoryStorage::new().with_item(StorageScope::Local, SESSION_RECORD_KEY, r#"{"id":"u1"}"#);
    let mut session = Session::Anonymous;

    let decision = evaluate_navigation(&mut session, &storage, "/myurls");

    assert_eq!(decision, NavigationDecision::Proceed);
    assert!(session.is_logged_in());
    assert_eq!(session.user_id(), Some("u1"));
}

#[test]
fn statistics_without_record_redirects_to_login() {
    let storage = MemoryStorage::new();
    let mut session = Session::Anonymous;

    let decision = evaluate_navigation(&mut session, &storage, "/statistics/42");

    assert_eq!(decision.redirect_target(), Some("/login"));
    assert_eq!(session, Session::Anonymous);
}

#[test]
fn malformed_record_is_treated_as_absent() {
    let storage = MemoryStorage::new().with_item(StorageScope::Local, SESSION_RECORD_KEY, "not-json");
    let mut session = Session::Anonymous;

    assert_eq!(
        evaluate_navigation(&mut session, &storage, "/myurls"),
        NavigationDecision::Redirect { to: LOGIN_PATH }
    );
    assert_eq!(evaluate_navigation(&mut session, &storage, "/plans"), NavigationDecision::Proceed);
    assert_eq!(session, Session::Anonymous);
}

#[test]
fn anonymous_navigation_rereads_storage_each_time() {
    let storage = MemoryStorage::new();
    let mut session = Session::Anonymous;

    evaluate_navigation(&mut session, &storage, "/myurls");
    let after_first = storage.reads();
    evaluate_navigation(&mut session, &storage, "/myurls");

    assert!(after_first > 0);
    assert_eq!(storage.reads(), after_first * 2);
}

#[test]
fn record_written_later_is_picked_up() {
    let storage = MemoryStorage::new();
    let mut session = Session::Anonymous;
    assert!(evaluate_navigation(&mut session, &storage, "/myurls").redirect_target().is_some());

    storage.set_item(StorageScope::Local, SESSION_RECORD_KEY, r#"{"id":"other-tab"}"#).unwrap();

    assert_eq!(evaluate_navigation(&mut session, &storage, "/myurls"), NavigationDecision::Proceed);
    assert_eq!(session.user_id(), Some("other-tab"));
}

#[test]
fn unknown_paths_proceed() {
    let mut session = Session::Anonymous;
    assert_eq!(
        evaluate_navigation(&mut session, &MemoryStorage::new(), "/no/such/page"),
        NavigationDecision::Proceed
    );
}

// =============================================================
// Login / logout
// =============================================================

#[test]
fn complete_login_persists_and_authenticates() {
    let storage = MemoryStorage::new();
    let mut session = Session::Anonymous;

    complete_login(&mut session, &storage, &user("u5"), true).unwrap();

    assert_eq!(session.user_id(), Some("u5"));
    assert_eq!(rehydrate(&storage), Session::Authenticated { user_id: "u5".to_owned() });
}

#[test]
fn complete_login_without_remember_uses_session_scope() {
    let storage = MemoryStorage::new();
    let mut session = Session::Anonymous;

    complete_login(&mut session, &storage, &user("u6"), false).unwrap();

    assert!(storage.contains(StorageScope::Session, SESSION_RECORD_KEY));
    assert!(!storage.contains(StorageScope::Local, SESSION_RECORD_KEY));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn complete_login_authenticates_even_if_storage_fails() {
    let mut session = Session::Anonymous;
    let result = complete_login(&mut session, &crate::util::storage::BrowserStorage, &user("u7"), true);
    assert!(result.is_err());
    assert_eq!(session.user_id(), Some("u7"));
}

#[test]
fn logout_clears_session_and_storage() {
    let storage = MemoryStorage::new();
    let mut session = Session::Anonymous;
    complete_login(&mut session, &storage, &user("u8"), true).unwrap();

    logout(&mut session, &storage);

    assert_eq!(session, Session::Anonymous);
    assert_eq!(
        evaluate_navigation(&mut session, &storage, "/myurls"),
        NavigationDecision::Redirect { to: LOGIN_PATH }
    );
}

// =============================================================
// Protected-view gate
// =============================================================

#[test]
fn protected_views_are_not_rendered_while_anonymous() {
    for path in protected_paths() {
        assert!(!may_render(&Session::Anonymous, &path), "path {path}");
    }
}

#[test]
fn protected_views_render_once_authenticated() {
    let session = Session::Authenticated { user_id: "u1".to_owned() };
    for path in protected_paths().into_iter().chain(public_paths()) {
        assert!(may_render(&session, &path), "path {path}");
    }
}

#[test]
fn public_and_unknown_views_render_while_anonymous() {
    for path in public_paths().into_iter().chain(["/nope".to_owned()]) {
        assert!(may_render(&Session::Anonymous, &path), "path {path}");
    }
}

// =============================================================
// Reactive binding
// =============================================================

type NavigateLog = RefCell<Vec<(String, bool)>>;

fn recording_navigate(log: &NavigateLog) -> impl Fn(&str, NavigateOptions) + '_ {
    move |to: &str, options: NavigateOptions| log.borrow_mut().push((to.to_owned(), options.replace))
}

#[test]
fn guard_redirects_with_replace_and_leaves_session_anonymous() {
    let owner = Owner::new();
    owner.with(|| {
        let session = RwSignal::new(Session::Anonymous);
        let log = NavigateLog::default();

        let decision = guard_navigation(session, &MemoryStorage::new(), "/statistics/abc", &recording_navigate(&log));

        assert_eq!(decision, NavigationDecision::Redirect { to: LOGIN_PATH });
        assert_eq!(*log.borrow(), vec![(LOGIN_PATH.to_owned(), true)]);
        assert_eq!(session.get_untracked(), Session::Anonymous);
    });
}

#[test]
fn guard_writes_restored_identity_into_signal_without_navigating() {
    let owner = Owner::new();
    owner.with(|| {
        let session = RwSignal::new(Session::Anonymous);
        let storage = MemoryStorage::new().with_item(StorageScope::Local, SESSION_RECORD_KEY, r#"{"id":"u1"}"#);
        let log = NavigateLog::default();

        let decision = guard_navigation(session, &storage, "/myurls", &recording_navigate(&log));

        assert_eq!(decision, NavigationDecision::Proceed);
        assert!(log.borrow().is_empty());
        assert_eq!(session.get_untracked(), Session::Authenticated { user_id: "u1".to_owned() });
        assert!(session.with_untracked(|s| may_render(s, "/myurls")));
    });
}

#[test]
fn guard_follows_a_navigation_sequence() {
    let owner = Owner::new();
    owner.with(|| {
        let session = RwSignal::new(Session::Anonymous);
        let storage = MemoryStorage::new();
        let log = NavigateLog::default();
        let navigate = recording_navigate(&log);

        guard_navigation(session, &storage, "/", &navigate);
        guard_navigation(session, &storage, "/myurls", &navigate);
        storage.set_item(StorageScope::Session, SESSION_RECORD_KEY, r#"{"id":"late"}"#).unwrap();
        guard_navigation(session, &storage, "/myurls", &navigate);
        session.update(|s| logout(s, &storage));
        guard_navigation(session, &storage, "/statistics/xyz", &navigate);

        assert_eq!(*log.borrow(), vec![(LOGIN_PATH.to_owned(), true), (LOGIN_PATH.to_owned(), true)]);
        assert_eq!(session.get_untracked(), Session::Anonymous);
    });
}

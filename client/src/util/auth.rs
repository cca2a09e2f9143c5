//! Navigation guard and session lifecycle helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route transition runs [`evaluate_navigation`]: while the session is
//! anonymous it first tries to restore the identity from durable storage, then
//! redirects to `/login` if the target route requires authentication.
//!
//! DESIGN
//! ======
//! The decision logic is plain functions over `&mut Session` and a
//! [`SessionStorage`], so it is testable without a reactive runtime.
//! [`guard_navigation`] applies one decision to the session signal and the
//! router, and [`install_navigation_guard`] re-runs it on every path change.
//! Effects run after render, so protected views are additionally wrapped in
//! a gate driven by [`may_render`]; they are never built for an anonymous
//! session, including during server rendering. Rehydration is not memoized:
//! a record written later (e.g. by another tab) is picked up on the next
//! anonymous navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::AuthUser;
use crate::routes::{LOGIN_PATH, requires_auth};
use crate::state::session::Session;
use crate::util::storage::{
    DurableSessionRecord, SessionStorage, StorageError, clear_session_record, read_session_record, write_session_record,
};

/// Outcome of guarding one navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect { to: &'static str },
}

impl NavigationDecision {
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Proceed => None,
            Self::Redirect { to } => Some(to),
        }
    }
}

/// Restore a session from durable storage.
///
/// Returns `Anonymous` when no valid record is stored in either scope.
pub fn rehydrate<S>(storage: &S) -> Session
where
    S: SessionStorage + ?Sized,
{
    read_session_record(storage).map_or(Session::Anonymous, |record| Session::Authenticated { user_id: record.id })
}

/// Decide whether navigation to `target_path` may proceed.
///
/// Storage is only read while `session` is anonymous; a restored identity is
/// written into `session`. Paths that match no route always proceed.
pub fn evaluate_navigation<S>(session: &mut Session, storage: &S, target_path: &str) -> NavigationDecision
where
    S: SessionStorage + ?Sized,
{
    if !session.is_logged_in() {
        if let Session::Authenticated { user_id } = rehydrate(storage) {
            session.set_user(user_id);
        }
    }

    if may_render(session, target_path) {
        NavigationDecision::Proceed
    } else {
        NavigationDecision::Redirect { to: LOGIN_PATH }
    }
}

/// Whether the view for `path` may be built for `session` as it stands.
///
/// Unlike [`evaluate_navigation`] this never touches storage.
pub fn may_render(session: &Session, path: &str) -> bool {
    session.is_logged_in() || !requires_auth(path)
}

/// Record a successful login: persist the identity, then mark the session.
///
/// `remember` selects `localStorage` over `sessionStorage`. The session is
/// logged in even when persisting fails; only reload survival is lost.
///
/// # Errors
///
/// Returns the [`StorageError`] from writing the durable record.
pub fn complete_login<S>(session: &mut Session, storage: &S, user: &AuthUser, remember: bool) -> Result<(), StorageError>
where
    S: SessionStorage + ?Sized,
{
    let persisted = write_session_record(storage, &DurableSessionRecord::from(user), remember);
    session.set_user(user.id.clone());
    persisted
}

/// Forget the current identity in memory and in both storage scopes.
pub fn logout<S>(session: &mut Session, storage: &S)
where
    S: SessionStorage + ?Sized,
{
    clear_session_record(storage);
    session.clear_user();
}

/// Guard one navigation to `path` against the session signal.
///
/// A restored identity is written back into `session`; a redirect replaces
/// the current history entry so "back" does not return to the blocked route.
pub fn guard_navigation<S, F>(session: RwSignal<Session>, storage: &S, path: &str, navigate: &F) -> NavigationDecision
where
    S: SessionStorage + ?Sized,
    F: Fn(&str, NavigateOptions),
{
    let mut next = session.get_untracked();
    let decision = evaluate_navigation(&mut next, storage, path);
    if next != session.get_untracked() {
        session.set(next);
    }
    if let Some(to) = decision.redirect_target() {
        leptos::logging::log!("navigation to {path} requires login");
        navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
    decision
}

/// Run [`guard_navigation`] whenever `current_path` changes.
pub fn install_navigation_guard<S, P, F>(session: RwSignal<Session>, storage: S, current_path: P, navigate: F)
where
    S: SessionStorage + 'static,
    P: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        let path = current_path();
        guard_navigation(session, &storage, &path, &navigate);
    });
}

//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the navigation guard and user-aware pages. The root component owns
//! a single `RwSignal<Session>`; only login, logout and rehydration write it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Authentication state of the current browser session.
///
/// A logged-in session always carries a user id, so "logged in without an
/// identity" cannot be represented.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user_id: String,
    },
}

impl Session {
    /// Mark the session as logged in as `id`.
    pub fn set_user(&mut self, id: impl Into<String>) {
        *self = Self::Authenticated { user_id: id.into() };
    }

    /// Reset to the anonymous state.
    pub fn clear_user(&mut self) {
        *self = Self::Anonymous;
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_id } => Some(user_id),
        }
    }
}

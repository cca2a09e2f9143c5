//! Durable session record storage in `localStorage` / `sessionStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login writes a small `{ id, ... }` JSON blob under the `"user"` key; the
//! navigation guard reads it back to restore a session after a reload. Two
//! scopes exist: `Local` survives browser restarts ("remember me") and
//! `Session` lives as long as the tab.
//!
//! TRADE-OFFS
//! ==========
//! [`BrowserStorage`] is inert outside the `hydrate` build so server rendering
//! is deterministic. Tests use [`MemoryStorage`], which also counts reads.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::net::types::{AuthUser, deserialize_id};

/// Storage key holding the durable session record.
pub const SESSION_RECORD_KEY: &str = "user";

/// Browser storage area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// `localStorage`: survives browser restarts.
    Local,
    /// `sessionStorage`: cleared when the tab closes.
    Session,
}

impl StorageScope {
    /// Scopes in the order they are consulted when reading.
    pub const READ_ORDER: [Self; 2] = [Self::Local, Self::Session];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

/// Errors produced when writing to storage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("{} is unavailable", .0.as_str())]
    Unavailable(StorageScope),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("session record encode failed: {0}")]
    Encode(String),
}

/// Key-value access to the two browser storage scopes.
pub trait SessionStorage {
    fn get_item(&self, scope: StorageScope, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the scope is unavailable or full.
    fn set_item(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, scope: StorageScope, key: &str);
}

/// `web-sys` backed storage for the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn browser_scope(scope: StorageScope) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match scope {
        StorageScope::Local => window.local_storage().ok().flatten(),
        StorageScope::Session => window.session_storage().ok().flatten(),
    }
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, scope: StorageScope, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            browser_scope(scope)?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (scope, key);
            None
        }
    }

    fn set_item(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = browser_scope(scope).ok_or(StorageError::Unavailable(scope))?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable(scope))
        }
    }

    fn remove_item(&self, scope: StorageScope, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = browser_scope(scope) {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (scope, key);
        }
    }
}

/// In-process storage for tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<(StorageScope, String), String>>,
    reads: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for test setup.
    #[must_use]
    pub fn with_item(self, scope: StorageScope, key: &str, value: &str) -> Self {
        self.items.borrow_mut().insert((scope, key.to_owned()), value.to_owned());
        self
    }

    /// Number of `get_item` calls made so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn contains(&self, scope: StorageScope, key: &str) -> bool {
        self.items.borrow().contains_key(&(scope, key.to_owned()))
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, scope: StorageScope, key: &str) -> Option<String> {
        self.reads.set(self.reads.get() + 1);
        self.items.borrow().get(&(scope, key.to_owned())).cloned()
    }

    fn set_item(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert((scope, key.to_owned()), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, scope: StorageScope, key: &str) {
        self.items.borrow_mut().remove(&(scope, key.to_owned()));
    }
}

/// Serialized identity kept in browser storage between page loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableSessionRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&AuthUser> for DurableSessionRecord {
    fn from(user: &AuthUser) -> Self {
        Self { id: user.id.clone(), username: user.username.clone(), email: user.email.clone() }
    }
}

/// Parse a stored record; malformed JSON or a blank id yields `None`.
pub fn parse_session_record(raw: &str) -> Option<DurableSessionRecord> {
    let record: DurableSessionRecord = serde_json::from_str(raw).ok()?;
    if record.id.trim().is_empty() {
        return None;
    }
    Some(record)
}

/// Read the first valid record, consulting `Local` before `Session`.
///
/// A scope holding an unparseable record is treated as empty.
pub fn read_session_record<S>(storage: &S) -> Option<DurableSessionRecord>
where
    S: SessionStorage + ?Sized,
{
    StorageScope::READ_ORDER.into_iter().find_map(|scope| {
        let raw = storage.get_item(scope, SESSION_RECORD_KEY)?;
        let record = parse_session_record(&raw);
        if record.is_none() {
            leptos::logging::warn!("ignoring malformed session record in {}", scope.as_str());
        }
        record
    })
}

/// Persist `record` in `Local` when `remember` is set, otherwise in `Session`.
///
/// The other scope is cleared so a stale identity cannot shadow this one.
///
/// # Errors
///
/// Returns a [`StorageError`] if the record cannot be encoded or written.
pub fn write_session_record<S>(storage: &S, record: &DurableSessionRecord, remember: bool) -> Result<(), StorageError>
where
    S: SessionStorage + ?Sized,
{
    let (target, other) =
        if remember { (StorageScope::Local, StorageScope::Session) } else { (StorageScope::Session, StorageScope::Local) };
    let raw = serde_json::to_string(record).map_err(|e| StorageError::Encode(e.to_string()))?;
    storage.remove_item(other, SESSION_RECORD_KEY);
    storage.set_item(target, SESSION_RECORD_KEY, &raw)
}

/// Remove the record from both scopes.
pub fn clear_session_record<S>(storage: &S)
where
    S: SessionStorage + ?Sized,
{
    for scope in StorageScope::READ_ORDER {
        storage.remove_item(scope, SESSION_RECORD_KEY);
    }
}

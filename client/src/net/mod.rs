//! Networking modules for the SnapLink backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues REST calls and `types` defines the JSON wire schema shared
//! with durable session storage.

pub mod api;
pub mod types;

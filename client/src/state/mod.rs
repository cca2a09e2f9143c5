//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so components depend on small focused models.
//! The root component owns one signal per model and provides it via context.

pub mod session;

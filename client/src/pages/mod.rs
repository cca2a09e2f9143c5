//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! One page per entry in [`crate::routes::ROUTES`]. Pages own form state and
//! call into `net::api` and `util::auth`; access control lives in the guard
//! and in the `RequireAuth` wrapper `app` puts around protected pages.

pub mod forgot_password;
pub mod home;
pub mod login;
pub mod my_urls;
pub mod plans;
pub mod signup;
pub mod statistics;

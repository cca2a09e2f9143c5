//! Backend API location, fixed at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so the backend base
//! URL is read from `SNAPLINK_API_BASE` when the crate is compiled. An empty
//! base means the backend is served from the same origin as the app.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Build-time environment variable naming the backend base URL.
pub const API_BASE_ENV: &str = "SNAPLINK_API_BASE";

/// Backend endpoints used by [`crate::net::api`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash (empty for same-origin).
    pub base_url: String,
}

impl ApiConfig {
    /// Read the base URL baked in at compile time.
    pub fn from_build_env() -> Self {
        Self::from_raw(option_env!("SNAPLINK_API_BASE"))
    }

    /// Build a config from an optional raw base URL.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let base_url = raw.unwrap_or_default().trim().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    /// Join `path` (which must start with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn shorten_endpoint(&self) -> String {
        self.endpoint("/shorten")
    }

    pub fn login_endpoint(&self) -> String {
        self.endpoint("/api/auth/login")
    }

    pub fn signup_endpoint(&self) -> String {
        self.endpoint("/api/auth/signup")
    }

    pub fn forgot_password_endpoint(&self) -> String {
        self.endpoint("/api/auth/forgot-password")
    }

    /// `GET /search?query=...` listing one user's short URLs.
    pub fn search_endpoint(&self, query: &str) -> String {
        self.endpoint(&format!("/search?query={}", encode_component(query)))
    }

    pub fn click_details_endpoint(&self) -> String {
        self.endpoint("/analytics/details")
    }

    /// `DELETE /{code}`; also the public short link itself.
    pub fn short_code_endpoint(&self, short_code: &str) -> String {
        self.endpoint(&format!("/{}", encode_component(short_code)))
    }

    pub fn update_short_code_endpoint(&self) -> String {
        self.endpoint("/update-shortcode")
    }
}

/// Percent-encode everything outside the URL unreserved set.
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

//! Wire DTOs for the SnapLink REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. User ids arrive as strings
//! from current backends but older ones emit numbers, so ids are normalized to
//! `String` on the way in.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /shorten`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShortenRequest {
    pub url: String,
    /// Custom suffix; empty when the backend should pick one.
    pub alias: String,
}

/// Successful `POST /shorten` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub subscription_plan: String,
}

/// Body of `POST /api/auth/forgot-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// User returned by login and signup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subscription_plan: Option<String>,
}

/// Plain `{ "message": ... }` response body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One entry of `GET /search?query=<user id>`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlSummary {
    pub short_code: String,
    pub long_url: String,
    #[serde(default)]
    pub click_count: u64,
}

/// Body of `POST /analytics/details`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickDetailsRequest {
    pub short_code: String,
}

/// One recorded click. The backend sends an open string map; keys seen in
/// practice are `timestamp`, `ipAddress`, `referrer`, `geoLocation` and
/// `userAgent`.
pub type ClickDetail = BTreeMap<String, String>;

/// Columns shown for a click, as `(key, heading)`.
pub const CLICK_DETAIL_COLUMNS: [(&str, &str); 5] = [
    ("timestamp", "When"),
    ("ipAddress", "IP address"),
    ("referrer", "Referrer"),
    ("geoLocation", "Location"),
    ("userAgent", "User agent"),
];

/// Body of `PUT /update-shortcode`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShortCodeRequest {
    pub old_code: String,
    pub new_code: String,
}

/// Accept a user id encoded as a JSON string or integer.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("expected string or integer id, got {other}"))),
    }
}

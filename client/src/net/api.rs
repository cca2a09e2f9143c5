//! REST API helpers for communicating with the SnapLink backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): calls return [`ApiError::Unavailable`] since the backend
//! is only reached from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call makes a single attempt and returns a structured [`ApiError`] so
//! pages can tell bad input, transport failures and server rejections apart.
//! Failures are logged at warn level before they are returned.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    AuthUser, ClickDetail, ClickDetailsRequest, ForgotPasswordRequest, LoginRequest, MessageResponse, ShortUrlSummary,
    ShortenRequest, ShortenResponse, SignupRequest, UpdateShortCodeRequest,
};
use crate::config::ApiConfig;

/// Errors produced by backend API calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input was rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),

    /// No HTTP client is available in this build (server-side rendering).
    #[error("backend is not reachable from this build")]
    Unavailable,
}

impl ApiError {
    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(reason) => (*reason).to_owned(),
            Self::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
            Self::Status { status: 401, .. } => "Invalid email or password.".to_owned(),
            Self::Status { message, .. } => message.clone(),
            Self::Parse(_) | Self::Unavailable => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

/// Validate shortening input and build the request body.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for a blank or non-HTTP URL, or an alias
/// containing characters other than ASCII letters, digits, `-` and `_`.
pub fn validate_shorten_input(long_url: &str, alias: Option<&str>) -> Result<ShortenRequest, ApiError> {
    let url = long_url.trim();
    if url.is_empty() {
        return Err(ApiError::InvalidInput("Enter a URL to shorten."));
    }
    let host = strip_scheme(url, "https://").or_else(|| strip_scheme(url, "http://"));
    if host.is_none_or(str::is_empty) {
        return Err(ApiError::InvalidInput("URL must start with http:// or https://."));
    }
    let alias = alias.map(str::trim).unwrap_or_default();
    if !is_short_code_text(alias) {
        return Err(ApiError::InvalidInput("Alias may only contain letters, digits, '-' and '_'."));
    }
    Ok(ShortenRequest { url: url.to_owned(), alias: alias.to_owned() })
}

fn is_short_code_text(code: &str) -> bool {
    code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn strip_scheme<'a>(url: &'a str, scheme: &str) -> Option<&'a str> {
    let head = url.get(..scheme.len())?;
    head.eq_ignore_ascii_case(scheme).then(|| &url[scheme.len()..])
}

/// Validate login input.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] when either field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::InvalidInput("Enter both email and password."));
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

/// Validate signup input.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for blank fields or mismatched passwords.
pub fn validate_signup_input(request: SignupRequest) -> Result<SignupRequest, ApiError> {
    let request = SignupRequest {
        username: request.username.trim().to_owned(),
        email: request.email.trim().to_owned(),
        ..request
    };
    if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::InvalidInput("Fill in username, email and password."));
    }
    if request.password != request.confirm_password {
        return Err(ApiError::InvalidInput("Passwords do not match."));
    }
    Ok(request)
}

/// Validate an existing short code before addressing it.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] when the code is blank.
pub fn validate_short_code(short_code: &str) -> Result<String, ApiError> {
    let short_code = short_code.trim();
    if short_code.is_empty() {
        return Err(ApiError::InvalidInput("Missing short code."));
    }
    Ok(short_code.to_owned())
}

/// Validate a rename from `old_code` to `new_code`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for a blank code, a new code with
/// characters other than ASCII letters, digits, `-` and `_`, or an unchanged code.
pub fn validate_update_short_code(old_code: &str, new_code: &str) -> Result<UpdateShortCodeRequest, ApiError> {
    let (old_code, new_code) = (old_code.trim(), new_code.trim());
    if old_code.is_empty() || new_code.is_empty() {
        return Err(ApiError::InvalidInput("Both oldCode and newCode must be provided."));
    }
    if !is_short_code_text(new_code) {
        return Err(ApiError::InvalidInput("Short code may only contain letters, digits, '-' and '_'."));
    }
    if old_code == new_code {
        return Err(ApiError::InvalidInput("The new short code is the same as the current one."));
    }
    Ok(UpdateShortCodeRequest { old_code: old_code.to_owned(), new_code: new_code.to_owned() })
}

/// Shorten `long_url`, optionally under a custom `alias`.
///
/// Sends `POST {base}/shorten` with `{ url, alias }` and returns `shortUrl`.
///
/// # Errors
///
/// Returns an [`ApiError`] describing why no short URL was produced.
pub async fn shorten_url(config: &ApiConfig, long_url: &str, alias: Option<&str>) -> Result<String, ApiError> {
    let request = validate_shorten_input(long_url, alias)?;
    let result = post_json::<_, ShortenResponse>(&config.shorten_endpoint(), &request)
        .await
        .map(|body| body.short_url);
    if let Err(e) = &result {
        leptos::logging::warn!("shorten failed: {e}");
    }
    result
}

/// Log in with email and password via `POST {base}/api/auth/login`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with status 401 for bad credentials.
pub async fn login(config: &ApiConfig, email: &str, password: &str) -> Result<AuthUser, ApiError> {
    let request = validate_login_input(email, password)?;
    let result = post_json::<_, AuthUser>(&config.login_endpoint(), &request).await;
    if let Err(e) = &result {
        leptos::logging::warn!("login failed: {e}");
    }
    result
}

/// Create an account via `POST {base}/api/auth/signup`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with status 409 when the email or username is taken.
pub async fn signup(config: &ApiConfig, request: SignupRequest) -> Result<AuthUser, ApiError> {
    let request = validate_signup_input(request)?;
    let result = post_json::<_, AuthUser>(&config.signup_endpoint(), &request).await;
    if let Err(e) = &result {
        leptos::logging::warn!("signup failed: {e}");
    }
    result
}

/// Ask the backend to email a password reset link.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with status 404 for an unknown email.
pub async fn request_password_reset(config: &ApiConfig, email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::InvalidInput("Enter your email first."));
    }
    let request = ForgotPasswordRequest { email: email.to_owned() };
    let result = post_json::<_, MessageResponse>(&config.forgot_password_endpoint(), &request)
        .await
        .map(|body| body.message);
    if let Err(e) = &result {
        leptos::logging::warn!("password reset request failed: {e}");
    }
    result
}

/// List the short URLs owned by `user_id` with their click counts.
///
/// Sends `GET {base}/search?query=<user id>`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] without a user id, otherwise the
/// transport or server failure.
pub async fn list_short_urls(config: &ApiConfig, user_id: &str) -> Result<Vec<ShortUrlSummary>, ApiError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::InvalidInput("Sign in to see your links."));
    }
    let result = get_json::<Vec<ShortUrlSummary>>(&config.search_endpoint(user_id)).await;
    if let Err(e) = &result {
        leptos::logging::warn!("listing short urls failed: {e}");
    }
    result
}

/// Fetch per-click details for one short code via `POST {base}/analytics/details`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for a blank code; the backend answers
/// 400 for one as well.
pub async fn click_details(config: &ApiConfig, short_code: &str) -> Result<Vec<ClickDetail>, ApiError> {
    let request = ClickDetailsRequest { short_code: validate_short_code(short_code)? };
    let result = post_json::<_, Vec<ClickDetail>>(&config.click_details_endpoint(), &request).await;
    if let Err(e) = &result {
        leptos::logging::warn!("click details for {} failed: {e}", request.short_code);
    }
    result
}

/// Delete a short URL via `DELETE {base}/{code}`; returns the backend's
/// confirmation text.
///
/// # Errors
///
/// Returns an [`ApiError`] when the code is blank or the call fails.
pub async fn delete_short_url(config: &ApiConfig, short_code: &str) -> Result<String, ApiError> {
    let short_code = validate_short_code(short_code)?;
    let result = delete_text(&config.short_code_endpoint(&short_code)).await;
    if let Err(e) = &result {
        leptos::logging::warn!("delete {short_code} failed: {e}");
    }
    result
}

/// Rename a short code via `PUT {base}/update-shortcode`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with status 400 and the backend's plain-text
/// reason when the new code is taken or the old one does not exist.
pub async fn update_short_code(config: &ApiConfig, old_code: &str, new_code: &str) -> Result<String, ApiError> {
    let request = validate_update_short_code(old_code, new_code)?;
    let result = put_json_text(&config.update_short_code_endpoint(), &request).await;
    if let Err(e) = &result {
        leptos::logging::warn!("renaming {} failed: {e}", request.old_code);
    }
    result
}

#[cfg(feature = "hydrate")]
async fn get_json<Resp>(url: &str) -> Result<Resp, ApiError>
where
    Resp: DeserializeOwned,
{
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        let text = resp.text().await.unwrap_or_default();
        return Err(status_error(resp.status(), &text));
    }
    resp.json::<Resp>().await.map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
async fn get_json<Resp>(url: &str) -> Result<Resp, ApiError>
where
    Resp: DeserializeOwned,
{
    let _ = url;
    Err(ApiError::Unavailable)
}

#[cfg(feature = "hydrate")]
async fn delete_text(url: &str) -> Result<String, ApiError> {
    let resp = gloo_net::http::Request::delete(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_text(resp).await
}

#[cfg(not(feature = "hydrate"))]
async fn delete_text(url: &str) -> Result<String, ApiError> {
    let _ = url;
    Err(ApiError::Unavailable)
}

#[cfg(feature = "hydrate")]
async fn put_json_text<Req>(url: &str, body: &Req) -> Result<String, ApiError>
where
    Req: Serialize,
{
    let resp = gloo_net::http::Request::put(url)
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_text(resp).await
}

#[cfg(not(feature = "hydrate"))]
async fn put_json_text<Req>(url: &str, body: &Req) -> Result<String, ApiError>
where
    Req: Serialize,
{
    let _ = (url, body);
    Err(ApiError::Unavailable)
}

#[cfg(feature = "hydrate")]
async fn read_text(resp: gloo_net::http::Response) -> Result<String, ApiError> {
    let status = resp.status();
    let ok = resp.ok();
    let text = resp.text().await.map_err(|e| ApiError::Parse(e.to_string()))?;
    if !ok {
        return Err(status_error(status, &text));
    }
    Ok(text)
}

#[cfg(feature = "hydrate")]
async fn post_json<Req, Resp>(url: &str, body: &Req) -> Result<Resp, ApiError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        let text = resp.text().await.unwrap_or_default();
        return Err(status_error(resp.status(), &text));
    }
    resp.json::<Resp>().await.map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
async fn post_json<Req, Resp>(url: &str, body: &Req) -> Result<Resp, ApiError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let _ = (url, body);
    Err(ApiError::Unavailable)
}

/// Map a non-success response to [`ApiError::Status`].
///
/// The message comes from the JSON `error` or `message` field, else from a
/// plain-text body (the link endpoints answer 400 with bare text), else a
/// generic description. HTML error pages are never shown verbatim.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> ApiError {
    let text = body.trim();
    let message = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str).map(str::to_owned)),
        Err(_) if !text.is_empty() && !text.starts_with('<') => Some(text.to_owned()),
        Err(_) => None,
    }
    .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Status { status, message }
}

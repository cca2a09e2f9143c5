use super::*;
use futures::executor::block_on;

// =============================================================
// Input validation
// =============================================================

#[test]
fn validate_shorten_input_trims_and_defaults_alias() {
    let request = validate_shorten_input("  https://example.com/a  ", None).unwrap();
    assert_eq!(request.url, "https://example.com/a");
    assert_eq!(request.alias, "");
}

#[test]
fn validate_shorten_input_keeps_alias() {
    let request = validate_shorten_input("http://example.com", Some(" my-link_1 ")).unwrap();
    assert_eq!(request.alias, "my-link_1");
}

#[test]
fn validate_shorten_input_rejects_blank_url() {
    assert_eq!(
        validate_shorten_input("   ", None),
        Err(ApiError::InvalidInput("Enter a URL to shorten."))
    );
}

#[test]
fn validate_shorten_input_requires_http_scheme() {
    let expected = Err(ApiError::InvalidInput("URL must start with http:// or https://."));
    assert_eq!(validate_shorten_input("example.com", None), expected);
    assert_eq!(validate_shorten_input("ftp://example.com", None), expected);
    assert_eq!(validate_shorten_input("https://", None), expected);
}

#[test]
fn validate_shorten_input_scheme_is_case_insensitive() {
    assert!(validate_shorten_input("HTTPS://Example.com", None).is_ok());
}

#[test]
fn validate_shorten_input_rejects_bad_alias() {
    assert_eq!(
        validate_shorten_input("https://example.com", Some("has space")),
        Err(ApiError::InvalidInput("Alias may only contain letters, digits, '-' and '_'."))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert!(validate_login_input("a@b.com", "").is_err());
    assert!(validate_login_input("  ", "pw").is_err());
    let request = validate_login_input(" a@b.com ", "pw").unwrap();
    assert_eq!(request.email, "a@b.com");
}

fn signup_request(password: &str, confirm: &str) -> SignupRequest {
    SignupRequest {
        username: " ana ".to_owned(),
        email: "ana@example.com".to_owned(),
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
        subscription_plan: "free".to_owned(),
    }
}

#[test]
fn validate_signup_input_trims_identity_fields() {
    let request = validate_signup_input(signup_request("pw", "pw")).unwrap();
    assert_eq!(request.username, "ana");
}

#[test]
fn validate_signup_input_rejects_mismatched_passwords() {
    assert_eq!(
        validate_signup_input(signup_request("pw", "other")),
        Err(ApiError::InvalidInput("Passwords do not match."))
    );
}

#[test]
fn validate_short_code_trims_and_rejects_blank() {
    assert_eq!(validate_short_code(" abc "), Ok("abc".to_owned()));
    assert_eq!(validate_short_code("  "), Err(ApiError::InvalidInput("Missing short code.")));
}

#[test]
fn validate_update_short_code_builds_request() {
    let request = validate_update_short_code(" abc ", " new-code_2 ").unwrap();
    assert_eq!(request, UpdateShortCodeRequest { old_code: "abc".to_owned(), new_code: "new-code_2".to_owned() });
}

#[test]
fn validate_update_short_code_requires_both_codes() {
    let expected = Err(ApiError::InvalidInput("Both oldCode and newCode must be provided."));
    assert_eq!(validate_update_short_code("", "xyz"), expected);
    assert_eq!(validate_update_short_code("abc", " "), expected);
}

#[test]
fn validate_update_short_code_rejects_bad_characters() {
    assert_eq!(
        validate_update_short_code("abc", "new/code"),
        Err(ApiError::InvalidInput("Short code may only contain letters, digits, '-' and '_'."))
    );
}

#[test]
fn validate_update_short_code_rejects_unchanged_code() {
    assert_eq!(
        validate_update_short_code("abc", " abc"),
        Err(ApiError::InvalidInput("The new short code is the same as the current one."))
    );
}

// =============================================================
// Error mapping
// =============================================================

#[test]
fn status_error_prefers_error_field() {
    assert_eq!(
        status_error(409, r#"{"error":"Email already registered"}"#),
        ApiError::Status { status: 409, message: "Email already registered".to_owned() }
    );
}

#[test]
fn status_error_falls_back_to_message_field() {
    assert_eq!(
        status_error(400, r#"{"message":"Passwords do not match"}"#),
        ApiError::Status { status: 400, message: "Passwords do not match".to_owned() }
    );
}

#[test]
fn status_error_non_json_body_uses_generic_message() {
    assert_eq!(
        status_error(502, "<html>bad gateway</html>"),
        ApiError::Status { status: 502, message: "request failed: 502".to_owned() }
    );
}

#[test]
fn status_error_uses_plain_text_body() {
    assert_eq!(
        status_error(400, "The new short code is already in use.\n"),
        ApiError::Status { status: 400, message: "The new short code is already in use.".to_owned() }
    );
}

#[test]
fn status_error_empty_body_uses_generic_message() {
    assert_eq!(
        status_error(400, ""),
        ApiError::Status { status: 400, message: "request failed: 400".to_owned() }
    );
}

#[test]
fn user_message_distinguishes_failure_kinds() {
    assert_eq!(ApiError::InvalidInput("Enter a URL to shorten.").user_message(), "Enter a URL to shorten.");
    assert_eq!(
        ApiError::Status { status: 401, message: "bad".to_owned() }.user_message(),
        "Invalid email or password."
    );
    assert_eq!(
        ApiError::Status { status: 409, message: "Email already registered".to_owned() }.user_message(),
        "Email already registered"
    );
    assert!(ApiError::Network("offline".to_owned()).user_message().contains("connection"));
}

// =============================================================
// Calls outside the browser
// =============================================================

#[test]
fn shorten_url_rejects_invalid_input_before_sending() {
    let config = ApiConfig::default();
    assert_eq!(
        block_on(shorten_url(&config, "", None)),
        Err(ApiError::InvalidInput("Enter a URL to shorten."))
    );
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn shorten_url_is_unavailable_without_browser() {
    let config = ApiConfig::default();
    assert_eq!(block_on(shorten_url(&config, "https://example.com", None)), Err(ApiError::Unavailable));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn login_is_unavailable_without_browser() {
    let config = ApiConfig::default();
    assert_eq!(block_on(login(&config, "a@b.com", "pw")), Err(ApiError::Unavailable));
}

#[test]
fn request_password_reset_requires_email() {
    let config = ApiConfig::default();
    assert_eq!(
        block_on(request_password_reset(&config, " ")),
        Err(ApiError::InvalidInput("Enter your email first."))
    );
}

#[test]
fn link_management_calls_reject_blank_input_before_sending() {
    let config = ApiConfig::default();
    assert_eq!(
        block_on(list_short_urls(&config, " ")),
        Err(ApiError::InvalidInput("Sign in to see your links."))
    );
    assert_eq!(block_on(click_details(&config, "")), Err(ApiError::InvalidInput("Missing short code.")));
    assert_eq!(block_on(delete_short_url(&config, "")), Err(ApiError::InvalidInput("Missing short code.")));
    assert_eq!(
        block_on(update_short_code(&config, "abc", "abc")),
        Err(ApiError::InvalidInput("The new short code is the same as the current one."))
    );
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn link_management_calls_are_unavailable_without_browser() {
    let config = ApiConfig::default();
    assert_eq!(block_on(list_short_urls(&config, "u1")), Err(ApiError::Unavailable));
    assert_eq!(block_on(click_details(&config, "abc")), Err(ApiError::Unavailable));
    assert_eq!(block_on(delete_short_url(&config, "abc")), Err(ApiError::Unavailable));
    assert_eq!(block_on(update_short_code(&config, "abc", "xyz")), Err(ApiError::Unavailable));
}

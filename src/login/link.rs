//! Deep-link parsing

use regex::Regex;
use std::sync::LazyLock;

use super::LoginError;

/// Everything after the first `code=` marker up to the end of the line
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("code=(.+)").expect("code pattern is a valid regex"));

/// Extract the authorization code from a login deep link.
///
/// The code is the raw remainder of the link after `code=`. It is not
/// URL-decoded and is not cut at `&` or `#`.
///
/// # Errors
///
/// Returns `LoginError::MalformedLink` if the link has no non-empty `code=` value
pub fn extract_code(login_link: &str) -> Result<&str, LoginError> {
    CODE_PATTERN
        .captures(login_link)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str())
        .ok_or(LoginError::MalformedLink)
}

/// Build a canonical deep link for callers that only submit a bare code
#[must_use]
pub fn deeplink_for_code(deeplink_url: &str, code: &str) -> String {
    format!("{deeplink_url}?code={code}")
}

//! Login error taxonomy
//!
//! Every way a login attempt can fail, each carrying the message shown to the
//! person logging in.

use thiserror::Error;

/// Errors that abort a login attempt
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Could not extract the authorization code from the link, please make sure the link is complete")]
    MalformedLink,

    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("Request rejected, please check that the authorization code is correct and has not expired")]
    BadRequest,

    #[error("Login service temporarily unavailable (status code: {0})")]
    ServiceUnavailable(u16),

    #[error("The authorization code has expired or is invalid, please log in again to get a new code")]
    CodeExpired,

    #[error("This authorization code has already been used, please log in again to get a new code")]
    CodeAlreadyUsed,

    #[error("Login failed: {0}")]
    ExchangeFailed(String),

    #[error("The login service returned an incomplete response, please try again")]
    MalformedProviderResponse,

    #[error("Could not fetch the user profile, please retry. If the problem persists, log in again")]
    ProfileFetchFailed,

    /// Fault outside the classified taxonomy, such as an unparseable provider body
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl LoginError {
    /// Whether this error belongs to the classified taxonomy
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

/// Failure of the best-effort device registration step.
/// Never leaves the login flow.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider responded with status {0}")]
    Status(u16),
}

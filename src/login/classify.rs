//! Classification of provider exchange errors
//!
//! The provider reports a failed exchange as free text. Rules are evaluated
//! top to bottom and the first matching substring wins. Matching is
//! case-sensitive.

use super::LoginError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeFailureKind {
    CodeExpired,
    CodeAlreadyUsed,
}

const EXCHANGE_ERROR_RULES: &[(&str, ExchangeFailureKind)] = &[
    ("expired", ExchangeFailureKind::CodeExpired),
    ("invalid", ExchangeFailureKind::CodeExpired),
    ("already used", ExchangeFailureKind::CodeAlreadyUsed),
];

/// Map a provider exchange error message to a login error
#[must_use]
pub fn classify_exchange_error(message: &str) -> LoginError {
    EXCHANGE_ERROR_RULES
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map_or_else(
            || LoginError::ExchangeFailed(message.to_string()),
            |(_, kind)| match kind {
                ExchangeFailureKind::CodeExpired => LoginError::CodeExpired,
                ExchangeFailureKind::CodeAlreadyUsed => LoginError::CodeAlreadyUsed,
            },
        )
}

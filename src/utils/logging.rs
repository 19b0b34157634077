// Centralized logging for the login flow. Tokens are never logged.
use log::{debug, error, info, warn};

use crate::login::RegistrationError;

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the start of a login attempt
    pub fn log_login_start(device_id: &str, proxy: Option<&str>) {
        info!(
            "🔄 Starting login exchange (device: {device_id}, proxy: {})",
            proxy.unwrap_or("none")
        );
    }

    /// Log a provider step being issued
    pub fn log_step(step: &str) {
        debug!("➡️  Provider step: {step}");
    }

    /// Log a transport failure on the code exchange
    pub fn log_exchange_network_error(err: &reqwest::Error) {
        error!("Token exchange request failed: {err}");
    }

    /// Log a non-200 exchange response with its body
    pub fn log_exchange_http_error(status: u16, body: &str) {
        error!("Token exchange HTTP error: {status} {body}");
    }

    /// Log the provider's reason for a rejected exchange
    pub fn log_exchange_rejected(message: &str) {
        error!("Login rejected by provider: {message}");
    }

    /// Log a swallowed device registration failure
    pub fn log_registration_skipped(err: &RegistrationError) {
        warn!("Client registration failed, continuing login: {err}");
    }

    /// Log a profile fetch failure
    pub fn log_profile_error(detail: &str) {
        error!("Failed to fetch user profile: {detail}");
    }

    /// Success marker for a completed login
    pub fn log_login_success(user_id: &str, email: &str) {
        info!("✅ Login succeeded: {user_id} {email}");
    }
}

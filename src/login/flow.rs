//! The login exchange flow
//!
//! Three provider calls in strict order:
//! 1. exchange the authorization code for tokens (mandatory)
//! 2. register the client device (best-effort)
//! 3. fetch the user profile (mandatory)

use async_trait::async_trait;
use reqwest::StatusCode;

use super::classify::classify_exchange_error;
use super::link::extract_code;
use super::provider::{ClientRegistrationRequest, ExchangeRequest, ExchangeResponse, ProfileResponse};
use super::session::{ProviderConfig, ProviderSession};
use super::types::{Credentials, DeviceIdentity, LoginResult, UserIdentity};
use super::{LoginError, RegistrationError};
use crate::utils::logging::LoggingHelper;

/// Login service trait, the seam between the HTTP surface and the flow
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Perform one login attempt
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The link carries no authorization code
    /// - The code exchange fails or is rejected by the provider
    /// - The user profile cannot be fetched
    async fn attempt_login(
        &self,
        login_link: &str,
        proxy: Option<&str>,
    ) -> Result<LoginResult, LoginError>;
}

/// Login flow against a single identity provider.
/// Holds only configuration; every attempt opens its own session.
#[derive(Debug, Clone)]
pub struct LoginExchange {
    config: ProviderConfig,
}

impl LoginExchange {
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    async fn exchange_code(
        session: &ProviderSession,
        code: &str,
        identity: &DeviceIdentity,
    ) -> Result<Credentials, LoginError> {
        LoggingHelper::log_step("exchange");

        let request = ExchangeRequest {
            code,
            amplitude_device_id: identity.session_id.clone(),
        };
        let response = session.exchange_code(&request).await.map_err(|e| {
            LoggingHelper::log_exchange_network_error(&e);
            LoginError::NetworkError(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            LoggingHelper::log_exchange_http_error(status.as_u16(), &body);
            return Err(if status == StatusCode::BAD_REQUEST {
                LoginError::BadRequest
            } else {
                LoginError::ServiceUnavailable(status.as_u16())
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoginError::NetworkError(e.to_string()))?;
        let envelope = serde_json::from_slice::<serde_json::Value>(&body)
            .map(ExchangeResponse::from)
            .map_err(|e| LoginError::Unexpected(format!("invalid exchange response: {e}")))?;

        if !envelope.succeeded() {
            let message = envelope.error_message();
            LoggingHelper::log_exchange_rejected(&message);
            return Err(classify_exchange_error(&message));
        }

        let (access_token, refresh_token) = envelope
            .tokens()
            .ok_or(LoginError::MalformedProviderResponse)?;
        Ok(Credentials {
            access_token,
            refresh_token,
        })
    }

    async fn register_client(
        session: &ProviderSession,
        access_token: &str,
        identity: &DeviceIdentity,
    ) -> Result<(), RegistrationError> {
        LoggingHelper::log_step("client registration");

        let request = ClientRegistrationRequest {
            client_uuid: identity.device_id.clone(),
        };
        let response = session.register_client(access_token, &request).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(RegistrationError::Status(response.status().as_u16()))
        }
    }

    async fn fetch_profile(
        session: &ProviderSession,
        access_token: &str,
    ) -> Result<UserIdentity, LoginError> {
        LoggingHelper::log_step("profile");

        let profile = Self::request_profile(session, access_token)
            .await
            .map_err(|detail| {
                LoggingHelper::log_profile_error(&detail);
                LoginError::ProfileFetchFailed
            })?;

        match (profile.user_id(), profile.email) {
            (Some(user_id), Some(email)) => Ok(UserIdentity { user_id, email }),
            _ => {
                LoggingHelper::log_profile_error("profile is missing id or email");
                Err(LoginError::ProfileFetchFailed)
            }
        }
    }

    async fn request_profile(
        session: &ProviderSession,
        access_token: &str,
    ) -> Result<ProfileResponse, String> {
        let response = session
            .fetch_profile(access_token)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| e.to_string())?;
        response
            .json::<ProfileResponse>()
            .await
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl LoginService for LoginExchange {
    async fn attempt_login(
        &self,
        login_link: &str,
        proxy: Option<&str>,
    ) -> Result<LoginResult, LoginError> {
        let code = extract_code(login_link)?;
        let identity = DeviceIdentity::generate();
        LoggingHelper::log_login_start(&identity.device_id, proxy);

        let session = ProviderSession::open(&self.config, proxy)?;

        let credentials = Self::exchange_code(&session, code, &identity).await?;

        if let Err(e) = Self::register_client(&session, &credentials.access_token, &identity).await
        {
            LoggingHelper::log_registration_skipped(&e);
        }

        let user = Self::fetch_profile(&session, &credentials.access_token).await?;
        drop(session);

        LoggingHelper::log_login_success(&user.user_id, &user.email);
        Ok(LoginResult::assemble(
            credentials.refresh_token,
            user,
            identity.device_id,
            proxy,
        ))
    }
}

use serde::Serialize;
use uuid::Uuid;

/// Identifiers generated fresh for every login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Sent with the code exchange
    pub session_id: String,
    /// Registered with the provider and returned to the caller
    pub device_id: String,
}

impl DeviceIdentity {
    #[must_use]
    pub fn generate() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            device_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Tokens obtained from the code exchange. Only the refresh token leaves the flow.
pub(crate) struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
}

/// Credential bundle handed back to the caller after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

impl LoginResult {
    /// Assemble the result. An empty proxy is treated as no proxy.
    #[must_use]
    pub fn assemble(
        refresh_token: String,
        user: UserIdentity,
        device_id: String,
        proxy: Option<&str>,
    ) -> Self {
        Self {
            refresh_token,
            user_id: user.user_id,
            email: user.email,
            device_id,
            proxy: proxy.filter(|p| !p.is_empty()).map(str::to_string),
        }
    }
}

//! Wire types for the identity provider API

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXCHANGE_PATH: &str = "/api/v1/auth/exchange";
pub const CLIENT_REGISTRATION_PATH: &str = "/api/v1/users/me/client";
pub const PROFILE_PATH: &str = "/api/v1/auth/profile";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest<'a> {
    pub code: &'a str,
    pub amplitude_device_id: String,
}

/// Envelope returned by the exchange endpoint with status 200.
///
/// Fields are kept as raw JSON so a rejection is classified no matter what
/// else the provider put in the body.
#[derive(Debug, Default)]
pub struct ExchangeResponse {
    pub success: Value,
    pub error: Option<Value>,
    pub data: Option<Value>,
}

impl From<Value> for ExchangeResponse {
    fn from(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };
        Self {
            success: fields.remove("success").unwrap_or_default(),
            error: fields.remove("error"),
            data: fields.remove("data"),
        }
    }
}

impl ExchangeResponse {
    /// Whether the provider flagged the exchange as successful.
    /// Any JSON value counts, with `null`, `false`, `0` and empty strings,
    /// arrays and objects treated as unsuccessful.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match &self.success {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        }
    }

    /// Provider error text, or "unknown error" when none was sent
    #[must_use]
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => "unknown error".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Access and refresh tokens from `data`, if both are present as strings
    #[must_use]
    pub fn tokens(&self) -> Option<(String, String)> {
        let data = self.data.as_ref()?;
        let access_token = data.get("accessToken")?.as_str()?;
        let refresh_token = data.get("refreshToken")?.as_str()?;
        Some((access_token.to_string(), refresh_token.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct ClientRegistrationRequest {
    pub client_uuid: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub email: Option<String>,
}

impl ProfileResponse {
    /// Stable user id, accepting both string and numeric ids
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        match &self.id {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

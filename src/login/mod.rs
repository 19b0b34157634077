//! Deep-link login exchange
//!
//! This module turns an authorization code embedded in a deep link into a
//! credential bundle by talking to the identity provider.

pub mod classify;
pub mod error;
pub mod flow;
pub mod link;
pub mod provider;
pub mod session;
pub mod types;

pub use error::{LoginError, RegistrationError};
pub use flow::{LoginExchange, LoginService};
pub use link::{deeplink_for_code, extract_code};
pub use session::{ProviderConfig, ProviderSession};
pub use types::{DeviceIdentity, LoginResult, UserIdentity};

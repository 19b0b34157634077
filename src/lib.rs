#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the loginbridge application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod handlers;
pub mod login;
pub mod models;
pub mod settings;
pub mod utils;

/// Re-export commonly used items
pub use handlers::{configure_services, handle_login, health, login_page};
pub use login::{LoginError, LoginExchange, LoginResult, LoginService, ProviderConfig};
pub use settings::BridgeSettings;

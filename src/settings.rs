use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::login::ProviderConfig;

/// Desktop client user agent presented to the identity provider
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Highlight/1.3.61 Chrome/132.0.6834.210 Electron/34.5.8 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeSettings {
    pub application: ApplicationSettings,
    pub provider: ProviderSettings,
    pub network: NetworkSettings,
    pub static_files: StaticFilesSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of the identity provider API
    pub base_url: String,
    /// Deep link used when a caller submits a bare authorization code
    pub deeplink_url: String,
    pub user_agent: String,
    pub tls_verify: bool,
    /// Bound applied to every outbound provider call (connect and response)
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NetworkSettings {
    /// Process-wide fallback proxy; empty means no proxy
    pub proxy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesSettings {
    pub assets_folder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://chat-backend.highlightai.com".to_string(),
            deeplink_url: "https://highlightai.com/deeplink".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tls_verify: true,
            timeout_seconds: 30,
        }
    }
}

impl Default for StaticFilesSettings {
    fn default() -> Self {
        Self {
            assets_folder: "src/static".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl BridgeSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - TOML parsing fails
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_env_file();

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        Ok(settings)
    }

    /// Initialize the global logger using the configured level as the default filter.
    /// `RUST_LOG` still takes precedence when set.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger was already installed
    pub fn init_logging(&self) -> Result<(), log::SetLoggerError> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.logging.level.as_str()),
        )
        .try_init()
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `LOGINBRIDGE_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read
    /// - TOML parsing fails
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_toml_file(&default_config_path)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(secrets_dir) = std::env::var("LOGINBRIDGE_SECRETS_DIR") {
            let secrets_path = std::path::Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                settings = Self::from_toml_file(&secrets_path)?;
                println!("✓ Overriding settings from {}", secrets_path.display());
            } else {
                println!(
                    "ℹ LOGINBRIDGE_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a settings file. Missing sections and fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let toml_content = fs::read_to_string(path)?;
        Ok(basic_toml::from_str(&toml_content)?)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_provider_env_overrides(&mut settings.provider);
        Self::apply_network_env_overrides(&mut settings.network);
        Self::apply_static_files_env_overrides(&mut settings.static_files);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    fn apply_provider_env_overrides(provider_settings: &mut ProviderSettings) {
        if let Ok(base_url) = std::env::var("PROVIDER_BASE_URL") {
            provider_settings.base_url = base_url;
        }
        if let Ok(deeplink_url) = std::env::var("PROVIDER_DEEPLINK_URL") {
            provider_settings.deeplink_url = deeplink_url;
        }
        if let Ok(encoded) = std::env::var("PROVIDER_USER_AGENT") {
            match decode_base64url(&encoded) {
                Some(user_agent) => provider_settings.user_agent = user_agent,
                None => eprintln!("⚠️  PROVIDER_USER_AGENT is not valid base64url text, ignoring"),
            }
        }
        if let Ok(tls_verify) = std::env::var("TLS_VERIFY") {
            provider_settings.tls_verify = tls_verify.eq_ignore_ascii_case("true");
        }
        if let Ok(timeout_str) = std::env::var("REQUEST_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                provider_settings.timeout_seconds = timeout;
            }
        }
    }

    fn apply_network_env_overrides(network_settings: &mut NetworkSettings) {
        if let Ok(proxy) = std::env::var("PROXY") {
            network_settings.proxy = proxy;
        }
    }

    fn apply_static_files_env_overrides(static_settings: &mut StaticFilesSettings) {
        if let Ok(assets_folder) = std::env::var("STATIC_FOLDER_PATH") {
            static_settings.assets_folder = assets_folder;
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
        if std::env::var("DEBUG").is_ok_and(|debug| debug.eq_ignore_ascii_case("true")) {
            logging_settings.level = "debug".to_string();
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Default proxy to use when a login request does not carry one
    #[must_use]
    pub fn default_proxy(&self) -> Option<&str> {
        Some(self.network.proxy.trim()).filter(|proxy| !proxy.is_empty())
    }

    /// Provider connection parameters for the login flow
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.provider.base_url.trim_end_matches('/').to_string(),
            user_agent: self.provider.user_agent.clone(),
            tls_verify: self.provider.tls_verify,
            timeout: Duration::from_secs(self.provider.timeout_seconds),
        }
    }
}

/// Decode base64url text, tolerating missing padding
fn decode_base64url(encoded: &str) -> Option<String> {
    let trimmed = encoded.trim().trim_end_matches('=');
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(trimmed).ok()?;
    String::from_utf8(bytes).ok()
}

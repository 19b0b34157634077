#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use loginbridge::{configure_services, BridgeSettings, LoginExchange, LoginService};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    let settings = BridgeSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;
    settings
        .init_logging()
        .map_err(|e| std::io::Error::other(format!("Failed to initialize logging: {e}")))?;

    start_server(settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(settings: BridgeSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    let login_service: Arc<dyn LoginService> =
        Arc::new(LoginExchange::new(settings.provider_config()));
    let login_service = web::Data::from(login_service);
    let settings = web::Data::new(settings);

    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .max_age(3600);

        App::new()
            .app_data(login_service.clone())
            .app_data(settings.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &BridgeSettings) {
    info!(
        "Starting login bridge v{} on http://{bind_address}",
        loginbridge::VERSION
    );
    info!("Identity provider: {}", settings.provider.base_url);
    if !settings.provider.tls_verify {
        info!("⚠️  TLS certificate verification is disabled");
    }
    match settings.default_proxy() {
        Some(proxy) => info!("Default proxy: {proxy}"),
        None => info!("Default proxy: none"),
    }
    info!("Endpoints:");
    info!("  POST /login           - Exchange a deep-link code for credentials");
    info!("  GET  / | /index.html  - Login page");
    info!("  GET  /ping            - Health check");
}

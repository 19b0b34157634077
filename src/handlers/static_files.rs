use crate::models::HealthResponse;
use crate::settings::BridgeSettings;
use crate::utils::responses::ResponseBuilder;
use actix_web::{web, HttpResponse, Result};
use log::debug;
use std::fs;

const LOGIN_PAGE: &str = "login.html";

/// Health check endpoint
///
/// # Errors
/// Returns an error if health status cannot be determined
pub async fn health() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        message: "Login bridge is running".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Serve the login page from the configured static directory
///
/// # Errors
///
/// Returns an error if the response cannot be built
pub async fn login_page(settings: web::Data<BridgeSettings>) -> Result<HttpResponse> {
    let file_path = format!("{}/{LOGIN_PAGE}", settings.static_files.assets_folder);

    debug!("Serving login page: {file_path}");

    Ok(fs::read(&file_path).map_or_else(
        |_| {
            debug!("Login page not found: {file_path}");
            ResponseBuilder::not_found("File not found")
        },
        |contents| {
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(contents)
        },
    ))
}

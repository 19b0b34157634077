use actix_web::{web, HttpResponse};
use log::debug;

use crate::login::{LoginError, LoginService};
use crate::models::LoginPayload;
use crate::settings::BridgeSettings;
use crate::utils::responses::ResponseBuilder;

/// Handle a login request from the login page
///
/// Accepts `{login_link, proxy}` or `{code, proxy}` and responds with the
/// credential bundle, or `{"error": ...}` with status 500 when the login fails.
pub async fn handle_login(
    body: web::Bytes,
    service: web::Data<dyn LoginService>,
    settings: web::Data<BridgeSettings>,
) -> HttpResponse {
    let payload: LoginPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!("Rejected login body: {e}");
            return ResponseBuilder::login_error(&LoginError::Unexpected(e.to_string()));
        }
    };

    let Some(login_link) = payload.resolve_link(&settings.provider.deeplink_url) else {
        return ResponseBuilder::bad_request("Missing login_link or code parameter");
    };
    let proxy = payload.resolve_proxy(settings.default_proxy());

    match service.attempt_login(&login_link, proxy).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => ResponseBuilder::login_error(&e),
    }
}

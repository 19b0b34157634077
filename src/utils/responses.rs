//! JSON response helpers for the HTTP surface

use actix_web::HttpResponse;
use serde_json::json;

use crate::login::LoginError;

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// `{"error": message}` with status 400
    #[must_use]
    pub fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(json!({ "error": message }))
    }

    /// `{"error": message}` with status 500
    #[must_use]
    pub fn internal_error(message: &str) -> HttpResponse {
        HttpResponse::InternalServerError().json(json!({ "error": message }))
    }

    /// Failed login attempts all surface as 500 with the error message
    #[must_use]
    pub fn login_error(err: &LoginError) -> HttpResponse {
        Self::internal_error(&err.to_string())
    }

    /// `{"error": "not_found", "message": ...}` with status 404
    #[must_use]
    pub fn not_found(message: &str) -> HttpResponse {
        HttpResponse::NotFound().json(json!({
            "error": "not_found",
            "message": message
        }))
    }
}

// HTTP request handlers for the login bridge
pub mod login;
pub mod static_files;

#[cfg(test)]
mod tests;

use actix_web::web;

pub use login::handle_login;
pub use static_files::{health, login_page};

/// Register all routes
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(handle_login))
        .route("/", web::get().to(login_page))
        .route("/index.html", web::get().to(login_page))
        .route("/ping", web::get().to(health));
}

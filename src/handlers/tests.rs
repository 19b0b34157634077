// Tests for the HTTP surface, using a recording fake in place of the provider flow
use super::configure_services;
use crate::login::{LoginError, LoginResult, LoginService, UserIdentity};
use crate::settings::BridgeSettings;
use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeLoginService {
    calls: Mutex<Vec<(String, Option<String>)>>,
    failure: Option<LoginError>,
}

#[async_trait]
impl LoginService for FakeLoginService {
    async fn attempt_login(
        &self,
        login_link: &str,
        proxy: Option<&str>,
    ) -> Result<LoginResult, LoginError> {
        self.calls
            .lock()
            .unwrap()
            .push((login_link.to_string(), proxy.map(str::to_string)));
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(LoginResult::assemble(
            "rt".to_string(),
            UserIdentity {
                user_id: "u1".to_string(),
                email: "e@x.com".to_string(),
            },
            "device".to_string(),
            proxy,
        ))
    }
}

fn settings_with_proxy(proxy: &str) -> BridgeSettings {
    let mut settings = BridgeSettings::default();
    settings.network.proxy = proxy.to_string();
    settings
}

macro_rules! app {
    ($service:expr, $settings:expr) => {{
        let service: Arc<dyn LoginService> = $service.clone();
        test::init_service(
            App::new()
                .app_data(web::Data::from(service))
                .app_data(web::Data::new($settings))
                .configure(configure_services),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_login_success_returns_bundle() {
    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, BridgeSettings::default());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"login_link": "https://x/deeplink?code=ABC"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"refresh_token": "rt", "user_id": "u1", "email": "e@x.com", "device_id": "device"})
    );
    assert_eq!(
        service.calls.lock().unwrap().as_slice(),
        &[("https://x/deeplink?code=ABC".to_string(), None)]
    );
}

#[actix_web::test]
async fn test_bare_code_and_default_proxy() {
    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, settings_with_proxy("10.0.0.1:8080"));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"code": "XYZ"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["proxy"], "10.0.0.1:8080");
    assert_eq!(
        service.calls.lock().unwrap().as_slice(),
        &[(
            "https://highlightai.com/deeplink?code=XYZ".to_string(),
            Some("10.0.0.1:8080".to_string())
        )]
    );
}

#[actix_web::test]
async fn test_request_proxy_wins_over_default() {
    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, settings_with_proxy("10.0.0.1:8080"));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"login_link": "https://x/deeplink?code=ABC", "proxy": "127.0.0.1:3128"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["proxy"], "127.0.0.1:3128");
}

#[actix_web::test]
async fn test_missing_link_and_code_is_bad_request() {
    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, BridgeSettings::default());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"proxy": "127.0.0.1:3128"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Missing login_link or code parameter"}));
    assert!(service.calls.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_login_error_maps_to_500() {
    let service = Arc::new(FakeLoginService {
        failure: Some(LoginError::CodeAlreadyUsed),
        ..FakeLoginService::default()
    });
    let app = app!(service, BridgeSettings::default());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"login_link": "https://x/deeplink?code=ABC"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], LoginError::CodeAlreadyUsed.to_string());
}

#[actix_web::test]
async fn test_invalid_json_body_is_unexpected_error() {
    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, BridgeSettings::default());

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("An unexpected error occurred:"));
}

#[actix_web::test]
async fn test_login_page_and_health() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("login.html"), "<html>login</html>").unwrap();

    let mut settings = BridgeSettings::default();
    settings.static_files.assets_folder = dir.path().display().to_string();

    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, settings);

    for uri in ["/", "/index.html"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"<html>login</html>");
    }

    let req = test::TestRequest::get().uri("/ping").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_missing_login_page_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = BridgeSettings::default();
    settings.static_files.assets_folder = dir.path().display().to_string();

    let service = Arc::new(FakeLoginService::default());
    let app = app!(service, settings);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

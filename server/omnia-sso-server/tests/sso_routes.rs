//! HTTP surface of the SSO server against a mock Omnia

use std::sync::Arc;

use auth_identity::{AuthCode, AuthResult, InMemoryUserDirectory, LocalUser};
use auth_omnia::{RESOLUTION_PATH, VALIDATION_PATH};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use config_engine::SsoSettings;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::Value;
use tower::ServiceExt;

use omnia_sso_server::{create_app, SsoServer, SESSION_COOKIE};

/// base64 of `{"tokenKey":"tok1"}`
const COOKIE_TOK1: &str = "eyJ0b2tlbktleSI6InRvazEifQ==";

struct TestApp {
    server: SsoServer,
    app: Router,
}

impl TestApp {
    fn new(omnia: &ServerGuard, users: Vec<LocalUser>) -> Self {
        let settings = SsoSettings::new("matomo", "s3cr3t", omnia.url()).with_request_timeout(5);
        let server = SsoServer::new(settings, Arc::new(InMemoryUserDirectory::with_users(users))).unwrap();
        let app = create_app(server.clone());
        Self { server, app }
    }

    async fn get(&self, uri: &str, cookies: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::HOST, "analytics.example.com");
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookie_header(cookies));
        }
        self.app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(&self, uri: &str, body: &str, cookies: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::HOST, "analytics.example.com")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookie_header(cookies));
        }
        self.app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }
}

fn cookie_header(cookies: &[(&str, &str)]) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn location(response: &Response) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{SESSION_COOKIE}=")))
        .map(str::to_string)
}

fn session_token(response: &Response) -> String {
    session_cookie(response)
        .unwrap()
        .trim_start_matches(&format!("{SESSION_COOKIE}="))
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Record a local session for `login` as if it had signed in earlier.
fn start_session(test: &TestApp, login: &str, token: &str) {
    test.server.sessions.start(&AuthResult {
        code: AuthCode::Success,
        login: login.to_string(),
        session_token: token.to_string(),
    });
}

async fn issue_nonce(test: &TestApp, session: &str) -> String {
    let form = body_json(test.get("/sso/login-mod", &[(SESSION_COOKIE, session)]).await).await;
    form["nonce"].as_str().unwrap().to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

async fn mock_signed_in_omnia(omnia: &mut ServerGuard) -> (Mock, Mock) {
    let validation = omnia
        .mock("POST", VALIDATION_PATH)
        .match_body(r#""tok1""#)
        .with_body(r#"{"data":{"status":0,"identity":{"id":"u1","type":"ext"}}}"#)
        .create_async()
        .await;
    let resolution = omnia
        .mock("POST", RESOLUTION_PATH)
        .with_body(r#"{"data":{"u1[ext]":{"username":{"value":{"text":"jdoe#EXT#"}}}}}"#)
        .create_async()
        .await;
    (validation, resolution)
}

#[tokio::test]
async fn test_health() {
    let omnia = Server::new_async().await;
    let test = TestApp::new(&omnia, vec![]);

    let response = test.get("/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_auto_login_without_cookie_redirects_to_omnia() {
    let mut omnia = Server::new_async().await;
    let any_call = omnia.mock("POST", Matcher::Any).expect(0).create_async().await;
    let test = TestApp::new(&omnia, vec![]);

    let response = test.get("/sso/auto-login", &[]).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        format!(
            "{}/spsignin?redirectUrl=https%3A%2F%2Fanalytics.example.com%2Fsso%2Fauto-login",
            omnia.url()
        )
    );
    any_call.assert_async().await;
}

#[tokio::test]
async fn test_auto_login_signs_in_and_sets_session_cookie() {
    let mut omnia = Server::new_async().await;
    let (validation, resolution) = mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let response = test
        .get(
            "/sso/auto-login?redirectUrl=https%3A%2F%2Fanalytics.example.com%2Findex.php",
            &[("OmniaTokenKey", COOKIE_TOK1)],
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "https://analytics.example.com/index.php");

    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Lax"));

    assert_eq!(test.server.sessions.len(), 1);
    validation.assert_async().await;
    resolution.assert_async().await;
}

#[tokio::test]
async fn test_auto_login_reuses_established_session() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let first = test.get("/sso/auto-login", &[("OmniaTokenKey", COOKIE_TOK1)]).await;
    let token = session_token(&first);

    let second = test
        .get(
            "/sso/auto-login",
            &[("OmniaTokenKey", COOKIE_TOK1), (SESSION_COOKIE, token.as_str())],
        )
        .await;
    assert_eq!(second.status(), StatusCode::FOUND);
    assert_eq!(test.server.sessions.len(), 1);
    assert!(test.server.sessions.is_established(&token));
}

#[tokio::test]
async fn test_unknown_session_token_is_not_adopted() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let response = test
        .get(
            "/sso/auto-login",
            &[("OmniaTokenKey", COOKIE_TOK1), (SESSION_COOKIE, "chosen-by-attacker")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(!test.server.sessions.is_established("chosen-by-attacker"));
    assert_eq!(test.server.sessions.len(), 1);
}

#[tokio::test]
async fn test_unknown_local_user_renders_forbidden_page() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("someone-else")]);

    let response = test.get("/sso/auto-login", &[("OmniaTokenKey", COOKIE_TOK1)]).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(session_cookie(&response).is_none());
    let body = body_text(response).await;
    assert!(body.contains("SSO_2001"));
    assert!(body.contains("jdoe_xEXTx_"));
    assert!(test.server.sessions.is_empty());
}

#[tokio::test]
async fn test_malformed_validation_renders_bad_gateway_page() {
    let mut omnia = Server::new_async().await;
    omnia
        .mock("POST", VALIDATION_PATH)
        .with_status(500)
        .with_body("<html>oops</html>")
        .create_async()
        .await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let response = test.get("/sso", &[("OmniaTokenKey", COOKIE_TOK1)]).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_text(response).await.contains("SSO_1001"));
}

#[tokio::test]
async fn test_login_enters_auto_login() {
    let omnia = Server::new_async().await;
    let test = TestApp::new(&omnia, vec![]);

    let response = test.get("/sso/login", &[]).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/sso/auto-login?redirectUrl=https%3A%2F%2Fanalytics.example.com%2Fsso%2Flogin"
    );
}

#[tokio::test]
async fn test_validate_auth_with_issued_nonce() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let signed_in = test.get("/sso/auto-login", &[("OmniaTokenKey", COOKIE_TOK1)]).await;
    let token = session_token(&signed_in);

    let form = body_json(test.get("/sso/login-mod", &[(SESSION_COOKIE, token.as_str())]).await).await;
    assert_eq!(form["caption"], "Authorize with Omnia");
    let nonce = form["nonce"].as_str().unwrap().to_string();

    let cookies = [("OmniaTokenKey", COOKIE_TOK1), (SESSION_COOKIE, token.as_str())];
    let response = test
        .post_form("/sso/validate-auth", &format!("form_nonce={nonce}"), &cookies)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["verified"], true);
    assert!(test.server.sessions.get(&token).unwrap().password_verified);

    let replay = test
        .post_form("/sso/validate-auth", &format!("form_nonce={nonce}"), &cookies)
        .await;
    assert_eq!(replay.status(), StatusCode::FORBIDDEN);
    assert!(body_text(replay).await.contains("SSO_2002"));
}

#[tokio::test]
async fn test_validate_auth_not_signed_in_at_omnia() {
    let mut omnia = Server::new_async().await;
    omnia
        .mock("POST", VALIDATION_PATH)
        .with_body(r#"{"data":{"status":1}}"#)
        .create_async()
        .await;
    let test = TestApp::new(&omnia, vec![]);
    start_session(&test, "jdoe_xEXTx_", "s1");

    let nonce = issue_nonce(&test, "s1").await;

    let response = test
        .post_form(
            "/sso/validate-auth",
            &format!("form_nonce={nonce}"),
            &[("OmniaTokenKey", COOKIE_TOK1), (SESSION_COOKIE, "s1")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["verified"], false);
    assert!(!test.server.sessions.get("s1").unwrap().password_verified);
}

#[tokio::test]
async fn test_validate_auth_without_nonce_is_rejected() {
    let mut omnia = Server::new_async().await;
    let any_call = omnia.mock("POST", Matcher::Any).expect(0).create_async().await;
    let test = TestApp::new(&omnia, vec![]);

    let response = test
        .post_form("/sso/validate-auth", "", &[("OmniaTokenKey", COOKIE_TOK1)])
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    any_call.assert_async().await;
}

#[tokio::test]
async fn test_login_mod_requires_established_session() {
    let omnia = Server::new_async().await;
    let test = TestApp::new(&omnia, vec![]);

    let anonymous = test.get("/sso/login-mod", &[]).await;
    assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);

    let unknown = test.get("/sso/login-mod", &[(SESSION_COOKIE, "made-up")]).await;
    assert_eq!(unknown.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_validate_auth_rejects_nonce_of_another_session() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let signed_in = test.get("/sso/auto-login", &[("OmniaTokenKey", COOKIE_TOK1)]).await;
    let victim = session_token(&signed_in);
    start_session(&test, "mallory", "mallory-session");
    let foreign_nonce = issue_nonce(&test, "mallory-session").await;

    let response = test
        .post_form(
            "/sso/validate-auth",
            &format!("form_nonce={foreign_nonce}"),
            &[("OmniaTokenKey", COOKIE_TOK1), (SESSION_COOKIE, victim.as_str())],
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!test.server.sessions.get(&victim).unwrap().password_verified);
}

#[tokio::test]
async fn test_validate_auth_for_another_login_does_not_verify_session() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);
    start_session(&test, "someone-else", "s2");

    let nonce = issue_nonce(&test, "s2").await;
    let response = test
        .post_form(
            "/sso/validate-auth",
            &format!("form_nonce={nonce}"),
            &[("OmniaTokenKey", COOKIE_TOK1), (SESSION_COOKIE, "s2")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["verified"], false);
    assert!(!test.server.sessions.get("s2").unwrap().password_verified);
}

#[tokio::test]
async fn test_auto_login_replaces_foreign_redirect_target() {
    let mut omnia = Server::new_async().await;
    mock_signed_in_omnia(&mut omnia).await;
    let test = TestApp::new(&omnia, vec![LocalUser::new("jdoe_xEXTx_")]);

    let response = test
        .get(
            "/sso/auto-login?redirectUrl=https%3A%2F%2Fevil.example%2Fphish",
            &[("OmniaTokenKey", COOKIE_TOK1)],
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "https://analytics.example.com/sso/auto-login?redirectUrl=https%3A%2F%2Fevil.example%2Fphish"
    );
}

#[tokio::test]
async fn test_login_keeps_same_host_redirect_target() {
    let omnia = Server::new_async().await;
    let test = TestApp::new(&omnia, vec![]);

    let response = test.get("/sso/login?redirectUrl=%2Findex.php%3Fmodule%3DCoreHome", &[]).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/sso/auto-login?redirectUrl=https%3A%2F%2Fanalytics.example.com%2Findex.php%3Fmodule%3DCoreHome"
    );
}

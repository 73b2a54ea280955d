use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, sso},
    server::SsoServer,
};

/// Create health check routes
pub fn health_routes() -> Router<SsoServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Create single sign-on routes
pub fn sso_routes() -> Router<SsoServer> {
    Router::new()
        .route("/sso", get(sso::auto_login))
        .route(sso::AUTO_LOGIN_PATH, get(sso::auto_login))
        .route("/sso/login", get(sso::login))
        .route("/sso/login-mod", get(sso::login_mod))
        .route("/sso/validate-auth", post(sso::validate_auth))
}

/// Create all routes
pub fn create_routes() -> Router<SsoServer> {
    Router::new().merge(health_routes()).merge(sso_routes())
}

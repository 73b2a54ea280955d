//! Omnia SSO bridge HTTP server
//!
//! Exposes the single sign-on flows of `auth-gateway` over HTTP and keeps a
//! small in-memory session table standing in for the host application's.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod session;

pub use error::*;
pub use server::{load_user_directory, SsoServer};
pub use session::{HostSession, SessionStore, SESSION_COOKIE};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: SsoServer) -> Router {
    routes::create_routes()
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(server)
}

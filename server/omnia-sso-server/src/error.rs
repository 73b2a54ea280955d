use auth_gateway::GatewayError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use error_common::{Classify, ErrorKind, HtmlErrorPage};
use thiserror::Error;
use tracing::error_span;
use uuid::Uuid;

/// Errors surfaced by the HTTP handlers; always rendered as an HTML page.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Classify for ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Gateway(e) => e.kind(),
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let page = error_span!("api_error", %error_id).in_scope(|| HtmlErrorPage::report(&self));
        let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Html(page.body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

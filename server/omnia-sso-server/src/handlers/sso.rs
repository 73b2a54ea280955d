use auth_gateway::{AutoLoginOutcome, ConfirmationForm, SsoRequest, ValidateOutcome};
use axum::{
    extract::{Form, OriginalUri, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::server::SsoServer;
use crate::session::SESSION_COOKIE;

/// Path of the auto-login entry point
pub const AUTO_LOGIN_PATH: &str = "/sso/auto-login";

#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidateAuthForm {
    pub form_nonce: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateAuthResponse {
    pub verified: bool,
}

/// `GET /sso/auto-login`: sign the browser in from its Omnia cookie.
pub async fn auto_login(
    State(server): State<SsoServer>,
    Query(query): Query<RedirectQuery>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    jar: CookieJar,
) -> ApiResult<Response> {
    let request = sso_request(&server, &query, &uri, &headers, &jar);

    match server.gateway.auto_login(&request).await? {
        AutoLoginOutcome::Redirect(url) => found(&url),
        AutoLoginOutcome::SignedIn { auth, redirect_to } => {
            server.sessions.start(&auth);
            let cookie = Cookie::build((SESSION_COOKIE, auth.session_token))
                .path("/")
                .http_only(true)
                .secure(true)
                .same_site(SameSite::Lax);
            Ok((jar.add(cookie), found(&redirect_to)?).into_response())
        }
    }
}

/// `GET /sso/login`: send any login link into the single sign-on flow.
pub async fn login(
    State(server): State<SsoServer>,
    Query(query): Query<RedirectQuery>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    jar: CookieJar,
) -> ApiResult<Response> {
    let request = sso_request(&server, &query, &uri, &headers, &jar);
    let target = format!(
        "{AUTO_LOGIN_PATH}?redirectUrl={}",
        urlencoding::encode(&request.return_url())
    );
    found(&target)
}

/// `GET /sso/login-mod`: data for the password-confirmation form. Only
/// issued to an established session.
pub async fn login_mod(
    State(server): State<SsoServer>,
    jar: CookieJar,
) -> ApiResult<Json<ConfirmationForm>> {
    let session = established_session(&server, &jar);
    Ok(Json(server.gateway.confirmation_form(session.as_deref())?))
}

/// `POST /sso/validate-auth`: confirm the browser's identity instead of a password.
pub async fn validate_auth(
    State(server): State<SsoServer>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<ValidateAuthForm>,
) -> ApiResult<Json<ValidateAuthResponse>> {
    let request = sso_request(&server, &RedirectQuery::default(), &uri, &headers, &jar);
    let outcome = server
        .gateway
        .validate_auth(&request, form.form_nonce.as_deref())
        .await?;

    let verified = match (&outcome, request.session_token.as_deref()) {
        (ValidateOutcome::Verified { login }, Some(token)) => {
            let owned_by_login = server
                .sessions
                .get(token)
                .is_some_and(|session| session.login == *login);
            if owned_by_login {
                server.sessions.mark_password_verified(token)
            } else {
                warn!("Identity provider user does not own the local session");
                false
            }
        }
        _ => false,
    };

    Ok(Json(ValidateAuthResponse { verified }))
}

/// The `sso_session` token, if this process issued it.
fn established_session(server: &SsoServer, jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| server.sessions.is_established(token))
}

fn sso_request(
    server: &SsoServer,
    query: &RedirectQuery,
    uri: &axum::http::Uri,
    headers: &HeaderMap,
    jar: &CookieJar,
) -> SsoRequest {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or("localhost");
    let request_uri = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    SsoRequest {
        token_cookie: jar
            .get(server.cookie_name())
            .map(|cookie| cookie.value().to_string()),
        redirect_url: query.redirect_url.clone(),
        host: host.to_string(),
        request_uri,
        session_token: established_session(server, jar),
    }
}

/// 302 to `url`.
fn found(url: &str) -> ApiResult<Response> {
    let location = HeaderValue::try_from(url)
        .map_err(|e| ApiError::Internal(format!("invalid redirect target: {e}")))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

//! Cookie session transport.
//!
//! The client's token itself travels in a cookie signed with the server key,
//! so any instance holding the same key recognizes it. The middleware
//! resolves the token once per request and hands it to handlers through the
//! request extensions.

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use tracing::{debug, info};
use votebox_core::error::DomainError;
use votebox_voting::domain::session::{self, ResolvedSession};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "votebox_session";

/// Lifetime of the session cookie in the browser.
pub const SESSION_MAX_AGE: time::Duration = time::Duration::days(30);

/// Cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    key: Key,
    secure: bool,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionSettings {
    /// Creates settings signing cookies with `key`.
    #[must_use]
    pub fn new(key: Key, secure: bool) -> Self {
        Self { key, secure }
    }

    /// Settings with a freshly generated signing key. Cookies issued with
    /// these are rejected once the process restarts.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::new(Key::generate(), false)
    }

    /// Wraps `router` in the session middleware.
    #[must_use]
    pub fn apply(&self, router: Router<AppState>) -> Router<AppState> {
        router.layer(middleware::from_fn_with_state(self.clone(), resolve_session))
    }

    fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(SESSION_MAX_AGE)
            .build()
    }
}

/// Resolves the caller's token from the signed cookie. A missing, tampered,
/// or malformed token is replaced and the new cookie is set on the response.
async fn resolve_session(
    State(settings): State<SessionSettings>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = SignedCookieJar::from_headers(request.headers(), settings.key.clone());
    let incoming = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_owned());

    match session::resolve(incoming.as_deref()) {
        ResolvedSession::Existing(token) => {
            debug!("existing session found");
            request.extensions_mut().insert(SessionToken(token));
            next.run(request).await
        }
        ResolvedSession::Created(token) => {
            info!("new session created");
            request.extensions_mut().insert(SessionToken(token.clone()));
            let response = next.run(request).await;
            (jar.add(settings.cookie(token)), response).into_response()
        }
    }
}

/// The caller's session token, as resolved by the session middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            ApiError::from(DomainError::StorageUnavailable(
                "session transport: middleware not installed".into(),
            ))
        })
    }
}

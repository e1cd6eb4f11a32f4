//! Cookie-backed identity extractors.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use kontor_domain::user::UserRole;

use crate::cookie::{KONTOR_PENDING, KONTOR_SESSION};
use crate::token::{validate_pending_token, validate_session_token};

/// Provides the HMAC secret for validating session cookies. Implemented by
/// each service's `AppState`.
pub trait SessionKeys {
    fn session_secret(&self) -> &str;
}

/// Authenticated user identity, extracted from the `kontor_session` cookie.
///
/// Returns 401 if the cookie is absent, expired, or fails validation.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for Identity
where
    S: SessionKeys + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(KONTOR_SESSION).map(|c| c.value().to_owned());
        let secret = state.session_secret().to_owned();

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info =
                validate_session_token(&token, &secret).map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                role: info.role,
            })
        }
    }
}

/// Pending-login state, extracted from the `kontor_pending` cookie.
///
/// Returns 401 if the cookie is absent or expired — the client goes back to
/// the login step.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub user_id: Uuid,
    pub next: Option<String>,
}

impl<S> FromRequestParts<S> for PendingLogin
where
    S: SessionKeys + Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(KONTOR_PENDING).map(|c| c.value().to_owned());
        let secret = state.session_secret().to_owned();

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info =
                validate_pending_token(&token, &secret).map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                next: info.next,
            })
        }
    }
}

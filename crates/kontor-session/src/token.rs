//! JWT issuance and validation for session and pending-login tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use kontor_domain::user::UserRole;

use crate::cookie::{PENDING_EXP, REMEMBER_SESSION_EXP, SESSION_EXP};

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exp: u64,
}

/// Pending-login state extracted from a validated pending token.
#[derive(Debug, Clone)]
pub struct PendingInfo {
    pub user_id: Uuid,
    /// Validated post-login redirect target, if one was offered at login.
    pub next: Option<String>,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Claims for the authenticated session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// User role as `u8` wire value.
    pub role: u8,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Claims for the pending-login token.
#[derive(Debug, Serialize, Deserialize)]
pub struct PendingClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// Validated redirect target (same-origin relative path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

// ── Issuance ─────────────────────────────────────────────────────────────────

/// Issue a session token for an authenticated user. Returns the token and its
/// expiry timestamp.
pub fn issue_session_token(
    user_id: Uuid,
    role: UserRole,
    remember: bool,
    secret: &str,
) -> Result<(String, u64), jsonwebtoken::errors::Error> {
    let ttl = if remember {
        REMEMBER_SESSION_EXP
    } else {
        SESSION_EXP
    };
    let exp = now_secs() + ttl;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}

/// Issue a pending-login token. Expires with the login code.
pub fn issue_pending_token(
    user_id: Uuid,
    next: Option<&str>,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = PendingClaims {
        sub: user_id.to_string(),
        next: next.map(str::to_owned),
        exp: now_secs() + PENDING_EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew.
fn decode_jwt<C: serde::de::DeserializeOwned>(token: &str, secret: &str) -> Result<C, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<C>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning the parsed identity.
pub fn validate_session_token(cookie_value: &str, secret: &str) -> Result<SessionInfo, AuthError> {
    let claims: SessionClaims = decode_jwt(cookie_value, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let role = UserRole::from_u8(claims.role).ok_or(AuthError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        role,
        exp: claims.exp,
    })
}

/// Validate a pending-cookie value, returning the pending-login state.
pub fn validate_pending_token(cookie_value: &str, secret: &str) -> Result<PendingInfo, AuthError> {
    let claims: PendingClaims = decode_jwt(cookie_value, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(PendingInfo {
        user_id,
        next: claims.next,
    })
}

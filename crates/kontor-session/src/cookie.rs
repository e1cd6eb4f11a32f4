//! Cookie builders for the session and pending-login tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the authenticated session token.
pub const KONTOR_SESSION: &str = "kontor_session";

/// Cookie name for the pending-login token (password accepted, code pending).
pub const KONTOR_PENDING: &str = "kontor_pending";

/// Session JWT lifetime in seconds (4 hours).
pub const SESSION_EXP: u64 = 14400;

/// Session JWT lifetime in seconds when "remember me" is set (7 days).
pub const REMEMBER_SESSION_EXP: u64 = 604800;

/// Pending-login JWT lifetime in seconds. Matches the login-code validity
/// window so pending state expires together with the code.
pub const PENDING_EXP: u64 = 300;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use kontor_session::cookie::{set_session_cookie, KONTOR_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string(), false);
/// let cookie = jar.get(KONTOR_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(14400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    value: String,
    domain: String,
    remember: bool,
) -> CookieJar {
    let max_age = if remember {
        REMEMBER_SESSION_EXP
    } else {
        SESSION_EXP
    };
    let cookie = Cookie::build((KONTOR_SESSION, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Set the pending-login cookie on the jar. Scoped to `/auth` — only the
/// verify flow ever reads it.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use kontor_session::cookie::{set_pending_cookie, KONTOR_PENDING};
///
/// let jar = CookieJar::new();
/// let jar = set_pending_cookie(jar, "pending_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(KONTOR_PENDING).unwrap();
/// assert_eq!(cookie.path(), Some("/auth"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(300)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_pending_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((KONTOR_PENDING, value))
        .path("/auth")
        .domain(domain)
        .max_age(Duration::seconds(PENDING_EXP as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((KONTOR_SESSION, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the pending-login cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use kontor_session::cookie::{clear_pending_cookie, set_pending_cookie, KONTOR_PENDING};
///
/// let jar = CookieJar::new();
/// let jar = set_pending_cookie(jar, "p".to_string(), "example.com".to_string());
/// let jar = clear_pending_cookie(jar, "example.com".to_string());
/// let pending = jar.get(KONTOR_PENDING).unwrap();
/// assert_eq!(pending.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_pending_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((KONTOR_PENDING, ""))
        .path("/auth")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

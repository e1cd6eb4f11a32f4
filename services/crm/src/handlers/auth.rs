use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use kontor_session::cookie::{
    KONTOR_PENDING, clear_pending_cookie, clear_session_cookie, set_pending_cookie,
    set_session_cookie,
};
use kontor_session::token::{issue_pending_token, issue_session_token, validate_pending_token};

use crate::domain::types::DEFAULT_LANDING;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, PasswordLoginUseCase, ResendLoginCodeUseCase};
use crate::usecase::register::{RegisterInput, RegisterUseCase};
use crate::usecase::verify::{VerifyLoginInput, VerifyLoginUseCase};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, CrmServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
            confirm: body.confirm,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginQuery {
    /// Post-login redirect target; kept only if it is a same-origin path.
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// First factor. On success a login code is issued out-of-band and the
/// pending-login cookie is set; the client continues at `/auth/verify`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, CrmServiceError> {
    let usecase = PasswordLoginUseCase {
        users: state.user_repo(),
        login_codes: state.login_code_repo(),
        mailer: state.mailer(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
            next: query.next,
        })
        .await?;

    let token = issue_pending_token(out.user_id, out.next.as_deref(), &state.session_secret)
        .map_err(|e| CrmServiceError::Internal(e.into()))?;
    let jar = set_pending_cookie(jar, token, state.cookie_domain.clone());

    Ok((jar, Redirect::to("/auth/verify")))
}

// ── POST /auth/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyQuery {
    /// `resend=1` reissues the code instead of checking one.
    pub resend: Option<String>,
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub code: String,
    #[serde(default)]
    pub remember: bool,
}

/// Second factor. Reads the pending cookie set by `login`; an absent or
/// expired cookie sends the client back to the login step.
pub async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<VerifyQuery>,
    body: Option<Json<VerifyRequest>>,
) -> Result<Response, CrmServiceError> {
    let token = jar
        .get(KONTOR_PENDING)
        .map(|c| c.value().to_owned())
        .ok_or(CrmServiceError::SessionExpired)?;
    let pending = validate_pending_token(&token, &state.session_secret)
        .map_err(|_| CrmServiceError::SessionExpired)?;

    if query.resend.as_deref() == Some("1") {
        let usecase = ResendLoginCodeUseCase {
            users: state.user_repo(),
            login_codes: state.login_code_repo(),
            mailer: state.mailer(),
        };
        usecase.execute(pending.user_id).await?;

        // Refresh the pending cookie so its window tracks the new code.
        let token = issue_pending_token(pending.user_id, pending.next.as_deref(), &state.session_secret)
            .map_err(|e| CrmServiceError::Internal(e.into()))?;
        let jar = set_pending_cookie(jar, token, state.cookie_domain.clone());
        return Ok((jar, Redirect::to("/auth/verify")).into_response());
    }

    let Json(body) = body.ok_or(CrmServiceError::MissingData)?;
    let usecase = VerifyLoginUseCase {
        users: state.user_repo(),
        login_codes: state.login_code_repo(),
    };
    let user = usecase
        .execute(VerifyLoginInput {
            user_id: pending.user_id,
            code: body.code,
        })
        .await?;

    let (session, _exp) =
        issue_session_token(user.id, user.role, body.remember, &state.session_secret)
            .map_err(|e| CrmServiceError::Internal(e.into()))?;

    let jar = clear_pending_cookie(jar, state.cookie_domain.clone());
    let jar = set_session_cookie(jar, session, state.cookie_domain.clone(), body.remember);

    let target = pending
        .next
        .unwrap_or_else(|| DEFAULT_LANDING.to_owned());
    Ok((jar, Redirect::to(&target)).into_response())
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, CrmServiceError> {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((jar, Redirect::to("/auth/login")))
}

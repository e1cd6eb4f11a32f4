use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{LoginCodeRepository, Mailer, UserRepository};
use crate::domain::types::{LOGIN_CODE_TTL_SECS, LoginCode, User};
use crate::error::CrmServiceError;
use crate::usecase::password::verify_password;

const CODE_MAIL_SUBJECT: &str = "Dein Anmeldecode";

/// Generate a 5-digit login code, zero-padded, uniform over [0, 99999].
fn generate_code() -> String {
    let mut rng = rand::rng();
    format!("{:05}", rng.random_range(0..100_000u32))
}

/// Accept a redirect target only if it is a same-origin relative path.
/// `//host/…` is protocol-relative and would leave the origin, so it is
/// rejected along with absolute URLs.
pub fn sanitize_redirect_target(next: Option<&str>) -> Option<String> {
    let next = next?;
    if next.starts_with('/') && !next.starts_with("//") {
        Some(next.to_owned())
    } else {
        None
    }
}

/// Issue a fresh login code for `user`: all prior codes are deleted first, so
/// at most one code is active per user at any time (concurrent logins are
/// last-writer-wins). Mail delivery is best-effort — on failure the code
/// lands in the local log and the flow continues.
async fn issue_login_code<L, M>(
    login_codes: &L,
    mailer: &M,
    user: &User,
) -> Result<(), CrmServiceError>
where
    L: LoginCodeRepository,
    M: Mailer,
{
    login_codes.delete_for_user(user.id).await?;

    let code = generate_code();
    let now = Utc::now();
    login_codes
        .create(&LoginCode {
            id: Uuid::now_v7(),
            user_id: user.id,
            code: code.clone(),
            expires_at: now + Duration::seconds(LOGIN_CODE_TTL_SECS),
            created_at: now,
        })
        .await?;

    let body = format!("Dein Login-Code lautet: {code}\nEr ist 5 Minuten gültig.");
    if let Err(e) = mailer.send(&user.email, CODE_MAIL_SUBJECT, &body).await {
        tracing::warn!(error = %e, "login code mail delivery failed, using log fallback");
        tracing::info!(email = %user.email, code = %code, "login code (mail fallback)");
    }
    Ok(())
}

// ── PasswordLogin (first factor) ─────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Raw `next` query value; sanitized before it reaches the session.
    pub next: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: Uuid,
    /// Validated redirect target for after code verification.
    pub next: Option<String>,
}

pub struct PasswordLoginUseCase<U, L, M>
where
    U: UserRepository,
    L: LoginCodeRepository,
    M: Mailer,
{
    pub users: U,
    pub login_codes: L,
    pub mailer: M,
}

impl<U, L, M> PasswordLoginUseCase<U, L, M>
where
    U: UserRepository,
    L: LoginCodeRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, CrmServiceError> {
        // Unknown email and wrong password collapse into the same error so
        // the endpoint does not enumerate accounts.
        let user = self
            .users
            .find_by_email(input.email.trim())
            .await?
            .ok_or(CrmServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(CrmServiceError::InvalidCredentials);
        }

        issue_login_code(&self.login_codes, &self.mailer, &user).await?;

        Ok(LoginOutput {
            user_id: user.id,
            next: sanitize_redirect_target(input.next.as_deref()),
        })
    }
}

// ── ResendLoginCode ──────────────────────────────────────────────────────────

/// Re-runs the code issuance for the pending user without a second password
/// check. The previous code dies with the `delete_for_user` step.
pub struct ResendLoginCodeUseCase<U, L, M>
where
    U: UserRepository,
    L: LoginCodeRepository,
    M: Mailer,
{
    pub users: U,
    pub login_codes: L,
    pub mailer: M,
}

impl<U, L, M> ResendLoginCodeUseCase<U, L, M>
where
    U: UserRepository,
    L: LoginCodeRepository,
    M: Mailer,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<(), CrmServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CrmServiceError::SessionExpired)?;
        issue_login_code(&self.login_codes, &self.mailer, &user).await
    }
}

use uuid::Uuid;

use crate::domain::repository::{LoginCodeRepository, UserRepository};
use crate::domain::types::User;
use crate::error::CrmServiceError;

pub struct VerifyLoginInput {
    pub user_id: Uuid,
    pub code: String,
}

/// Second authentication factor: check the submitted code against the most
/// recently issued one and consume it.
pub struct VerifyLoginUseCase<U, L>
where
    U: UserRepository,
    L: LoginCodeRepository,
{
    pub users: U,
    pub login_codes: L,
}

impl<U, L> VerifyLoginUseCase<U, L>
where
    U: UserRepository,
    L: LoginCodeRepository,
{
    /// Returns the verified user so the caller can establish the session.
    ///
    /// Succeeds iff the most recently issued code for the user matches the
    /// submitted string exactly and its expiry is strictly in the future.
    /// The code is deleted on success (single use); on failure nothing
    /// changes and the user may retry or request a resend.
    pub async fn execute(&self, input: VerifyLoginInput) -> Result<User, CrmServiceError> {
        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or(CrmServiceError::SessionExpired)?;

        let submitted = input.code.trim();
        let record = self
            .login_codes
            .find_latest(user.id, submitted)
            .await?
            .ok_or(CrmServiceError::InvalidLoginCode)?;

        if !record.is_valid() {
            return Err(CrmServiceError::InvalidLoginCode);
        }

        self.login_codes.delete(record.id).await?;
        Ok(user)
    }
}

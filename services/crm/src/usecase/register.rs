use chrono::Utc;
use uuid::Uuid;

use kontor_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{MIN_PASSWORD_LEN, User, normalize_email, validate_email};
use crate::error::CrmServiceError;
use crate::usecase::password::hash_password;

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Self-service registration: email + password with confirmation. New
/// accounts are always Staff; the Chef role is assigned by the seeder only.
pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<(), CrmServiceError> {
        if input.password != input.confirm {
            return Err(CrmServiceError::PasswordMismatch);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(CrmServiceError::InvalidPassword);
        }

        let email = normalize_email(&input.email);
        if !validate_email(&email) {
            return Err(CrmServiceError::InvalidEmail);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(CrmServiceError::EmailAlreadyRegistered);
        }

        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash: hash_password(&input.password)?,
            role: UserRole::Staff,
            created_at: Utc::now(),
        };
        self.users.create(&user).await
    }
}

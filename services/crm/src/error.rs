use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// CRM service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CrmServiceError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired login code")]
    InvalidLoginCode,
    #[error("session expired, please log in again")]
    SessionExpired,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password too short")]
    InvalidPassword,
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    #[error("unknown contact channel")]
    InvalidChannel,
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CrmServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidLoginCode => "INVALID_LOGIN_CODE",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidChannel => "INVALID_CHANNEL",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CrmServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CustomerNotFound | Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidLoginCode | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::PasswordMismatch
            | Self::InvalidEmail
            | Self::InvalidPassword
            | Self::InvalidRating
            | Self::InvalidChannel
            | Self::InvalidQuantity
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::{BEARER_CHALLENGE, BearerError};
use platform::password::PasswordError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed required input
    #[error("{0}")]
    InvalidInput(String),

    /// User name already used by another account
    #[error("Username \"{0}\" is already taken")]
    UserNameTaken(String),

    /// Update target does not exist
    #[error("User not found")]
    UserNotFound,

    /// No user matches the given username and password
    #[error("Username or password is incorrect")]
    InvalidCredentials,

    /// Stored credential fields violate their length invariants
    #[error("Corrupt credential record: {0}")]
    CorruptRecord(String),

    /// Token signature, structure or expiry check failed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No usable session for a protected operation
    #[error("Unauthorized")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    ///
    /// Account mutation failures (validation, taken user name, missing user)
    /// all surface as `BadRequest`; the request layer does not tell them apart.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) | AuthError::UserNameTaken(_) | AuthError::UserNotFound => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AuthError::CorruptRecord(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their details out of the response body.
    /// Database errors go through the kernel mapping, so an unreachable
    /// database answers 503.
    pub fn into_app_error(self) -> AppError {
        if let AuthError::Database(e) = self {
            return AppError::from(e);
        }

        let kind = self.kind();
        if kind.is_server_error() {
            AppError::new(kind, "An internal error occurred")
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::CorruptRecord(msg) => {
                tracing::error!(message = %msg, "Corrupt credential record");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.kind() == ErrorKind::Unauthorized;
        let mut response = self.into_app_error().into_response();
        if challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static(BEARER_CHALLENGE),
            );
        }
        response
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        if err.is_corrupt_record() {
            AuthError::CorruptRecord(err.to_string())
        } else {
            AuthError::InvalidInput("Password is required".to_string())
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        tracing::debug!(error = %err, "Rejected Authorization header");
        AuthError::Unauthorized
    }
}

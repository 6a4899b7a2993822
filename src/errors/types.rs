//! Error type definitions for authentication and token operations
//!
//! Every failure the engine can surface is classified into exactly one of the
//! variants below before it crosses the crate boundary; raw storage or
//! network errors never leak out. The presentation layer maps each variant to
//! its HTTP status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email is already in use")]
    DuplicateEmail,

    #[error("Username is already in use")]
    DuplicateHandle,

    // One message for both unknown email and wrong password, so callers
    // cannot probe which field was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Too many failed login attempts. Try again in {retry_after_secs} seconds")]
    AccountBlocked { retry_after_secs: i64 },

    #[error("Account is already verified")]
    AlreadyVerified,

    #[error("User not found")]
    UserNotFound,

    #[error("Password hashing failed")]
    HashingFailure,

    #[error("Verification email could not be sent")]
    NotificationFailure,
}

/// Token-related errors
///
/// `TokenExpired` / `TokenInvalid` / `TokenMalformed` may be collapsed to a
/// single unauthenticated outcome by callers, but the distinction matters for
/// observability and for user-facing verification messages.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token signature or claims are invalid")]
    TokenInvalid,

    #[error("Token could not be parsed")]
    TokenMalformed,

    #[error("Token not found or already used")]
    TokenNotFound,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::DuplicateHandle => "DUPLICATE_HANDLE",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountBlocked { .. } => "ACCOUNT_BLOCKED",
            AuthError::AlreadyVerified => "ALREADY_VERIFIED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::HashingFailure => "HASHING_FAILURE",
            AuthError::NotificationFailure => "NOTIFICATION_FAILURE",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenInvalid => "TOKEN_INVALID",
            TokenError::TokenMalformed => "TOKEN_MALFORMED",
            TokenError::TokenNotFound => "TOKEN_NOT_FOUND",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_conversion() {
        let error = AuthError::DuplicateEmail;
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "DUPLICATE_EMAIL");
        assert!(response.message.contains("already in use"));
    }

    #[test]
    fn test_token_error_conversion() {
        let error = TokenError::TokenExpired;
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "TOKEN_EXPIRED");
        assert!(response.message.contains("expired"));
    }

    #[test]
    fn test_blocked_error_carries_retry_hint() {
        let error = AuthError::AccountBlocked {
            retry_after_secs: 1800,
        };
        let message = error.to_string();
        assert!(message.contains("1800 seconds"));
    }

    #[test]
    fn test_invalid_credentials_message_is_field_agnostic() {
        let message = AuthError::InvalidCredentials.to_string();
        assert!(!message.to_lowercase().contains("username"));
        assert!(!message.to_lowercase().contains("not found"));
    }
}

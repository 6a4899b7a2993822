//! Configuration for the verification token service

use crate::domain::entities::verification_token::TOKEN_EXPIRY_HOURS;

/// Configuration for the verification token service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: TOKEN_EXPIRY_HOURS,
        }
    }
}

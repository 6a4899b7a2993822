//! Single-use verification token entity for email-ownership proof and
//! password resets.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of random bytes in a token secret (256 bits of entropy)
pub const SECRET_BYTES: usize = 32;

/// Token lifetime in hours
pub const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Intended use of a verification token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Proof of email ownership after registration
    EmailVerification,
    /// Password reset request
    PasswordReset,
}

/// Single-use, expiring verification token tied to a user and a purpose
///
/// A token is usable iff `consumed_at` is `None` and `now < expires_at`.
/// It is consumed exactly once and never otherwise mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Unique identifier for the token record
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// Random high-entropy secret, hex-encoded; unique across all tokens
    pub secret: String,

    /// Intended use of the token
    pub purpose: TokenPurpose,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Absolute expiry (`created_at` + 24h)
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the token was redeemed, if ever
    pub consumed_at: Option<DateTime<Utc>>,
}

impl VerificationToken {
    /// Creates a new token with a freshly generated secret
    pub fn new(user_id: Uuid, purpose: TokenPurpose, now: DateTime<Utc>) -> Self {
        Self::with_ttl(user_id, purpose, now, Duration::hours(TOKEN_EXPIRY_HOURS))
    }

    /// Creates a new token with a custom lifetime
    pub fn with_ttl(
        user_id: Uuid,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            secret: Self::generate_secret(),
            purpose,
            created_at: now,
            expires_at: now + ttl,
            consumed_at: None,
        }
    }

    /// Generates a hex-encoded secret with `SECRET_BYTES` bytes of entropy
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Checks if the token has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the token has been redeemed
    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    /// Checks if the token can still be redeemed at the given instant
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_consumed() && !self.is_expired(now)
    }
}

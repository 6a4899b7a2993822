//! Verification token repository trait.
//!
//! The `mark_consumed` contract is what makes redemption race-free: it must
//! be a storage-level conditional update (consume-if-unconsumed), so that two
//! concurrent redemptions of the same secret cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use crate::errors::DomainError;

/// Repository trait for VerificationToken persistence operations
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// Persist a new token record
    ///
    /// # Arguments
    /// * `token` - The token to persist; its secret is unique across all rows
    ///
    /// # Returns
    /// * `Ok(VerificationToken)` - The stored token
    /// * `Err(DomainError)` - Insert failed
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find the unconsumed token with the given secret and purpose
    ///
    /// Consumed tokens are never returned; expired-but-unconsumed tokens are,
    /// so callers can distinguish "expired" from "already used".
    ///
    /// # Arguments
    /// * `secret` - The hex-encoded token secret
    /// * `purpose` - The purpose the token must have been issued for
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - Matching unconsumed token
    /// * `Ok(None)` - No such token, or it was already consumed
    /// * `Err(DomainError)` - Lookup failed
    async fn find_unconsumed_by_secret(
        &self,
        secret: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<VerificationToken>, DomainError>;

    /// Conditionally mark a token consumed
    ///
    /// Must be atomic with respect to concurrent calls: only one caller can
    /// ever observe `true` for a given token.
    ///
    /// # Arguments
    /// * `id` - The token record id
    /// * `now` - The consumption timestamp
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the token
    /// * `Ok(false)` - The token was already consumed (or does not exist)
    /// * `Err(DomainError)` - Update failed
    async fn mark_consumed(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete a user's expired, never-consumed tokens of the given purpose
    ///
    /// Opportunistic garbage collection, not security-critical.
    ///
    /// # Arguments
    /// * `user_id` - The owning user
    /// * `purpose` - The purpose to prune
    /// * `now` - The instant expiry is evaluated against
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows removed
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired_unconsumed(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError>;
}

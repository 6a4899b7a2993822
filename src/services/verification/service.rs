//! Main verification token service implementation

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::VerificationTokenRepository;

use super::config::VerificationServiceConfig;

/// Service managing the single-use verification token lifecycle
pub struct VerificationTokenService<R: VerificationTokenRepository> {
    /// Token repository for persistence
    repository: Arc<R>,
    /// Service configuration
    config: VerificationServiceConfig,
    /// Time source for expiry checks
    clock: Arc<dyn Clock>,
}

impl<R: VerificationTokenRepository> VerificationTokenService<R> {
    /// Create a new verification token service
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository implementation
    /// * `config` - Service configuration
    /// * `clock` - Time source for expiry checks
    pub fn new(
        repository: Arc<R>,
        config: VerificationServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Issue a new token for a user and purpose
    ///
    /// Lazily prunes the user's expired, never-consumed tokens of the same
    /// purpose first, then persists a fresh token expiring in 24 hours.
    /// Expired tokens are only ever pruned here, never actively revoked.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user
    /// * `purpose` - What the token proves
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationToken)` - The persisted token, secret included
    /// * `Err(DomainError)` - Persistence failed
    pub async fn issue(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> DomainResult<VerificationToken> {
        let now = self.clock.now();

        let pruned = self
            .repository
            .delete_expired_unconsumed(user_id, purpose, now)
            .await?;
        if pruned > 0 {
            tracing::debug!(
                user_id = %user_id,
                purpose = ?purpose,
                pruned,
                "pruned expired verification tokens"
            );
        }

        let token = VerificationToken::with_ttl(
            user_id,
            purpose,
            now,
            Duration::hours(self.config.token_ttl_hours),
        );

        self.repository.insert(token).await
    }

    /// Redeem a token by secret, consuming it
    ///
    /// Consumption goes through the repository's conditional update, so two
    /// concurrent redemptions of the same secret have exactly one winner; the
    /// loser observes `TokenNotFound`, the same outcome as a replayed secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The hex-encoded token secret
    /// * `purpose` - The purpose the token must have been issued for
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The owning user id
    /// * `Err(DomainError)` - `TokenNotFound` if no unconsumed token matches,
    ///   `TokenExpired` if it exists but is past expiry (left unconsumed so a
    ///   retry still reports expired rather than not-found)
    pub async fn redeem(&self, secret: &str, purpose: TokenPurpose) -> DomainResult<Uuid> {
        let token = self
            .repository
            .find_unconsumed_by_secret(secret, purpose)
            .await?
            .ok_or(TokenError::TokenNotFound)?;

        let now = self.clock.now();
        if token.is_expired(now) {
            // Stays inert and unconsumed: "expired" and "already used" are
            // distinct user-facing outcomes.
            return Err(TokenError::TokenExpired.into());
        }

        if !self.repository.mark_consumed(token.id, now).await? {
            // Lost the race against a concurrent redemption
            tracing::debug!(token_id = %token.id, "verification token consumed concurrently");
            return Err(TokenError::TokenNotFound.into());
        }

        Ok(token.user_id)
    }
}

//! Mock implementation of VerificationTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use crate::errors::DomainError;

use super::trait_::VerificationTokenRepository;

/// Mock verification token repository for testing
///
/// The conditional `mark_consumed` runs under the write lock, which gives the
/// same at-most-one-winner guarantee a conditional UPDATE gives in SQL.
pub struct MockVerificationTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, VerificationToken>>>,
}

impl MockVerificationTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored token records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Fetch a token record by id, consumed or not
    pub async fn get(&self, id: Uuid) -> Option<VerificationToken> {
        self.tokens.read().await.get(&id).cloned()
    }
}

impl Default for MockVerificationTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationTokenRepository for MockVerificationTokenRepository {
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Mirror the unique constraint on the secret column
        if tokens.values().any(|t| t.secret == token.secret) {
            return Err(DomainError::Validation {
                message: "Token secret already exists".to_string(),
            });
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_unconsumed_by_secret(
        &self,
        secret: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|t| t.secret == secret && t.purpose == purpose && !t.is_consumed())
            .cloned())
    }

    async fn mark_consumed(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(&id) {
            Some(token) if !token.is_consumed() => {
                token.consumed_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expired_unconsumed(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| {
            !(t.user_id == user_id
                && t.purpose == purpose
                && !t.is_consumed()
                && t.is_expired(now))
        });
        Ok(before - tokens.len())
    }
}

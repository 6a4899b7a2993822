//! Credential hashing service.
//!
//! Wraps bcrypt with a per-call random salt embedded in the digest, so two
//! hashes of the same plaintext differ. Hashing is CPU-bound and runs on the
//! blocking pool so it never stalls the async executor. Callers treat the
//! digest as opaque; the work factor lives here only.

use tokio::task;

use crate::errors::{AuthError, DomainError, DomainResult};

/// Configuration for the password hasher
#[derive(Debug, Clone)]
pub struct PasswordHasherConfig {
    /// Bcrypt cost factor
    pub cost: u32,
}

impl Default for PasswordHasherConfig {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Service for one-way password hashing and verification
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    config: PasswordHasherConfig,
}

impl PasswordHasher {
    /// Creates a new password hasher
    pub fn new(config: PasswordHasherConfig) -> Self {
        Self { config }
    }

    /// Hashes a plaintext password
    ///
    /// Fails only on entropy/computation error, never on input shape.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The password to hash
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The salted bcrypt digest
    /// * `Err(DomainError)` - `HashingFailure` if the computation failed
    pub async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let plaintext = plaintext.to_string();
        let cost = self.config.cost;

        task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|_| DomainError::Auth(AuthError::HashingFailure))?
            .map_err(|_| DomainError::Auth(AuthError::HashingFailure))
    }

    /// Compares a plaintext password against a stored digest
    ///
    /// Returns `false` for a missing or malformed digest, never an error, so
    /// login code has a single rejection path.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The candidate password
    /// * `digest` - The stored digest, if the account has one
    pub async fn verify(&self, plaintext: &str, digest: Option<&str>) -> bool {
        let Some(digest) = digest else {
            return false;
        };

        let plaintext = plaintext.to_string();
        let digest = digest.to_string();

        task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
            .await
            .map(|result| result.unwrap_or(false))
            .unwrap_or(false)
    }
}

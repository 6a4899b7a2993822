//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::token::{Claims, TokenPair, JWT_AUDIENCE, JWT_ISSUER};
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying signed, expiring bearer tokens
///
/// Pure computation, no I/O; token pairs are never persisted. Expiry is
/// checked against the injected clock rather than inside the JWT library, so
/// token lifetimes are deterministic under test.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    /// * `clock` - Time source for expiry checks
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        // Expiry and nbf are validated against the injected clock below, not
        // against the library's wall-clock read.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Issues a signed token for the given subject with an explicit lifetime
    ///
    /// # Arguments
    ///
    /// * `user_id` - Subject of the token
    /// * `email` - Email claim
    /// * `role` - Role claim
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(DomainError)` - `TokenGenerationFailed` if signing failed
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, email, role, ttl, self.clock.now());
        self.encode_jwt(&claims)
    }

    /// Issues an access/refresh token pair from the same claim set
    ///
    /// The two tokens differ only in lifetime and JWT id.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Subject of both tokens
    /// * `email` - Email claim
    /// * `role` - Role claim
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated pair
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_pair(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, DomainError> {
        let access_ttl = Duration::minutes(self.config.access_token_expiry_minutes);
        let refresh_ttl = Duration::days(self.config.refresh_token_expiry_days);

        let access_token = self.issue(user_id, email, role, access_ttl)?;
        let refresh_token = self.issue(user_id, email, role, refresh_ttl)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_ttl,
            refresh_ttl,
        ))
    }

    /// Configured access token lifetime
    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.config.access_token_expiry_minutes)
    }

    /// Verifies a token and returns its claims
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT to verify
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(DomainError)` - `TokenExpired` past its expiry, `TokenMalformed`
    ///   if it cannot be parsed, `TokenInvalid` for everything else (bad
    ///   signature, wrong issuer/audience, premature nbf)
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => DomainError::Token(TokenError::TokenMalformed),
                    _ => DomainError::Token(TokenError::TokenInvalid),
                }
            })?;

        let claims = token_data.claims;
        let now = self.clock.now();

        if now.timestamp() < claims.nbf {
            return Err(DomainError::Token(TokenError::TokenInvalid));
        }
        if claims.is_expired(now) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        Ok(claims)
    }

    /// Structurally decodes a token without verifying its signature
    ///
    /// Diagnostics only. Must never feed an authorization decision.
    pub fn decode_unverified(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

//! Main authentication service implementation

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::user::{User, UserRole};
use crate::domain::entities::verification_token::TokenPurpose;
use crate::domain::value_objects::{AuthResponse, RefreshedToken};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{UserRepository, VerificationTokenRepository};
use crate::services::notifier::Notifier;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;
use crate::services::verification::VerificationTokenService;

use super::login_guard::{GuardDecision, LoginGuardTrait};

/// Input for the registration use case
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Unique handle
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Plaintext password; hashed before it is ever stored
    pub password: String,
    /// Optional display name
    pub full_name: Option<String>,
}

/// Authentication service composing the complete account lifecycle
///
/// The only component the caller-facing layer invokes. It owns error
/// classification: every underlying failure becomes exactly one domain error
/// kind before returning.
pub struct AuthService<U, V, N, G>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    N: Notifier,
    G: LoginGuardTrait,
{
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Verification token store for email-proof flows
    verification_service: Arc<VerificationTokenService<V>>,
    /// Token signer for access/refresh pairs
    token_service: Arc<TokenService>,
    /// Credential hasher
    password_hasher: Arc<PasswordHasher>,
    /// Login guard consulted around login attempts
    login_guard: Arc<G>,
    /// Outbound email capability
    notifier: Arc<N>,
    /// Time source for activity timestamps
    clock: Arc<dyn Clock>,
}

impl<U, V, N, G> AuthService<U, V, N, G>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    N: Notifier,
    G: LoginGuardTrait,
{
    /// Create a new authentication service
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationTokenService<V>>,
        token_service: Arc<TokenService>,
        password_hasher: Arc<PasswordHasher>,
        login_guard: Arc<G>,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            password_hasher,
            login_guard,
            notifier,
            clock,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Rejects if the email or handle is taken (email checked first)
    /// 2. Hashes the password and persists the user unverified
    /// 3. Issues an email verification token
    /// 4. Attempts to send the verification email; a send failure is logged
    ///    and swallowed so registration still succeeds and the user can
    ///    request a resend
    /// 5. Issues a token pair; login is deliberately not gated on
    ///    verification, so the new user is authenticated immediately
    ///
    /// # Arguments
    ///
    /// * `request` - Registration input
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The created user and its token pair
    /// * `Err(DomainError)` - `DuplicateEmail`, `DuplicateHandle`,
    ///   `HashingFailure`, or a persistence failure
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<AuthResponse> {
        if let Some(existing) = self
            .user_repository
            .find_by_email_or_username(&request.email, &request.username)
            .await?
        {
            if existing.email == request.email {
                return Err(AuthError::DuplicateEmail.into());
            }
            return Err(AuthError::DuplicateHandle.into());
        }

        let password_hash = self.password_hasher.hash(&request.password).await?;

        let user = User::new(
            request.username,
            request.email,
            Some(password_hash),
            request.full_name,
            self.clock.now(),
        );
        let user = self.user_repository.create(user).await?;

        let token = self
            .verification_service
            .issue(user.id, TokenPurpose::EmailVerification)
            .await?;

        if let Err(error) = self
            .notifier
            .send_verification_email(&user.email, user.display_name(), &token.secret)
            .await
        {
            // Deliberate policy: registration still succeeds. Recorded as an
            // observable event so systemic delivery breakage is detectable.
            tracing::warn!(
                user_id = %user.id,
                error,
                "verification email failed to send during registration"
            );
        }

        let tokens = self.token_service.issue_pair(user.id, &user.email, user.role)?;

        Ok(AuthResponse::new(user, tokens))
    }

    /// Authenticate with email and password
    ///
    /// This method:
    /// 1. Consults the login guard for the client identifier
    /// 2. Looks up the user and compares the password; both unknown email and
    ///    wrong password fail with the identical `InvalidCredentials`, and
    ///    both record a guard failure
    /// 3. On success, resets the guard, marks the user online with a fresh
    ///    activity timestamp, and issues a token pair
    ///
    /// # Arguments
    ///
    /// * `email` - Login email
    /// * `password` - Plaintext password
    /// * `client_id` - Client identifier (e.g. remote address) for throttling
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The user and its token pair
    /// * `Err(DomainError)` - `AccountBlocked` or `InvalidCredentials`
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client_id: &str,
    ) -> DomainResult<AuthResponse> {
        if let GuardDecision::Blocked { retry_after } = self.login_guard.check(client_id).await {
            return Err(AuthError::AccountBlocked {
                retry_after_secs: retry_after.num_seconds(),
            }
            .into());
        }

        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.login_guard.record_failure(client_id).await;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let password_matches = self
            .password_hasher
            .verify(password, user.password_hash.as_deref())
            .await;
        if !password_matches {
            self.login_guard.record_failure(client_id).await;
            return Err(AuthError::InvalidCredentials.into());
        }

        self.login_guard.record_success(client_id).await;

        let mut user = user;
        user.mark_online(self.clock.now());
        let user = self.user_repository.update(user).await?;

        let tokens = self.token_service.issue_pair(user.id, &user.email, user.role)?;

        Ok(AuthResponse::new(user, tokens))
    }

    /// Exchange a refresh token for a new access token
    ///
    /// Any verification failure, including a subject that no longer exists,
    /// collapses to `InvalidRefreshToken`. The role claim is reused from the
    /// presented refresh token rather than re-read from storage, so a role
    /// change does not take effect until the next full login.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The refresh token presented by the client
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshedToken)` - A new access token
    /// * `Err(DomainError)` - `InvalidRefreshToken`
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<RefreshedToken> {
        self.refresh_inner(refresh_token)
            .await
            .map_err(|_| TokenError::InvalidRefreshToken.into())
    }

    async fn refresh_inner(&self, refresh_token: &str) -> DomainResult<RefreshedToken> {
        let claims = self.token_service.verify(refresh_token)?;

        let user_id = claims
            .user_id()
            .map_err(|_| TokenError::TokenInvalid)?;

        // Confirm the subject still exists
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let role = UserRole::from_name(&claims.role).ok_or(TokenError::TokenInvalid)?;

        let ttl = self.token_service.access_token_ttl();
        let access_token = self.token_service.issue(user.id, &user.email, role, ttl)?;

        Ok(RefreshedToken {
            access_token,
            expires_in: ttl.num_seconds(),
        })
    }

    /// Log a user out
    ///
    /// Idempotent: logging out an already-offline or nonexistent user is not
    /// an error.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to log out
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        if let Some(mut user) = self.user_repository.find_by_id(user_id).await? {
            user.mark_offline(self.clock.now());
            self.user_repository.update(user).await?;
        }

        Ok(())
    }

    /// Verify a user's email address with a token secret
    ///
    /// Surfaces the store's error kinds as-is: expired and not-found are
    /// distinct user-facing messages.
    ///
    /// # Arguments
    ///
    /// * `secret` - The verification token secret from the emailed link
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The now-verified user
    /// * `Err(DomainError)` - `TokenNotFound`, `TokenExpired`, or
    ///   `UserNotFound` if the owning account vanished
    pub async fn verify_email(&self, secret: &str) -> DomainResult<User> {
        let user_id = self
            .verification_service
            .redeem(secret, TokenPurpose::EmailVerification)
            .await?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_verified {
            user.verify(self.clock.now());
            user = self.user_repository.update(user).await?;
        }

        Ok(user)
    }

    /// Re-issue and send a verification email
    ///
    /// Unlike registration, the send must succeed here: it is the user's
    /// explicit ask, so a delivery failure propagates.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user requesting the resend
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A fresh token was issued and the email sent
    /// * `Err(DomainError)` - `UserNotFound`, `AlreadyVerified`, or
    ///   `NotificationFailure`
    pub async fn resend_verification(&self, user_id: Uuid) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        let token = self
            .verification_service
            .issue(user.id, TokenPurpose::EmailVerification)
            .await?;

        self.notifier
            .send_verification_email(&user.email, user.display_name(), &token.secret)
            .await
            .map_err(|error| {
                tracing::warn!(user_id = %user.id, error, "verification email resend failed");
                AuthError::NotificationFailure
            })?;

        Ok(())
    }
}

//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Response returned after successful registration or login
///
/// The user serializes without its password hash; the token pair is ephemeral
/// and never stored server-side.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: User,

    /// Access/refresh token pair
    pub tokens: TokenPair,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}

/// Response returned after a successful token refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshedToken {
    /// Newly issued JWT access token
    pub access_token: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,
}

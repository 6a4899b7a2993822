//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_token;

// Re-export commonly used types
pub use token::{
    Claims, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{User, UserRole};
pub use verification_token::{
    TokenPurpose, VerificationToken, SECRET_BYTES, TOKEN_EXPIRY_HOURS,
};

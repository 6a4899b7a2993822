//! Business services containing domain logic and use cases.

pub mod auth;
pub mod notifier;
pub mod password;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{
    AuthService, GuardDecision, InMemoryLoginGuard, LoginGuardConfig, LoginGuardTrait,
    RegisterRequest,
};
pub use notifier::Notifier;
pub use password::{PasswordHasher, PasswordHasherConfig};
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{VerificationServiceConfig, VerificationTokenService};

//! Repository interfaces consumed by the core, plus in-memory mocks for
//! testing. Real implementations live in the infrastructure layer.

pub mod user;
pub mod verification_token;

pub use user::{MockUserRepository, UserRepository};
pub use verification_token::{MockVerificationTokenRepository, VerificationTokenRepository};

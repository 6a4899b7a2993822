//! Authentication service module
//!
//! This module composes the credential hasher, token signer, verification
//! token store, and login guard into the account use cases:
//! - Registration with email-ownership proof
//! - Password login with brute-force throttling
//! - Token refresh and logout
//! - Email verification and verification resend

mod login_guard;
mod service;

#[cfg(test)]
mod tests;

pub use login_guard::{GuardDecision, InMemoryLoginGuard, LoginGuardConfig, LoginGuardTrait};
pub use service::{AuthService, RegisterRequest};

//! Verification token service module
//!
//! Owns the single-use token lifecycle for email-ownership proof and
//! password resets: issuance with opportunistic cleanup, atomic redemption,
//! and the expired-vs-consumed distinction for user messaging.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationTokenService;

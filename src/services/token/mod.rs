//! Token service module for JWT management
//!
//! This module handles signed bearer token operations:
//! - Access/refresh pair issuance from one claim set with two TTLs
//! - Verification with a distinct error per failure mode
//! - Structural decode without signature verification (diagnostics only)

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;

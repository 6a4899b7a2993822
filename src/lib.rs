//! # Auth Core
//!
//! Core authentication and verification lifecycle engine. This crate contains
//! the domain entities, business services, repository interfaces, and error
//! types for account registration, password login, token pairs, email
//! ownership proof, and brute-force throttling. HTTP wiring, persistence, and
//! outbound email delivery live behind the traits defined here.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

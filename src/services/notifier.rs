//! Trait for the outbound notification capability.
//!
//! Email delivery itself is an external collaborator; the core only depends
//! on this narrow contract.

use async_trait::async_trait;

/// Trait for sending account-related notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a verification email carrying the token secret
    ///
    /// # Arguments
    /// * `to` - Recipient email address
    /// * `display_name` - Name used to address the recipient
    /// * `secret` - The verification token secret to embed in the link
    ///
    /// # Returns
    /// * `Ok(())` - The message was accepted for delivery
    /// * `Err(String)` - Delivery failed; the caller decides whether to surface it
    async fn send_verification_email(
        &self,
        to: &str,
        display_name: &str,
        secret: &str,
    ) -> Result<(), String>;
}

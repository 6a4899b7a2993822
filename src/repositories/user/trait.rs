//! User repository trait defining the interface for user data persistence.
//!
//! Implementations handle the actual database operations while keeping the
//! abstraction boundary between domain and infrastructure layers. They return
//! domain errors, never raw storage errors, and exclude soft-deleted rows
//! from every lookup.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// # Arguments
    /// * `email` - The email address to look up
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found, password hash included
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user whose email or username matches either argument
    ///
    /// Used as the collision probe during registration: callers inspect the
    /// returned user to tell which field collided.
    ///
    /// # Arguments
    /// * `email` - Candidate email address
    /// * `username` - Candidate handle
    ///
    /// # Returns
    /// * `Ok(Some(User))` - A user exists with that email or username
    /// * `Ok(None)` - Both are free
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. unique constraint)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Arguments
    /// * `user` - The User entity with updated fields
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - Update failed (e.g. user not found)
    async fn update(&self, user: User) -> Result<User, DomainError>;
}

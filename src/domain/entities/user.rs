//! User entity representing a registered account.
//!
//! The persisted record is owned by the external repository; this entity is
//! the in-core view of it. `password_hash` is either absent (social-login
//! identities) or an opaque bcrypt digest, never plaintext, and it is never
//! serialized into responses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a user, used to populate the role claim in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular registered user (default on registration)
    User,
    /// Moderation privileges
    Moderator,
    /// Full administrative privileges
    Admin,
}

impl UserRole {
    /// Parses a role from its lowercase claim name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "user" => Some(UserRole::User),
            "moderator" => Some(UserRole::Moderator),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::User => "user",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique handle chosen at registration
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Bcrypt digest of the password; None for externally-authenticated users
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    /// Optional display name
    pub full_name: Option<String>,

    /// Role reference for claim population
    pub role: UserRole,

    /// Whether the user's email address has been verified
    pub is_verified: bool,

    /// Whether the user currently has an active session
    pub is_online: bool,

    /// Timestamp of the user's last login or logout
    pub last_active_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; this core never hard-deletes users
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new unverified user with the default role
    pub fn new(
        username: String,
        email: String,
        password_hash: Option<String>,
        full_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            full_name,
            role: UserRole::User,
            is_verified: false,
            is_online: false,
            last_active_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Marks the user's email as verified
    pub fn verify(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.updated_at = now;
    }

    /// Marks the user online and refreshes the activity timestamp
    pub fn mark_online(&mut self, now: DateTime<Utc>) {
        self.is_online = true;
        self.last_active_at = Some(now);
        self.updated_at = now;
    }

    /// Marks the user offline and refreshes the activity timestamp
    pub fn mark_offline(&mut self, now: DateTime<Utc>) {
        self.is_online = false;
        self.last_active_at = Some(now);
        self.updated_at = now;
    }

    /// Soft-deletes the user
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Checks if the user has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Name used when addressing the user in notifications
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

//! User domain entity and related types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::UNVERIFIED_GRACE_MINUTES;

/// User domain entity
///
/// The email is the unique, immutable business key; the id is assigned
/// by the identity store on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: String,
    pub profile_pic: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Mark the account as verified
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
    }

    /// An unverified registration older than the grace window may be
    /// reclaimed so the email address becomes available again.
    pub fn is_stale_unverified(&self) -> bool {
        !self.is_verified
            && Utc::now() - self.created_at > Duration::minutes(UNVERIFIED_GRACE_MINUTES)
    }
}

/// New-user record handed to the identity store, which assigns the id
/// and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub is_verified: bool,
}

impl NewUser {
    /// Registration defaults: the display name is the email address and
    /// the username its local part; the account starts unverified.
    pub fn from_registration(email: &str, password_hash: String) -> Self {
        let username = email.split('@').next().unwrap_or(email);
        Self {
            email: email.to_string(),
            username: username.to_string(),
            display_name: email.to_string(),
            password_hash,
            is_verified: false,
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Partial profile update: absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub display_name: Option<String>,
    pub profile_pic: Option<String>,
}

/// Public profile projection (safe to return to clients)
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub profile_pic: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            username: user.username,
            display_name: user.display_name,
            bio: user.bio,
            profile_pic: user.profile_pic,
        }
    }
}

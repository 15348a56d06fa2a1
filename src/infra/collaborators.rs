//! Collaborator contracts for the identity core.
//!
//! The interactors hold these traits rather than concrete adaptors, so the
//! core has no compile-time knowledge of storage engines, mail transports,
//! or the post/comment subsystems.

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::domain::{NewUser, User};
use crate::errors::AppResult;

/// Durable user records, keyed by id and by (unique) email.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. The store assigns the id and creation time.
    /// Fails with `AppError::Conflict` when the email is already taken.
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    /// Fails with `AppError::NotFound` when no record exists for the id.
    async fn find_user(&self, id: Uuid) -> AppResult<User>;

    /// Fails with `AppError::NotFound` when no record exists for the email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<User>;

    async fn update_user(&self, user: &User) -> AppResult<()>;

    /// Fails with `AppError::NotFound` when no record exists for the id.
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Put-with-TTL / get-by-key storage for verification codes, keyed by email.
///
/// At most one code is active per email: a later put supersedes the
/// previous code. Expiry is enforced by the backing store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CodeStore: Send + Sync {
    async fn put(&self, email: &str, code: &str, ttl_seconds: u64) -> AppResult<()>;

    /// Returns `None` once the code has expired or was never issued.
    async fn get(&self, email: &str) -> AppResult<Option<String>>;
}

/// Outbound email transport.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Profile picture storage.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfilePicStore: Send + Sync {
    async fn save_image(&self, image: &[u8], filename: &str) -> AppResult<()>;
}

/// Post subsystem capability used by account deletion.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostDeleter: Send + Sync {
    /// Delete all posts owned by the user.
    async fn delete_user_posts(&self, user_id: Uuid) -> AppResult<()>;
}

/// Comment subsystem capability used by account deletion.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentDeleter: Send + Sync {
    /// Delete all comments owned by the user.
    async fn delete_user_comments(&self, user_id: Uuid) -> AppResult<()>;
}

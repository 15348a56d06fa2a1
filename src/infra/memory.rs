//! In-memory adaptors for embedded development and integration tests.
//!
//! These honor the collaborator contracts exactly: email uniqueness is
//! enforced atomically on insert, deleting an absent record is `NotFound`,
//! and code expiry is checked on read.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{CodeStore, CommentDeleter, PostDeleter, UserStore};

/// In-memory identity store keyed by email, with an id index.
#[derive(Default)]
pub struct InMemoryUsers {
    by_email: DashMap<String, User>,
    id_index: DashMap<Uuid, String>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed user record, bypassing id assignment.
    /// Intended for seeding fixtures.
    pub fn seed(&self, user: User) {
        self.id_index.insert(user.id, user.email.clone());
        self.by_email.insert(user.email.clone(), user);
    }
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        // The entry API makes the uniqueness check and insert atomic per key
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("User")),
            Entry::Vacant(slot) => {
                let record = User {
                    id: Uuid::new_v4(),
                    email: user.email,
                    username: user.username,
                    display_name: user.display_name,
                    password_hash: user.password_hash,
                    bio: String::new(),
                    profile_pic: String::new(),
                    is_verified: user.is_verified,
                    created_at: Utc::now(),
                };
                self.id_index.insert(record.id, record.email.clone());
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_user(&self, id: Uuid) -> AppResult<User> {
        let email = self.id_index.get(&id).ok_or(AppError::NotFound)?;
        self.by_email
            .get(email.value())
            .map(|u| u.clone())
            .ok_or(AppError::NotFound)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<User> {
        self.by_email
            .get(email)
            .map(|u| u.clone())
            .ok_or(AppError::NotFound)
    }

    async fn update_user(&self, user: &User) -> AppResult<()> {
        // The email is immutable, so the record replaces in place
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(user.clone());
                Ok(())
            }
            Entry::Vacant(_) => Err(AppError::NotFound),
        }
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let (_, email) = self.id_index.remove(&id).ok_or(AppError::NotFound)?;
        self.by_email.remove(&email);
        Ok(())
    }
}

/// In-memory verification-code store with expiry checked on read.
#[derive(Default)]
pub struct InMemoryCodes {
    codes: DashMap<String, (String, DateTime<Utc>)>,
}

impl InMemoryCodes {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodes {
    async fn put(&self, email: &str, code: &str, ttl_seconds: u64) -> AppResult<()> {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        self.codes
            .insert(email.to_string(), (code.to_string(), expires_at));
        Ok(())
    }

    async fn get(&self, email: &str) -> AppResult<Option<String>> {
        match self.codes.get(email) {
            Some(entry) if entry.1 > Utc::now() => Ok(Some(entry.0.clone())),
            _ => Ok(None),
        }
    }
}

/// In-memory post records, keyed by post id.
#[derive(Default)]
pub struct InMemoryPosts {
    posts: DashMap<Uuid, Uuid>,
}

impl InMemoryPosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a post owned by the user, returning the post id.
    pub fn seed(&self, owner: Uuid) -> Uuid {
        let post_id = Uuid::new_v4();
        self.posts.insert(post_id, owner);
        post_id
    }

    /// Number of posts remaining for the owner.
    pub fn count_for(&self, owner: Uuid) -> usize {
        self.posts.iter().filter(|e| *e.value() == owner).count()
    }
}

#[async_trait]
impl PostDeleter for InMemoryPosts {
    async fn delete_user_posts(&self, user_id: Uuid) -> AppResult<()> {
        self.posts.retain(|_, owner| *owner != user_id);
        Ok(())
    }
}

/// In-memory comment records, keyed by comment id.
#[derive(Default)]
pub struct InMemoryComments {
    comments: DashMap<Uuid, Uuid>,
}

impl InMemoryComments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a comment owned by the user, returning the comment id.
    pub fn seed(&self, owner: Uuid) -> Uuid {
        let comment_id = Uuid::new_v4();
        self.comments.insert(comment_id, owner);
        comment_id
    }

    /// Number of comments remaining for the owner.
    pub fn count_for(&self, owner: Uuid) -> usize {
        self.comments.iter().filter(|e| *e.value() == owner).count()
    }
}

#[async_trait]
impl CommentDeleter for InMemoryComments {
    async fn delete_user_comments(&self, user_id: Uuid) -> AppResult<()> {
        self.comments.retain(|_, owner| *owner != user_id);
        Ok(())
    }
}

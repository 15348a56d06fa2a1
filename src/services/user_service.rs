//! User service - profile management and account deletion.
//!
//! Account deletion fans out to the post and comment subsystems before
//! the identity record is removed. The fan-out is best-effort sequencing,
//! not a transaction: a failure midway leaves the remaining records in
//! place and surfaces the error unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Password, Profile, UpdateProfile};
use crate::errors::{AppError, AppResult};
use crate::infra::{CommentDeleter, PostDeleter, ProfilePicStore, UserStore};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Public profile for the user
    async fn get_user(&self, id: Uuid) -> AppResult<Profile>;

    /// Partial profile update: absent fields are left untouched
    async fn update(&self, id: Uuid, changes: UpdateProfile) -> AppResult<()>;

    /// Rotate the password after verifying the old one
    async fn update_password(&self, id: Uuid, old: &str, new: &str) -> AppResult<()>;

    /// Store a new profile picture and return its filename
    async fn update_profile_pic(&self, id: Uuid, image: &[u8], format: &str) -> AppResult<String>;

    /// Delete the account and all content it owns: posts, then comments,
    /// then the identity record
    async fn delete_account(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    store: Arc<dyn UserStore>,
    pics: Arc<dyn ProfilePicStore>,
    posts: Arc<dyn PostDeleter>,
    comments: Arc<dyn CommentDeleter>,
}

impl UserManager {
    pub fn new(
        store: Arc<dyn UserStore>,
        pics: Arc<dyn ProfilePicStore>,
        posts: Arc<dyn PostDeleter>,
        comments: Arc<dyn CommentDeleter>,
    ) -> Self {
        Self {
            store,
            pics,
            posts,
            comments,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<Profile> {
        self.store.find_user(id).await.map(Profile::from)
    }

    async fn update(&self, id: Uuid, changes: UpdateProfile) -> AppResult<()> {
        let mut user = self.store.find_user(id).await?;

        if let Some(bio) = changes.bio {
            user.bio = bio;
        }
        if let Some(display_name) = changes.display_name {
            user.display_name = display_name;
        }
        if let Some(profile_pic) = changes.profile_pic {
            user.profile_pic = profile_pic;
        }

        self.store.update_user(&user).await
    }

    async fn update_password(&self, id: Uuid, old: &str, new: &str) -> AppResult<()> {
        let mut user = self.store.find_user(id).await?;

        if !Password::from_hash(user.password_hash.clone()).verify(old) {
            return Err(AppError::InvalidCredentials);
        }

        user.password_hash = Password::new(new)?.into_string();
        self.store.update_user(&user).await
    }

    async fn update_profile_pic(&self, id: Uuid, image: &[u8], format: &str) -> AppResult<String> {
        let mut user = self.store.find_user(id).await?;

        let filename = format!("{}.{}", user.id, format);
        self.pics.save_image(image, &filename).await?;

        user.profile_pic = filename.clone();
        self.store.update_user(&user).await?;

        Ok(filename)
    }

    async fn delete_account(&self, id: Uuid) -> AppResult<()> {
        self.posts.delete_user_posts(id).await?;
        self.comments.delete_user_comments(id).await?;
        self.store.delete_user(id).await?;

        tracing::info!(user_id = %id, "account deleted");
        Ok(())
    }
}

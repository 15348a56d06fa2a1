//! Infrastructure layer - collaborator contracts and adaptors
//!
//! The services depend on the traits in [`collaborators`]; the sibling
//! modules provide adaptors for them:
//! - redis-backed verification-code store ([`cache`])
//! - SMTP mail delivery ([`email`])
//! - filesystem image storage ([`files`])
//! - in-memory stores for embedded development and tests ([`memory`])

pub mod cache;
pub mod collaborators;
pub mod email;
pub mod files;
pub mod memory;

pub use cache::Cache;
pub use collaborators::{
    CodeStore, CommentDeleter, EmailSender, PostDeleter, ProfilePicStore, UserStore,
};
pub use email::SmtpMailer;
pub use files::FsImageStore;
pub use memory::{InMemoryCodes, InMemoryComments, InMemoryPosts, InMemoryUsers};

#[cfg(test)]
pub use collaborators::{
    MockCodeStore, MockCommentDeleter, MockEmailSender, MockPostDeleter, MockProfilePicStore,
    MockUserStore,
};

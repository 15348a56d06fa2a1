//! Inkpost - identity and content backend core
//!
//! This crate provides the identity & authentication lifecycle of a
//! writing platform: account registration, email verification, credential
//! management, token-based session issuance, and cascading account
//! deletion across user-owned content.
//!
//! # Architecture Layers
//!
//! - **config**: Application configuration and policy constants
//! - **domain**: Core business entities and value objects
//! - **services**: Application use cases (authentication, account management)
//! - **infra**: Collaborator contracts and adaptors (redis, smtp, filesystem)
//! - **utils**: Message templates
//! - **errors**: Centralized error handling
//!
//! Persistence of users, posts and comments is a collaborator boundary:
//! the services depend on the traits in [`infra`], never on a concrete
//! storage engine.

pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use services::{AuthService, Services, TokenPair, UserService};

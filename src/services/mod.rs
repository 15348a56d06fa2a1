//! Application services layer - use cases and business logic.
//!
//! Services orchestrate domain logic and collaborators to fulfill the
//! identity lifecycle. They depend on the traits in [`crate::infra`]
//! for dependency inversion.

mod auth_service;
pub mod container;
mod token;
mod user_service;
mod verification;

// Service container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use token::{AccessClaims, AuthUser, RefreshClaims, TokenPair, TokenSigner};
pub use user_service::{UserManager, UserService};
pub use verification::VerificationService;

#[cfg(test)]
pub use container::MockServiceContainer;

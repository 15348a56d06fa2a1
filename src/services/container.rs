//! Service container - composition root for the identity services.
//!
//! Wires the collaborator adaptors into the authentication and user
//! services. Depends on the collaborator traits, never on concrete
//! storage engines.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use super::{
    AuthService, Authenticator, TokenSigner, UserManager, UserService, VerificationService,
};
use crate::config::Config;
use crate::infra::{
    CodeStore, CommentDeleter, EmailSender, PostDeleter, ProfilePicStore, UserStore,
};

/// Service container trait for dependency injection.
#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Wire all services from a set of collaborator adaptors.
    /// The signing secret is injected here, once, from configuration.
    pub fn from_collaborators(
        store: Arc<dyn UserStore>,
        codes: Arc<dyn CodeStore>,
        mail: Arc<dyn EmailSender>,
        pics: Arc<dyn ProfilePicStore>,
        posts: Arc<dyn PostDeleter>,
        comments: Arc<dyn CommentDeleter>,
        config: &Config,
    ) -> Self {
        let tokens = TokenSigner::new(config.jwt_secret_bytes());
        let verification = VerificationService::new(codes);

        let auth_service = Arc::new(Authenticator::new(
            store.clone(),
            mail,
            verification,
            tokens,
        ));
        let user_service = Arc::new(UserManager::new(store, pics, posts, comments));

        Self {
            auth_service,
            user_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}

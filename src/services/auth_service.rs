//! Authentication service - registration, verification, and session issuance.
//!
//! Orchestrates the unverified -> verified account lifecycle against the
//! identity store, the verification-code service, and the mail collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::config::VERIFICATION_EMAIL_SUBJECT;
use crate::domain::{password::DUMMY_DIGEST, NewUser, Password, RegisterUser};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmailSender, UserStore};
use crate::services::{TokenPair, TokenSigner, VerificationService};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new, unverified account and send the verification code
    async fn register(&self, req: RegisterUser) -> AppResult<()>;

    /// Whether the email address is available for registration
    async fn check_email(&self, email: &str) -> AppResult<bool>;

    /// Flip the account to verified when the submitted code matches
    async fn verify_user(&self, email: &str, code: &str) -> AppResult<()>;

    /// Exchange credentials for a token pair
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair>;

    /// Exchange a refresh token for a fresh token pair
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    store: Arc<dyn UserStore>,
    mail: Arc<dyn EmailSender>,
    verification: VerificationService,
    tokens: TokenSigner,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn UserStore>,
        mail: Arc<dyn EmailSender>,
        verification: VerificationService,
        tokens: TokenSigner,
    ) -> Self {
        Self {
            store,
            mail,
            verification,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, req: RegisterUser) -> AppResult<()> {
        req.validate()?;

        let password_hash = Password::new(&req.password)?.into_string();

        // The deliverable body must exist before the user record is
        // committed; the send itself stays last. A send failure after the
        // commit leaves the user registered without a code - check_email's
        // grace-window reclaim frees the address again.
        let body = self.verification.create(&req.email).await?;

        let user = NewUser::from_registration(&req.email, password_hash);
        self.store.create_user(user).await?;

        self.mail
            .send_email(&req.email, VERIFICATION_EMAIL_SUBJECT, &body)
            .await
    }

    async fn check_email(&self, email: &str) -> AppResult<bool> {
        let user = match self.store.find_user_by_email(email).await {
            Ok(user) => user,
            Err(AppError::NotFound) => return Ok(true),
            Err(e) => return Err(e),
        };

        // Registered but never verified: reclaim the address once the
        // grace window has passed
        if user.is_stale_unverified() {
            self.store.delete_user(user.id).await?;
            return Ok(true);
        }

        Ok(false)
    }

    async fn verify_user(&self, email: &str, code: &str) -> AppResult<()> {
        let active = self.verification.find(email).await?;
        if active != code {
            return Err(AppError::InvalidCredentials);
        }

        let mut user = self.store.find_user_by_email(email).await?;
        user.mark_verified();
        self.store.update_user(&user).await
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user = match self.store.find_user_by_email(email).await {
            Ok(user) => Some(user),
            Err(AppError::NotFound) => None,
            Err(e) => return Err(e),
        };

        // The hash comparison runs even when the lookup misses, so response
        // timing does not separate unknown emails from wrong passwords
        let digest = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(DUMMY_DIGEST);
        let password_valid = Password::from_hash(digest.to_string()).verify(password);

        match user {
            Some(user) if password_valid => self.tokens.generate_pair(&user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let user_id = self.tokens.parse_ref_token(refresh_token)?;
        let user = self.store.find_user(user_id).await?;
        self.tokens.generate_pair(&user)
    }
}

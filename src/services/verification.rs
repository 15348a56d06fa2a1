//! Verification-code issuance and lookup.
//!
//! Codes come from the OS entropy source: a predictable code here would
//! allow account takeover before verification. Expiry belongs to the
//! backing store; this layer never retries storage failures.

use std::sync::Arc;

use rand::{rngs::OsRng, Rng};

use crate::config::{VERIFICATION_CODE_MAX, VERIFICATION_CODE_MIN, VERIFICATION_CODE_TTL_SECONDS};
use crate::errors::{AppResult, OptionExt};
use crate::infra::CodeStore;
use crate::utils::templates;

/// Issues and looks up short-lived numeric codes bound to an email.
pub struct VerificationService {
    codes: Arc<dyn CodeStore>,
}

impl VerificationService {
    pub fn new(codes: Arc<dyn CodeStore>) -> Self {
        Self { codes }
    }

    /// Generate a fresh code for the email, persist it with the standard
    /// TTL, and return the rendered message body embedding it.
    /// A previous code for the same email is superseded.
    pub async fn create(&self, email: &str) -> AppResult<String> {
        let code = generate_code();
        self.codes
            .put(email, &code, VERIFICATION_CODE_TTL_SECONDS)
            .await?;
        Ok(templates::verification_body(&code))
    }

    /// The currently active code for the email; `NotFound` once expired
    /// or never issued.
    pub async fn find(&self, email: &str) -> AppResult<String> {
        self.codes.get(email).await?.ok_or_not_found()
    }
}

/// Uniformly random 6-digit code from a cryptographically secure source.
fn generate_code() -> String {
    OsRng
        .gen_range(VERIFICATION_CODE_MIN..VERIFICATION_CODE_MAX)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockCodeStore;

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((VERIFICATION_CODE_MIN..VERIFICATION_CODE_MAX).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_create_persists_code_and_renders_body() {
        let mut codes = MockCodeStore::new();
        codes
            .expect_put()
            .withf(|email, code, ttl| {
                email == "writer@example.com"
                    && code.len() == 6
                    && *ttl == VERIFICATION_CODE_TTL_SECONDS
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = VerificationService::new(Arc::new(codes));
        let body = service.create("writer@example.com").await.unwrap();

        // The body embeds the code on its own line
        assert!(body
            .lines()
            .any(|line| line.len() == 6 && line.chars().all(|c| c.is_ascii_digit())));
    }

    #[tokio::test]
    async fn test_find_maps_missing_code_to_not_found() {
        let mut codes = MockCodeStore::new();
        codes.expect_get().returning(|_| Ok(None));

        let service = VerificationService::new(Arc::new(codes));
        assert!(matches!(
            service.find("writer@example.com").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_find_returns_active_code() {
        let mut codes = MockCodeStore::new();
        codes
            .expect_get()
            .returning(|_| Ok(Some("123456".to_string())));

        let service = VerificationService::new(Arc::new(codes));
        assert_eq!(service.find("writer@example.com").await.unwrap(), "123456");
    }
}

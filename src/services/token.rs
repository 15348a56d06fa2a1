//! Token issuance and validation.
//!
//! Stateless HS256 signer/verifier for the access/refresh token pair.
//! There is no revocation list: expiry is the only defense, which is a
//! deliberate trade-off, not an oversight. The short-lived access token
//! limits the exposure window of a leak; the refresh token lives longer
//! but carries only the subject id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ACCESS_TOKEN_TTL_MINUTES, REFRESH_TOKEN_TTL_DAYS};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Access-token claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub username: String,
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Refresh-token claims payload. Carries only the subject id.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Token pair returned after successful authentication.
/// Never persisted server-side; the client is responsible for possession.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Identity extracted from a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Signs and verifies token pairs with a symmetric secret injected once
/// at construction.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mint an access/refresh pair for the user. Expiry is relative to
    /// call time.
    pub fn generate_pair(&self, user: &User) -> AppResult<TokenPair> {
        let now = Utc::now();

        let access = AccessClaims {
            username: user.username.clone(),
            user_id: user.id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp(),
        };
        let refresh = RefreshClaims {
            sub: user.id,
            iat: now.timestamp(),
            exp: (now + Duration::days(REFRESH_TOKEN_TTL_DAYS)).timestamp(),
        };

        let access_token = encode(&Header::default(), &access, &self.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;
        let refresh_token = encode(&Header::default(), &refresh, &self.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify an access token and extract the caller's identity.
    /// Signature mismatch, malformed structure, and expiry all map to the
    /// same `InvalidToken`.
    pub fn parse_token(&self, token: &str) -> AppResult<AuthUser> {
        let data = decode::<AccessClaims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::InvalidToken)?;

        Ok(AuthUser {
            id: data.claims.user_id,
            username: data.claims.username,
        })
    }

    /// Verify a refresh token and extract the subject user id.
    pub fn parse_ref_token(&self, token: &str) -> AppResult<Uuid> {
        let data = decode::<RefreshClaims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::InvalidToken)?;

        Ok(data.claims.sub)
    }
}

//! Redis cache implementation.
//!
//! Backs the verification-code store with put-with-TTL / get-by-key
//! semantics. Expiry is Redis's responsibility (`SET EX`); the core
//! never tracks code age itself.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, CACHE_PREFIX_VERIFICATION};
use crate::errors::{AppError, AppResult};
use crate::infra::CodeStore;

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if the Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self { connection }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self { connection })
    }

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with a TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

}

fn verification_key(email: &str) -> String {
    format!("{}{}", CACHE_PREFIX_VERIFICATION, email)
}

#[async_trait]
impl CodeStore for Cache {
    async fn put(&self, email: &str, code: &str, ttl_seconds: u64) -> AppResult<()> {
        self.set_with_ttl(&verification_key(email), &code, ttl_seconds)
            .await
    }

    async fn get(&self, email: &str) -> AppResult<Option<String>> {
        Cache::get(self, &verification_key(email)).await
    }
}

/// Map Redis errors to storage errors.
fn cache_error(e: RedisError) -> AppError {
    AppError::Storage(format!("Redis error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_key_is_prefixed() {
        assert_eq!(
            verification_key("writer@example.com"),
            "verify:writer@example.com"
        );
    }
}

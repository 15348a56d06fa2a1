//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.
//! The token and grace-window durations are fixed policy, not tunables.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Access token lifetime in minutes
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Refresh token lifetime in days (one month)
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

// =============================================================================
// Email Verification
// =============================================================================

/// Lower bound of the verification code range (inclusive)
pub const VERIFICATION_CODE_MIN: u32 = 100_000;

/// Upper bound of the verification code range (exclusive)
pub const VERIFICATION_CODE_MAX: u32 = 1_000_000;

/// Verification code time-to-live in seconds, enforced by the backing store
pub const VERIFICATION_CODE_TTL_SECONDS: u64 = 900;

/// Subject line of the verification email
pub const VERIFICATION_EMAIL_SUBJECT: &str = "Verification Code";

/// Minutes before an unverified registration may be reclaimed
pub const UNVERIFIED_GRACE_MINUTES: i64 = 5;

// =============================================================================
// Cache (Redis)
// =============================================================================

/// Default Redis URL (for development)
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Cache key prefix for verification codes
pub const CACHE_PREFIX_VERIFICATION: &str = "verify:";

// =============================================================================
// Email (SMTP)
// =============================================================================

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when SMTP_FROM is not set
pub const DEFAULT_SMTP_FROM: &str = "noreply@inkpost.dev";

// =============================================================================
// Media Storage
// =============================================================================

/// Default base directory for stored media
pub const DEFAULT_MEDIA_DIR: &str = "./media";

/// Subdirectory for profile pictures
pub const AVATAR_SUBDIR: &str = "avatars";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

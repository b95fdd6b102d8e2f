//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size bounded)
//!
//! Returns every problem found, not just the first.

use thiserror::Error;
use crate::config::schema::StatServerConfig;

/// Largest supported proxy pool.
pub const MAX_POOL_SIZE: u32 = 99;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("settings.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("settings.mount_id must not be empty")]
    EmptyMountId,

    #[error("upstream.pool_size must be between 1 and {max}, got {0}", max = MAX_POOL_SIZE)]
    PoolSize(u32),

    #[error("upstream.host_template must contain {{n}} when pool_size > 1")]
    TemplateWithoutIndex,

    #[error("{0} must be greater than zero")]
    ZeroCooldown(&'static str),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &StatServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.settings.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.settings.mount_id.trim().is_empty() {
        errors.push(ValidationError::EmptyMountId);
    }

    let pool_size = config.upstream.pool_size;
    if pool_size == 0 || pool_size > MAX_POOL_SIZE {
        errors.push(ValidationError::PoolSize(pool_size));
    } else if pool_size > 1 && !config.upstream.host_template.contains("{n}") {
        errors.push(ValidationError::TemplateWithoutIndex);
    }

    if config.cache.error_ttl_secs == 0 {
        errors.push(ValidationError::ZeroCooldown("cache.error_ttl_secs"));
    }
    if config.breaker.cooldown_secs == 0 {
        errors.push(ValidationError::ZeroCooldown("breaker.cooldown_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

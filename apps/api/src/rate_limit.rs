//! Per-owner request throttling backed by Redis.
//!
//! Fixed-window counters: INCR the window key, set the expiry on the first
//! hit. Any Redis failure is logged and the request is allowed through, so
//! the limiter degrades to a no-op when Redis is down.

use redis::AsyncCommands;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

/// Throttling tier applied per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitTier {
    /// 10 requests per 10 seconds — CRUD and listing routes.
    Standard,
    /// 5 requests per minute — calendar generation.
    Strict,
}

impl RateLimitTier {
    fn max_requests(self) -> i64 {
        match self {
            RateLimitTier::Standard => 10,
            RateLimitTier::Strict => 5,
        }
    }

    fn window_secs(self) -> i64 {
        match self {
            RateLimitTier::Standard => 10,
            RateLimitTier::Strict => 60,
        }
    }

    fn key_prefix(self) -> &'static str {
        match self {
            RateLimitTier::Standard => "ratelimit:standard",
            RateLimitTier::Strict => "ratelimit:strict",
        }
    }
}

/// Counts this request against the owner's window; errors with `RateLimited`
/// once the tier's budget is exhausted.
pub async fn check_rate_limit(
    client: &redis::Client,
    tier: RateLimitTier,
    owner_id: Uuid,
) -> Result<(), AppError> {
    let key = format!("{}:{owner_id}", tier.key_prefix());

    let count = match increment_window(client, &key, tier.window_secs()).await {
        Ok(count) => count,
        Err(e) => {
            warn!("Rate limit check failed, allowing request: {e}");
            return Ok(());
        }
    };

    if count > tier.max_requests() {
        return Err(AppError::RateLimited);
    }
    Ok(())
}

async fn increment_window(
    client: &redis::Client,
    key: &str,
    window_secs: i64,
) -> redis::RedisResult<i64> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let count: i64 = conn.incr(key, 1).await?;
    if count == 1 {
        let _: () = conn.expire(key, window_secs).await?;
    }
    Ok(count)
}

use redis::Client as RedisClient;
use sqlx::PgPool;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis client backing the per-owner rate limiter.
    pub redis: RedisClient,
}

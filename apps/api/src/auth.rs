//! Owner identity extraction.
//!
//! Authentication itself lives at the edge: by the time a request reaches
//! this service the gateway has verified the session and forwarded the owner
//! id in the `X-User-Id` header. A missing or malformed header is rejected
//! as unauthorized.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const OWNER_HEADER: &str = "x-user-id";

/// The authenticated owner of the request, extracted from the gateway header.
#[derive(Debug, Clone, Copy)]
pub struct AuthOwner(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let owner_id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;
        Ok(AuthOwner(owner_id))
    }
}

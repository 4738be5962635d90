//! Axum route handlers for the Personas API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::access::{delete_owned, OwnedTable};
use crate::auth::AuthOwner;
use crate::errors::AppError;
use crate::models::persona::PersonaRow;
use crate::personas::store;
use crate::rate_limit::{check_rate_limit, RateLimitTier};
use crate::state::AppState;

const MAX_USERNAME_LEN: usize = 50;
const MAX_BIO_LEN: usize = 500;
const MAX_SUBREDDITS: usize = 20;
const MAX_SUBREDDIT_LEN: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CreatePersonaRequest {
    pub username: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub subreddits: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PersonaListResponse {
    pub success: bool,
    pub personas: Vec<PersonaRow>,
}

#[derive(Debug, Serialize)]
pub struct CreatePersonaResponse {
    pub success: bool,
    pub persona: PersonaRow,
}

/// GET /personas
pub async fn handle_list(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
) -> Result<Json<PersonaListResponse>, AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    let personas = store::list_for_owner(&state.db, owner_id).await?;
    Ok(Json(PersonaListResponse {
        success: true,
        personas,
    }))
}

/// POST /personas
pub async fn handle_create(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
    Json(request): Json<CreatePersonaRequest>,
) -> Result<(StatusCode, Json<CreatePersonaResponse>), AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    let username = validate_username(&request.username)?;
    let bio = validate_bio(request.bio.as_deref())?;
    validate_subreddits(&request.subreddits)?;

    let persona = store::insert(&state.db, owner_id, username, bio, &request.subreddits).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePersonaResponse {
            success: true,
            persona,
        }),
    ))
}

/// DELETE /personas/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    delete_owned(&state.db, OwnedTable::Personas, id, owner_id).await?;
    Ok(Json(json!({ "success": true })))
}

fn validate_username(raw: &str) -> Result<&str, AppError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::Validation(
            "username can only contain letters, numbers, underscores, and hyphens".to_string(),
        ));
    }
    Ok(username)
}

fn validate_bio(raw: Option<&str>) -> Result<Option<&str>, AppError> {
    match raw {
        None => Ok(None),
        Some(bio) if bio.chars().count() > MAX_BIO_LEN => Err(AppError::Validation(format!(
            "bio must be at most {MAX_BIO_LEN} characters"
        ))),
        Some(bio) => Ok(Some(bio)),
    }
}

fn validate_subreddits(subreddits: &[String]) -> Result<(), AppError> {
    if subreddits.len() > MAX_SUBREDDITS {
        return Err(AppError::Validation(format!(
            "at most {MAX_SUBREDDITS} subreddits allowed"
        )));
    }
    for subreddit in subreddits {
        let len = subreddit.chars().count();
        if len == 0 || len > MAX_SUBREDDIT_LEN {
            return Err(AppError::Validation(format!(
                "each subreddit must be between 1 and {MAX_SUBREDDIT_LEN} characters"
            )));
        }
    }
    Ok(())
}

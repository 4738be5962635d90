//! Axum route handlers for the Keywords API.

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
use crate::keywords::store;
use crate::models::keyword::{IntentCategory, KeywordRow};
use crate::rate_limit::{check_rate_limit, RateLimitTier};
use crate::state::AppState;

const MAX_KEYWORD_LEN: usize = 200;
const MAX_SEARCH_INTENT_LEN: usize = 500;

#[derive(Debug, Deserialize)]
pub struct CreateKeywordRequest {
    pub keyword: String,
    pub search_intent: Option<String>,
    #[serde(default)]
    pub intent_category: IntentCategory,
}

#[derive(Debug, Serialize)]
pub struct KeywordListResponse {
    pub success: bool,
    pub keywords: Vec<KeywordRow>,
}

#[derive(Debug, Serialize)]
pub struct CreateKeywordResponse {
    pub success: bool,
    pub keyword: KeywordRow,
}

/// GET /keywords
pub async fn handle_list(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
) -> Result<Json<KeywordListResponse>, AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    let keywords = store::list_for_owner(&state.db, owner_id).await?;
    Ok(Json(KeywordListResponse {
        success: true,
        keywords,
    }))
}

/// POST /keywords
pub async fn handle_create(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
    Json(request): Json<CreateKeywordRequest>,
) -> Result<(StatusCode, Json<CreateKeywordResponse>), AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    let keyword = validate_keyword(&request.keyword)?;
    let search_intent = validate_search_intent(request.search_intent.as_deref())?;

    let created = store::insert(
        &state.db,
        owner_id,
        keyword,
        search_intent,
        request.intent_category.as_str(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateKeywordResponse {
            success: true,
            keyword: created,
        }),
    ))
}

/// DELETE /keywords/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    delete_owned(&state.db, OwnedTable::Keywords, id, owner_id).await?;
    Ok(Json(json!({ "success": true })))
}

fn validate_keyword(raw: &str) -> Result<&str, AppError> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(AppError::Validation("keyword is required".to_string()));
    }
    if keyword.chars().count() > MAX_KEYWORD_LEN {
        return Err(AppError::Validation(format!(
            "keyword must be at most {MAX_KEYWORD_LEN} characters"
        )));
    }
    Ok(keyword)
}

fn validate_search_intent(raw: Option<&str>) -> Result<Option<&str>, AppError> {
    match raw {
        None => Ok(None),
        Some(intent) if intent.chars().count() > MAX_SEARCH_INTENT_LEN => {
            Err(AppError::Validation(format!(
                "search_intent must be at most {MAX_SEARCH_INTENT_LEN} characters"
            )))
        }
        Some(intent) => Ok(Some(intent)),
    }
}

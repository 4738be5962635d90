//! Axum route handlers for the Planning API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthOwner;
use crate::errors::AppError;
use crate::keywords::store as keyword_store;
use crate::models::calendar::CalendarAggregate;
use crate::personas::store as persona_store;
use crate::planning::generator::{generate_calendar, MAX_POSTS_PER_WEEK, MIN_POSTS_PER_WEEK};
use crate::planning::repository::{insert_calendar, list_calendars};
use crate::rate_limit::{check_rate_limit, RateLimitTier};
use crate::state::AppState;

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWeekRequest {
    pub week_start: String,
    #[serde(default = "default_posts_per_week")]
    pub posts_per_week: u32,
}

fn default_posts_per_week() -> u32 {
    3
}

#[derive(Debug, Serialize)]
pub struct GenerateWeekResponse {
    pub success: bool,
    pub calendar: CalendarAggregate,
}

#[derive(Debug, Deserialize)]
pub struct CalendarListQuery {
    #[serde(default = "default_page_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_page_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Serialize)]
pub struct CalendarListResponse {
    pub success: bool,
    pub calendars: Vec<CalendarAggregate>,
    pub count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /planning/generate-week
///
/// Full generation pipeline: validate → fetch personas and keywords
/// concurrently → generate in memory → persist transactionally.
pub async fn handle_generate_week(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
    Json(request): Json<GenerateWeekRequest>,
) -> Result<Json<GenerateWeekResponse>, AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Strict, owner_id).await?;

    let week_start = parse_week_start(&request.week_start)?;
    validate_posts_per_week(request.posts_per_week)?;

    let (personas, keywords) = tokio::try_join!(
        persona_store::list_for_owner(&state.db, owner_id),
        keyword_store::list_for_owner(&state.db, owner_id),
    )?;

    let generated = generate_calendar(
        &personas,
        &keywords,
        week_start,
        request.posts_per_week,
        &mut rand::thread_rng(),
    )?;

    let calendar = insert_calendar(&state.db, owner_id, &generated).await?;

    info!(
        "Generated calendar {} ({} posts, quality {:.2}) for owner {owner_id}",
        calendar.id,
        calendar.posts.len(),
        calendar.quality_score
    );

    Ok(Json(GenerateWeekResponse {
        success: true,
        calendar,
    }))
}

/// GET /planning/calendars
pub async fn handle_list_calendars(
    State(state): State<AppState>,
    AuthOwner(owner_id): AuthOwner,
    Query(query): Query<CalendarListQuery>,
) -> Result<Json<CalendarListResponse>, AppError> {
    check_rate_limit(&state.redis, RateLimitTier::Standard, owner_id).await?;

    validate_page(&query)?;

    let calendars = list_calendars(&state.db, owner_id, query.limit, query.offset).await?;
    let count = calendars.len();

    Ok(Json(CalendarListResponse {
        success: true,
        calendars,
        count,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Accepts exactly `YYYY-MM-DD`. The shape check runs first so lenient date
/// parsing cannot let variants like `2024-1-1` through.
fn parse_week_start(raw: &str) -> Result<NaiveDate, AppError> {
    let shape_ok = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(AppError::Validation(
            "weekStart must be in YYYY-MM-DD format".to_string(),
        ));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("weekStart is not a valid calendar date".to_string()))
}

fn validate_posts_per_week(posts_per_week: u32) -> Result<(), AppError> {
    if !(MIN_POSTS_PER_WEEK..=MAX_POSTS_PER_WEEK).contains(&posts_per_week) {
        return Err(AppError::Validation(format!(
            "postsPerWeek must be between {MIN_POSTS_PER_WEEK} and {MAX_POSTS_PER_WEEK}"
        )));
    }
    Ok(())
}

fn validate_page(query: &CalendarListQuery) -> Result<(), AppError> {
    if !(1..=MAX_PAGE_LIMIT).contains(&query.limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }
    if query.offset < 0 {
        return Err(AppError::Validation("offset must be non-negative".to_string()));
    }
    Ok(())
}

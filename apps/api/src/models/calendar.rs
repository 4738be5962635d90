use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalendarRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub week_start: NaiveDate,
    pub quality_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub subreddit: String,
    pub persona_id: Uuid,
    pub title: String,
    pub body: String,
    pub scheduled_time: DateTime<Utc>,
    pub keyword_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub persona_id: Uuid,
    pub text: String,
    pub scheduled_time: DateTime<Utc>,
}

/// A post with its scheduled comments, as returned by the planning API.
#[derive(Debug, Clone, Serialize)]
pub struct PostAggregate {
    #[serde(flatten)]
    pub post: PostRow,
    pub comments: Vec<CommentRow>,
}

/// A calendar with all posts and comments nested.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarAggregate {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub week_start: NaiveDate,
    pub quality_score: f64,
    pub created_at: DateTime<Utc>,
    pub posts: Vec<PostAggregate>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonaRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub subreddits: Vec<String>,
    pub created_at: DateTime<Utc>,
}

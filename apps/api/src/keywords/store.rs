use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::keyword::KeywordRow;

/// Returns all of the owner's keywords, newest first.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<KeywordRow>, AppError> {
    Ok(sqlx::query_as::<_, KeywordRow>(
        "SELECT * FROM keywords WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert(
    pool: &PgPool,
    owner_id: Uuid,
    keyword: &str,
    search_intent: Option<&str>,
    intent_category: &str,
) -> Result<KeywordRow, AppError> {
    Ok(sqlx::query_as::<_, KeywordRow>(
        r#"
        INSERT INTO keywords (id, owner_id, keyword, search_intent, intent_category)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(keyword)
    .bind(search_intent)
    .bind(intent_category)
    .fetch_one(pool)
    .await?)
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::persona::PersonaRow;

/// Returns all of the owner's personas, newest first.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<PersonaRow>, AppError> {
    Ok(sqlx::query_as::<_, PersonaRow>(
        "SELECT * FROM personas WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert(
    pool: &PgPool,
    owner_id: Uuid,
    username: &str,
    bio: Option<&str>,
    subreddits: &[String],
) -> Result<PersonaRow, AppError> {
    Ok(sqlx::query_as::<_, PersonaRow>(
        r#"
        INSERT INTO personas (id, owner_id, username, bio, subreddits)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(username)
    .bind(bio)
    .bind(subreddits)
    .fetch_one(pool)
    .await?)
}

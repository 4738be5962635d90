//! Owner-scoped resource access shared by the delete handlers.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Tables whose rows carry an `owner_id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedTable {
    Keywords,
    Personas,
}

impl OwnedTable {
    fn table_name(self) -> &'static str {
        match self {
            OwnedTable::Keywords => "keywords",
            OwnedTable::Personas => "personas",
        }
    }

    fn resource_name(self) -> &'static str {
        match self {
            OwnedTable::Keywords => "Keyword",
            OwnedTable::Personas => "Persona",
        }
    }
}

/// Deletes a row if it exists and belongs to `owner_id`.
///
/// A row owned by someone else answers with the same not-found error as a
/// row that does not exist.
pub async fn delete_owned(
    pool: &PgPool,
    table: OwnedTable,
    id: Uuid,
    owner_id: Uuid,
) -> Result<(), AppError> {
    let query = format!(
        "DELETE FROM {} WHERE id = $1 AND owner_id = $2",
        table.table_name()
    );

    let result = sqlx::query(&query)
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "{} {id} not found",
            table.resource_name()
        )));
    }

    info!("Deleted {} {id} for owner {owner_id}", table.table_name());
    Ok(())
}

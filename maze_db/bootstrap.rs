use sqlx::PgPool;

use maze_types::errors::DbError;

use crate::{
    models::{QUADRANTS, SPOTS},
    query::{schema, table},
};

/// Creates the schema backing database `db` and its document tables.
/// Safe to run on every startup.
pub async fn bootstrap_database(pool: &PgPool, db: &str) -> Result<(), DbError> {
    let schema = schema(db)?;
    let quadrants = table(db, QUADRANTS)?;
    let spots = table(db, SPOTS)?;

    let statements = [
        format!("CREATE SCHEMA IF NOT EXISTS {schema}"),
        format!("CREATE TABLE IF NOT EXISTS {quadrants} (id UUID PRIMARY KEY, doc JSONB NOT NULL)"),
        format!("CREATE TABLE IF NOT EXISTS {spots} (id UUID PRIMARY KEY, doc JSONB NOT NULL)"),
        format!(
            "CREATE INDEX IF NOT EXISTS spots_quadrant_id_idx ON {spots} ((doc ->> 'quadrant_id'))"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS quadrants_spot_ids_idx ON {quadrants} USING GIN ((doc -> 'spot_ids'))"
        ),
    ];

    for statement in &statements {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!(db, "Database bootstrapped");
    Ok(())
}

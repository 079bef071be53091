use sqlx::{PgPool, QueryBuilder, types::Json};
use uuid::Uuid;

use maze_app::{filters::Predicate, repository::SpotRepository};
use maze_types::{
    errors::{ApplicationError, DbError, Result},
    spot::Spot,
};

use crate::{
    models::{DocumentRow, SPOTS, SpotDocument},
    query::{push_first_match, push_where, table},
};

/// Rows whose document no longer decodes are skipped.
fn decode_spots(rows: Vec<DocumentRow>) -> Vec<Spot> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            Spot::try_from(row)
                .inspect_err(|e| tracing::warn!(spot_id = %id, "Skipping undecodable spot: {e}"))
                .ok()
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct PostgresSpotRepository {
    pool: PgPool,
}

impl PostgresSpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SpotRepository for PostgresSpotRepository {
    async fn insert(&self, db: &str, spot: &Spot) -> Result<String, ApplicationError> {
        let table = table(db, SPOTS)?;
        let id = Uuid::new_v4();

        sqlx::query(&format!("INSERT INTO {table} (id, doc) VALUES ($1, $2)"))
            .bind(id)
            .bind(Json(SpotDocument::from(spot)))
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(id.to_string())
    }

    async fn find_one(
        &self,
        db: &str,
        predicate: &Predicate,
    ) -> Result<Option<Spot>, ApplicationError> {
        let table = table(db, SPOTS)?;

        let mut builder = QueryBuilder::new(format!("SELECT id, doc FROM {table}"));
        push_where(&mut builder, predicate);
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<DocumentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        match row {
            Some(row) => Ok(Some(Spot::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn find_many(&self, db: &str, predicate: &Predicate) -> Result<Vec<Spot>, ApplicationError> {
        let table = table(db, SPOTS)?;

        let mut builder = QueryBuilder::new(format!("SELECT id, doc FROM {table}"));
        push_where(&mut builder, predicate);

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(decode_spots(rows))
    }

    async fn replace_one(
        &self,
        db: &str,
        predicate: &Predicate,
        spot: &Spot,
    ) -> Result<u64, ApplicationError> {
        let table = table(db, SPOTS)?;

        let mut builder = QueryBuilder::new(format!("UPDATE {table} SET doc = "));
        builder.push_bind(Json(SpotDocument::from(spot)));
        push_first_match(&mut builder, &table, predicate);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_many(&self, db: &str, predicate: &Predicate) -> Result<u64, ApplicationError> {
        let table = table(db, SPOTS)?;

        let mut builder = QueryBuilder::new(format!("DELETE FROM {table}"));
        push_where(&mut builder, predicate);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_spots_skips_bad_documents() {
        let good = Uuid::new_v4();
        let rows = vec![
            DocumentRow {
                id: Uuid::new_v4(),
                doc: json!({"name": 12, "quadrant_id": []}),
            },
            DocumentRow {
                id: good,
                doc: json!({
                    "name": "exit",
                    "gold_amount": "4000",
                    "coordinate": {"x": 9, "y": 0},
                    "quadrant_id": "q1",
                }),
            },
        ];

        let spots = decode_spots(rows);
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].id, good.to_string());
        assert_eq!(spots[0].name, "exit");
    }
}

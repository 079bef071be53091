use sqlx::{PgPool, QueryBuilder, types::Json};
use uuid::Uuid;

use maze_app::{filters::Predicate, repository::QuadrantRepository};
use maze_types::{
    errors::{ApplicationError, DbError, Result},
    quadrant::Quadrant,
};

use crate::{
    models::{DocumentRow, QUADRANTS, QuadrantDocument},
    query::{push_first_match, push_where, table},
};

/// Implements QuadrantRepository on a JSONB document table.
#[derive(Debug, Clone)]
pub struct PostgresQuadrantRepository {
    pool: PgPool,
}

impl PostgresQuadrantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl QuadrantRepository for PostgresQuadrantRepository {
    async fn insert(&self, db: &str, quadrant: &Quadrant) -> Result<String, ApplicationError> {
        let table = table(db, QUADRANTS)?;
        let id = Uuid::new_v4();

        sqlx::query(&format!("INSERT INTO {table} (id, doc) VALUES ($1, $2)"))
            .bind(id)
            .bind(Json(QuadrantDocument::from(quadrant)))
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(id.to_string())
    }

    async fn find_one(
        &self,
        db: &str,
        predicate: &Predicate,
    ) -> Result<Option<Quadrant>, ApplicationError> {
        let table = table(db, QUADRANTS)?;

        let mut builder = QueryBuilder::new(format!("SELECT id, doc FROM {table}"));
        push_where(&mut builder, predicate);
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<DocumentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        match row {
            Some(row) => Ok(Some(Quadrant::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn replace_one(
        &self,
        db: &str,
        predicate: &Predicate,
        quadrant: &Quadrant,
    ) -> Result<u64, ApplicationError> {
        let table = table(db, QUADRANTS)?;

        let mut builder = QueryBuilder::new(format!("UPDATE {table} SET doc = "));
        builder.push_bind(Json(QuadrantDocument::from(quadrant)));
        push_first_match(&mut builder, &table, predicate);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_one(&self, db: &str, predicate: &Predicate) -> Result<u64, ApplicationError> {
        let table = table(db, QUADRANTS)?;

        let mut builder = QueryBuilder::new(format!("DELETE FROM {table}"));
        push_first_match(&mut builder, &table, predicate);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(result.rows_affected())
    }

    async fn pull_spot_ids(&self, db: &str, spot_ids: &[String]) -> Result<u64, ApplicationError> {
        let table = table(db, QUADRANTS)?;

        let result = sqlx::query(&format!(
            r#"
            UPDATE {table}
            SET doc = jsonb_set(
                doc,
                '{{spot_ids}}',
                COALESCE(
                    (
                        SELECT jsonb_agg(e.value ORDER BY e.ord)
                        FROM jsonb_array_elements_text(doc -> 'spot_ids') WITH ORDINALITY AS e(value, ord)
                        WHERE NOT (e.value = ANY($1))
                    ),
                    '[]'::jsonb
                )
            )
            WHERE doc -> 'spot_ids' ?| $1
            "#
        ))
        .bind(spot_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(result.rows_affected())
    }
}

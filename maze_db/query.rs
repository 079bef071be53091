use sqlx::{Postgres, QueryBuilder};

use maze_app::filters::{Clause, Predicate};
use maze_types::errors::DbError;

/// Fully qualified, quoted name of a collection table inside database `db`.
///
/// Database names map to Postgres schemas and can't be bound as parameters,
/// so they are checked to be plain identifiers before being quoted.
pub fn table(db: &str, collection: &str) -> Result<String, DbError> {
    Ok(format!("{}.\"{collection}\"", schema(db)?))
}

pub fn schema(db: &str) -> Result<String, DbError> {
    let mut chars = db.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid || db.len() > 63 {
        return Err(DbError::InvalidDatabaseName(db.to_string()));
    }

    Ok(format!("\"{db}\""))
}

/// Append ` WHERE ...` for the predicate.
pub fn push_where(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    builder.push(" WHERE ");

    if predicate.clauses().is_empty() {
        builder.push("TRUE");
        return;
    }

    for (i, clause) in predicate.clauses().iter().enumerate() {
        if i > 0 {
            builder.push(" AND ");
        }

        match clause {
            Clause::Id(id) => {
                builder.push("id = ").push_bind(*id);
            }
            Clause::IdIn(ids) => {
                builder.push("id = ANY(").push_bind(ids.clone()).push(")");
            }
            Clause::FieldEq { field, value } => {
                builder
                    .push("doc ->> ")
                    .push_bind(field.to_string())
                    .push(" = ")
                    .push_bind(value.clone());
            }
        }
    }
}

/// Append ` WHERE id = (first match)` so single-document writes only ever
/// touch one row.
pub fn push_first_match(
    builder: &mut QueryBuilder<'_, Postgres>,
    table: &str,
    predicate: &Predicate,
) {
    builder.push(format!(" WHERE id = (SELECT id FROM {table}"));
    push_where(builder, predicate);
    builder.push(" LIMIT 1)");
}

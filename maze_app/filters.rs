use uuid::Uuid;

use maze_types::{
    errors::{AppError, ApplicationError, Result},
    quadrant::{Quadrant, QuadrantType},
    spot::Spot,
};

/// One condition of a storage predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Id(Uuid),
    IdIn(Vec<Uuid>),
    FieldEq { field: &'static str, value: String },
}

/// A conjunction of clauses, understood by every repository implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn id(id: Uuid) -> Self {
        Self {
            clauses: vec![Clause::Id(id)],
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Evaluates the predicate against an in-memory record.
    pub fn matches<T: FilterTarget>(&self, record: &T) -> bool {
        let record_id = Uuid::parse_str(record.record_id()).ok();

        self.clauses.iter().all(|clause| match clause {
            Clause::Id(id) => record_id == Some(*id),
            Clause::IdIn(ids) => record_id.is_some_and(|rid| ids.contains(&rid)),
            Clause::FieldEq { field, value } => {
                record.field_value(field).as_deref() == Some(value.as_str())
            }
        })
    }
}

/// Records a [`Predicate`] can be evaluated against without a database.
pub trait FilterTarget {
    fn record_id(&self) -> &str;
    fn field_value(&self, field: &str) -> Option<String>;
}

impl FilterTarget for Quadrant {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "type" => self.quadrant_type.map(|t| t.as_str().to_string()),
            _ => None,
        }
    }
}

impl FilterTarget for Spot {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "quadrant_id" => Some(self.quadrant_id.clone()),
            _ => None,
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, ApplicationError> {
    Uuid::parse_str(id).map_err(|_| ApplicationError::App(AppError::InvalidId(id.to_string())))
}

/// Selects quadrants by id and/or type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadrantFilter {
    pub id: String,
    pub quadrant_type: Option<QuadrantType>,
}

impl QuadrantFilter {
    pub fn by_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            quadrant_type: None,
        }
    }

    pub fn by_type(quadrant_type: QuadrantType) -> Self {
        Self {
            id: String::new(),
            quadrant_type: Some(quadrant_type),
        }
    }

    pub fn to_predicate(&self) -> Result<Predicate, ApplicationError> {
        if self.id.is_empty() && self.quadrant_type.is_none() {
            return Err(AppError::InvalidFilter(
                "at least one of QuadrantFilter.id and QuadrantFilter.type must be specified",
            )
            .into());
        }

        let mut clauses = Vec::new();
        if !self.id.is_empty() {
            clauses.push(Clause::Id(parse_id(&self.id)?));
        }
        if let Some(quadrant_type) = self.quadrant_type {
            clauses.push(Clause::FieldEq {
                field: "type",
                value: quadrant_type.as_str().to_string(),
            });
        }

        Ok(Predicate { clauses })
    }
}

/// Selects spots by id, by owning quadrant, or by a set of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotFilter {
    pub id: String,
    pub quadrant_id: String,
    pub spot_ids: Vec<String>,
}

impl SpotFilter {
    pub fn by_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn by_quadrant(quadrant_id: &str) -> Self {
        Self {
            quadrant_id: quadrant_id.to_string(),
            ..Default::default()
        }
    }

    pub fn by_ids(spot_ids: Vec<String>) -> Self {
        Self {
            spot_ids,
            ..Default::default()
        }
    }

    /// Ids in `spot_ids` that are not valid identifiers are skipped, while a
    /// malformed single `id` is rejected.
    pub fn to_predicate(&self) -> Result<Predicate, ApplicationError> {
        if self.id.is_empty() && self.quadrant_id.is_empty() && self.spot_ids.is_empty() {
            return Err(AppError::InvalidFilter(
                "at least one of SpotFilter.id, SpotFilter.quadrant_id and SpotFilter.spot_ids must be specified",
            )
            .into());
        }

        let mut clauses = Vec::new();
        if !self.id.is_empty() {
            clauses.push(Clause::Id(parse_id(&self.id)?));
        }
        if !self.quadrant_id.is_empty() {
            clauses.push(Clause::FieldEq {
                field: "quadrant_id",
                value: self.quadrant_id.clone(),
            });
        }
        if !self.spot_ids.is_empty() {
            let ids = self
                .spot_ids
                .iter()
                .filter_map(|id| Uuid::parse_str(id).ok())
                .collect();
            clauses.push(Clause::IdIn(ids));
        }

        Ok(Predicate { clauses })
    }
}

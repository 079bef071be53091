use serde::{Deserialize, Serialize};

use crate::common::Coordinate;

/// A point of interest inside exactly one quadrant.
///
/// Every field is optional on the wire so the same shape can carry partial
/// updates; the stores decide which fields are required per operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Spot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub gold_amount: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,

    #[serde(default)]
    pub quadrant_id: String,
}

impl Spot {
    pub fn new(name: &str, gold_amount: &str, coordinate: Coordinate, quadrant_id: &str) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            gold_amount: gold_amount.to_string(),
            coordinate: Some(coordinate),
            quadrant_id: quadrant_id.to_string(),
        }
    }
}

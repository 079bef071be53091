use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{common::Coordinate, spot::Spot};

/// The four orientation labels a quadrant can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuadrantType {
    TopLeft,
    TopRight,
    BottomLeft,
    // Older clients send the misspelled label.
    #[serde(alias = "BOTTOM_RIGTH")]
    BottomRight,
}

impl QuadrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuadrantType::TopLeft => "TOP_LEFT",
            QuadrantType::TopRight => "TOP_RIGHT",
            QuadrantType::BottomLeft => "BOTTOM_LEFT",
            QuadrantType::BottomRight => "BOTTOM_RIGHT",
        }
    }
}

impl fmt::Display for QuadrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled rectangular region of the maze, owning a set of spots.
///
/// `spot_ids` is the persisted side of the quadrant/spot relationship.
/// `spots` is only filled in when a quadrant is read back with hydration
/// and is never written to storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quadrant {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub quadrant_type: Option<QuadrantType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spots: Vec<Spot>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub spot_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<Coordinate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_point: Option<Coordinate>,
}

impl Quadrant {
    pub fn new(
        quadrant_type: QuadrantType,
        start_point: Option<Coordinate>,
        limit_point: Option<Coordinate>,
    ) -> Self {
        Self {
            quadrant_type: Some(quadrant_type),
            start_point,
            limit_point,
            ..Default::default()
        }
    }

    pub fn contains_spot(&self, spot_id: &str) -> bool {
        self.spot_ids.iter().any(|id| id == spot_id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

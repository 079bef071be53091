use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use maze_types::{common::Coordinate, quadrant::QuadrantType};

pub const QUADRANTS: &str = "quadrants";
pub const SPOTS: &str = "spots";

/// A row of any document table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub doc: serde_json::Value,
}

/// Stored body of a quadrant. Hydrated spots are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadrantDocument {
    #[serde(rename = "type", default)]
    pub quadrant_type: Option<QuadrantType>,
    #[serde(default)]
    pub spot_ids: Vec<String>,
    #[serde(default)]
    pub start_point: Option<Coordinate>,
    #[serde(default)]
    pub limit_point: Option<Coordinate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotDocument {
    pub name: String,
    #[serde(default)]
    pub gold_amount: String,
    pub coordinate: Option<Coordinate>,
    pub quadrant_id: String,
}

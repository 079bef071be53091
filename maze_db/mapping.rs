use maze_types::{errors::DbError, quadrant::Quadrant, spot::Spot};

use crate::models::{DocumentRow, QuadrantDocument, SpotDocument};

impl From<&Quadrant> for QuadrantDocument {
    fn from(quadrant: &Quadrant) -> Self {
        QuadrantDocument {
            quadrant_type: quadrant.quadrant_type,
            spot_ids: quadrant.spot_ids.clone(),
            start_point: quadrant.start_point,
            limit_point: quadrant.limit_point,
        }
    }
}

impl TryFrom<DocumentRow> for Quadrant {
    type Error = DbError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let doc: QuadrantDocument = serde_json::from_value(row.doc)?;

        Ok(Quadrant {
            id: row.id.to_string(),
            quadrant_type: doc.quadrant_type,
            spots: vec![],
            spot_ids: doc.spot_ids,
            start_point: doc.start_point,
            limit_point: doc.limit_point,
        })
    }
}

impl From<&Spot> for SpotDocument {
    fn from(spot: &Spot) -> Self {
        SpotDocument {
            name: spot.name.clone(),
            gold_amount: spot.gold_amount.clone(),
            coordinate: spot.coordinate,
            quadrant_id: spot.quadrant_id.clone(),
        }
    }
}

impl TryFrom<DocumentRow> for Spot {
    type Error = DbError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let doc: SpotDocument = serde_json::from_value(row.doc)?;

        Ok(Spot {
            id: row.id.to_string(),
            name: doc.name,
            gold_amount: doc.gold_amount,
            coordinate: doc.coordinate,
            quadrant_id: doc.quadrant_id,
        })
    }
}

use std::{collections::HashSet, sync::Arc};

use maze_types::{
    errors::{AppError, ApplicationError, DbError, Result},
    quadrant::Quadrant,
};

use crate::{
    filters::{QuadrantFilter, SpotFilter},
    storage::Storage,
    stores::{SpotService, SpotStore},
};

#[async_trait::async_trait]
pub trait QuadrantStore: Send + Sync {
    /// Persist a new quadrant and return its id.
    async fn create(&self, db: &str, quadrant: &Quadrant) -> Result<String, ApplicationError>;

    /// Load a quadrant with its `spots` hydrated from `spot_ids`.
    async fn get(&self, db: &str, filter: &QuadrantFilter) -> Result<Quadrant, ApplicationError>;

    /// Apply a partial patch identified by `id` and/or `type`.
    async fn update(&self, db: &str, patch: &Quadrant) -> Result<Quadrant, ApplicationError>;

    /// Delete a quadrant together with all of its spots.
    async fn delete(&self, db: &str, filter: &QuadrantFilter) -> Result<bool, ApplicationError>;
}

#[derive(Clone)]
pub struct QuadrantService {
    storage: Arc<dyn Storage>,
}

impl QuadrantService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn spots(&self) -> SpotService {
        SpotService::new(self.storage.clone())
    }

    /// Drop `spot_id` from the quadrant's `spot_ids` without touching the
    /// spot itself. A missing quadrant has nothing to detach from.
    pub(crate) async fn detach_spot(
        &self,
        db: &str,
        quadrant_id: &str,
        spot_id: &str,
    ) -> Result<(), ApplicationError> {
        let predicate = QuadrantFilter::by_id(quadrant_id).to_predicate()?;
        let quadrants = self.storage.quadrants();

        let Some(mut quadrant) = quadrants.find_one(db, &predicate).await? else {
            tracing::warn!(quadrant_id, spot_id, "Previous quadrant of spot no longer exists");
            return Ok(());
        };

        quadrant.spot_ids.retain(|id| id != spot_id);
        quadrants.replace_one(db, &predicate, &quadrant).await?;

        Ok(())
    }
}

/// Ids present in `current` but absent from `patch`.
fn dropped_ids(current: &[String], patch: &[String]) -> Vec<String> {
    let kept: HashSet<&str> = patch.iter().map(String::as_str).collect();
    current
        .iter()
        .filter(|id| !kept.contains(id.as_str()))
        .cloned()
        .collect()
}

#[async_trait::async_trait]
impl QuadrantStore for QuadrantService {
    async fn create(&self, db: &str, quadrant: &Quadrant) -> Result<String, ApplicationError> {
        let id = self.storage.quadrants().insert(db, quadrant).await?;
        tracing::debug!(quadrant_id = %id, "Quadrant created");
        Ok(id)
    }

    async fn get(&self, db: &str, filter: &QuadrantFilter) -> Result<Quadrant, ApplicationError> {
        let predicate = filter.to_predicate()?;

        let mut quadrant = self
            .storage
            .quadrants()
            .find_one(db, &predicate)
            .await?
            .ok_or_else(|| DbError::QuadrantNotFound(describe(filter)))?;

        if !quadrant.spot_ids.is_empty() {
            quadrant.spots = self
                .spots()
                .list(db, &SpotFilter::by_ids(quadrant.spot_ids.clone()))
                .await
                .map_err(|e| ApplicationError::dependency("hydrating quadrant spots", e))?;
        }

        Ok(quadrant)
    }

    async fn update(&self, db: &str, patch: &Quadrant) -> Result<Quadrant, ApplicationError> {
        if patch.id.is_empty() && patch.quadrant_type.is_none() {
            return Err(AppError::InvalidArgument(
                "at least one of Quadrant.id and Quadrant.type must be specified".to_string(),
            )
            .into());
        }

        let filter = QuadrantFilter {
            id: patch.id.clone(),
            quadrant_type: patch.quadrant_type,
        };
        let predicate = filter.to_predicate()?;
        let mut current = self.get(db, &filter).await?;

        if !patch.spot_ids.is_empty() {
            let dropped = dropped_ids(&current.spot_ids, &patch.spot_ids);

            if !dropped.is_empty() {
                tracing::debug!(
                    quadrant_id = %current.id,
                    count = dropped.len(),
                    "Deleting spots dropped from quadrant"
                );
                let spots_predicate = SpotFilter::by_ids(dropped).to_predicate()?;
                self.storage
                    .spots()
                    .delete_many(db, &spots_predicate)
                    .await
                    .map_err(|e| ApplicationError::dependency("deleting dropped spots", e))?;
            }

            current.spot_ids = patch.spot_ids.clone();
        }

        if patch.start_point.is_some() {
            current.start_point = patch.start_point;
        }
        if patch.limit_point.is_some() {
            current.limit_point = patch.limit_point;
        }

        self.storage
            .quadrants()
            .replace_one(db, &predicate, &current)
            .await?;

        self.get(db, &filter).await
    }

    async fn delete(&self, db: &str, filter: &QuadrantFilter) -> Result<bool, ApplicationError> {
        let current = self.get(db, filter).await?;

        if !current.spot_ids.is_empty() {
            self.spots()
                .delete(db, &SpotFilter::by_ids(current.spot_ids.clone()))
                .await
                .map_err(|e| ApplicationError::dependency("deleting quadrant spots", e))?;
        }

        let predicate = QuadrantFilter::by_id(&current.id).to_predicate()?;
        self.storage.quadrants().delete_one(db, &predicate).await?;
        tracing::debug!(quadrant_id = %current.id, "Quadrant deleted");

        Ok(true)
    }
}

fn describe(filter: &QuadrantFilter) -> String {
    match (filter.id.is_empty(), filter.quadrant_type) {
        (false, Some(t)) => format!("id {} and type {}", filter.id, t),
        (false, None) => format!("id {}", filter.id),
        (true, Some(t)) => format!("type {}", t),
        (true, None) => "empty filter".to_string(),
    }
}

use std::sync::Arc;

use maze_types::{
    errors::{AppError, ApplicationError, DbError, Result},
    quadrant::Quadrant,
    spot::Spot,
};

use crate::{
    filters::{QuadrantFilter, SpotFilter},
    storage::Storage,
    stores::{QuadrantService, QuadrantStore},
};

#[async_trait::async_trait]
pub trait SpotStore: Send + Sync {
    /// Persist a new spot and register it on its quadrant. Returns the new id.
    async fn create(&self, db: &str, spot: &Spot) -> Result<String, ApplicationError>;

    /// Load a single spot; only `filter.id` is supported.
    async fn get(&self, db: &str, filter: &SpotFilter) -> Result<Spot, ApplicationError>;

    /// Apply a partial patch, re-parenting the spot when `quadrant_id` changes.
    async fn update(&self, db: &str, patch: &Spot) -> Result<Spot, ApplicationError>;

    /// Spots of a quadrant or of an id-set. No match yields an empty list.
    async fn list(&self, db: &str, filter: &SpotFilter) -> Result<Vec<Spot>, ApplicationError>;

    /// Delete the selected spots and unlink them from every quadrant.
    async fn delete(&self, db: &str, filter: &SpotFilter) -> Result<bool, ApplicationError>;
}

#[derive(Clone)]
pub struct SpotService {
    storage: Arc<dyn Storage>,
}

impl SpotService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn quadrants(&self) -> QuadrantService {
        QuadrantService::new(self.storage.clone())
    }

    async fn reparent(
        &self,
        db: &str,
        spot_id: &str,
        previous_quadrant_id: &str,
        mut target: Quadrant,
    ) -> Result<(), ApplicationError> {
        let quadrants = self.quadrants();

        // The detach writes the reduced list directly: going through
        // `QuadrantStore::update` would delete the spot being moved.
        quadrants
            .detach_spot(db, previous_quadrant_id, spot_id)
            .await
            .map_err(|e| ApplicationError::dependency("detaching spot from previous quadrant", e))?;

        if !target.contains_spot(spot_id) {
            target.spot_ids.push(spot_id.to_string());
        }

        quadrants
            .update(db, &target)
            .await
            .map_err(|e| ApplicationError::dependency("attaching spot to new quadrant", e))?;

        tracing::debug!(
            spot_id,
            from = previous_quadrant_id,
            to = %target.id,
            "Spot re-parented"
        );

        Ok(())
    }
}

#[async_trait::async_trait]
impl SpotStore for SpotService {
    async fn create(&self, db: &str, spot: &Spot) -> Result<String, ApplicationError> {
        if spot.quadrant_id.is_empty() {
            return Err(AppError::missing("Spot.quadrant_id").into());
        }
        if spot.name.is_empty() {
            return Err(AppError::missing("Spot.name").into());
        }
        if spot.coordinate.is_none() {
            return Err(AppError::missing("Spot.coordinate").into());
        }

        let quadrants = self.quadrants();
        let owner = QuadrantFilter::by_id(&spot.quadrant_id);
        quadrants.get(db, &owner).await?;

        let id = self.storage.spots().insert(db, spot).await?;

        // From here on a failure leaves the inserted spot unlisted.
        let mut quadrant = quadrants
            .get(db, &owner)
            .await
            .map_err(|e| ApplicationError::dependency("getting a quadrant", e))?;
        quadrant.spot_ids.push(id.clone());

        quadrants
            .update(db, &quadrant)
            .await
            .map_err(|e| ApplicationError::dependency("updating a quadrant", e))?;

        tracing::debug!(spot_id = %id, quadrant_id = %spot.quadrant_id, "Spot created");
        Ok(id)
    }

    async fn get(&self, db: &str, filter: &SpotFilter) -> Result<Spot, ApplicationError> {
        if filter.id.is_empty() {
            return Err(AppError::missing("SpotFilter.id").into());
        }

        let predicate = SpotFilter::by_id(&filter.id).to_predicate()?;
        let spot = self
            .storage
            .spots()
            .find_one(db, &predicate)
            .await?
            .ok_or_else(|| DbError::SpotNotFound(filter.id.clone()))?;

        Ok(spot)
    }

    async fn update(&self, db: &str, patch: &Spot) -> Result<Spot, ApplicationError> {
        if patch.id.is_empty() {
            return Err(AppError::missing("Spot.id").into());
        }
        if patch.quadrant_id.is_empty() {
            return Err(AppError::missing("Spot.quadrant_id").into());
        }

        let filter = SpotFilter::by_id(&patch.id);
        let mut spot = self.get(db, &filter).await?;
        let previous_quadrant_id =
            std::mem::replace(&mut spot.quadrant_id, patch.quadrant_id.clone());

        if !patch.name.is_empty() {
            spot.name = patch.name.clone();
        }
        if patch.coordinate.is_some() {
            spot.coordinate = patch.coordinate;
        }
        if !patch.gold_amount.is_empty() {
            spot.gold_amount = patch.gold_amount.clone();
        }

        // The new owner must exist before anything is written.
        let target = if previous_quadrant_id != spot.quadrant_id {
            let target = self
                .quadrants()
                .get(db, &QuadrantFilter::by_id(&spot.quadrant_id))
                .await
                .map_err(|e| ApplicationError::dependency("loading new quadrant", e))?;
            Some(target)
        } else {
            None
        };

        self.storage
            .spots()
            .replace_one(db, &filter.to_predicate()?, &spot)
            .await?;

        if let Some(target) = target {
            self.reparent(db, &spot.id, &previous_quadrant_id, target)
                .await?;
        }

        Ok(spot)
    }

    async fn list(&self, db: &str, filter: &SpotFilter) -> Result<Vec<Spot>, ApplicationError> {
        if !filter.id.is_empty() {
            return Err(AppError::InvalidArgument(
                "the SpotFilter.id attribute must not be specified".to_string(),
            )
            .into());
        }
        if filter.quadrant_id.is_empty() && filter.spot_ids.is_empty() {
            return Err(AppError::InvalidArgument(
                "at least one of SpotFilter.quadrant_id and SpotFilter.spot_ids attributes must be specified"
                    .to_string(),
            )
            .into());
        }

        let predicate = filter.to_predicate()?;
        self.storage.spots().find_many(db, &predicate).await
    }

    async fn delete(&self, db: &str, filter: &SpotFilter) -> Result<bool, ApplicationError> {
        let spot_ids: Vec<String> = if !filter.id.is_empty() {
            vec![filter.id.clone()]
        } else if !filter.quadrant_id.is_empty() {
            self.list(db, &SpotFilter::by_quadrant(&filter.quadrant_id))
                .await?
                .into_iter()
                .map(|spot| spot.id)
                .collect()
        } else {
            filter.spot_ids.clone()
        };

        if spot_ids.is_empty() {
            return Err(AppError::InvalidArgument("filter selects no spots".to_string()).into());
        }

        let predicate = SpotFilter::by_ids(spot_ids.clone()).to_predicate()?;
        let deleted = self.storage.spots().delete_many(db, &predicate).await?;
        let unlinked = self
            .storage
            .quadrants()
            .pull_spot_ids(db, &spot_ids)
            .await?;

        tracing::debug!(deleted, unlinked, "Spots deleted");
        Ok(true)
    }
}

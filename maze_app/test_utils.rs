#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use maze_types::{errors::ApplicationError, quadrant::Quadrant, spot::Spot};

    use crate::{
        filters::Predicate,
        repository::{QuadrantRepository, SpotRepository},
        storage::Storage,
    };

    /// Repository calls that can be made to fail on purpose.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum MockOperation {
        QuadrantReplace,
        SpotFindMany,
        SpotDeleteMany,
    }

    #[derive(Default, Clone)]
    struct Failures(Arc<Mutex<HashSet<MockOperation>>>);

    impl Failures {
        fn check(&self, operation: MockOperation) -> Result<(), ApplicationError> {
            if self.0.lock().unwrap().contains(&operation) {
                return Err(ApplicationError::Infrastructure(format!(
                    "injected failure on {operation:?}"
                )));
            }
            Ok(())
        }
    }

    type Collection<T> = Arc<Mutex<HashMap<String, Vec<T>>>>;

    #[derive(Default, Clone)]
    pub struct MockQuadrantRepository {
        records: Collection<Quadrant>,
        failures: Failures,
    }

    #[async_trait]
    impl QuadrantRepository for MockQuadrantRepository {
        async fn insert(&self, db: &str, quadrant: &Quadrant) -> Result<String, ApplicationError> {
            let id = Uuid::new_v4().to_string();
            let document = Quadrant {
                id: id.clone(),
                spots: vec![],
                ..quadrant.clone()
            };
            self.records
                .lock()
                .unwrap()
                .entry(db.to_string())
                .or_default()
                .push(document);
            Ok(id)
        }

        async fn find_one(
            &self,
            db: &str,
            predicate: &Predicate,
        ) -> Result<Option<Quadrant>, ApplicationError> {
            let records = self.records.lock().unwrap();
            Ok(records
                .get(db)
                .and_then(|all| all.iter().find(|q| predicate.matches(*q)).cloned()))
        }

        async fn replace_one(
            &self,
            db: &str,
            predicate: &Predicate,
            quadrant: &Quadrant,
        ) -> Result<u64, ApplicationError> {
            self.failures.check(MockOperation::QuadrantReplace)?;

            let mut records = self.records.lock().unwrap();
            let Some(existing) = records
                .get_mut(db)
                .and_then(|all| all.iter_mut().find(|q| predicate.matches(&**q)))
            else {
                return Ok(0);
            };

            *existing = Quadrant {
                id: existing.id.clone(),
                spots: vec![],
                ..quadrant.clone()
            };
            Ok(1)
        }

        async fn delete_one(&self, db: &str, predicate: &Predicate) -> Result<u64, ApplicationError> {
            let mut records = self.records.lock().unwrap();
            let Some(all) = records.get_mut(db) else {
                return Ok(0);
            };

            match all.iter().position(|q| predicate.matches(q)) {
                Some(index) => {
                    all.remove(index);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn pull_spot_ids(&self, db: &str, spot_ids: &[String]) -> Result<u64, ApplicationError> {
            let mut records = self.records.lock().unwrap();
            let mut modified = 0;

            for quadrant in records.get_mut(db).into_iter().flatten() {
                let before = quadrant.spot_ids.len();
                quadrant.spot_ids.retain(|id| !spot_ids.contains(id));
                if quadrant.spot_ids.len() != before {
                    modified += 1;
                }
            }

            Ok(modified)
        }
    }

    #[derive(Default, Clone)]
    pub struct MockSpotRepository {
        records: Collection<Spot>,
        failures: Failures,
    }

    #[async_trait]
    impl SpotRepository for MockSpotRepository {
        async fn insert(&self, db: &str, spot: &Spot) -> Result<String, ApplicationError> {
            let id = Uuid::new_v4().to_string();
            let document = Spot {
                id: id.clone(),
                ..spot.clone()
            };
            self.records
                .lock()
                .unwrap()
                .entry(db.to_string())
                .or_default()
                .push(document);
            Ok(id)
        }

        async fn find_one(
            &self,
            db: &str,
            predicate: &Predicate,
        ) -> Result<Option<Spot>, ApplicationError> {
            let records = self.records.lock().unwrap();
            Ok(records
                .get(db)
                .and_then(|all| all.iter().find(|s| predicate.matches(*s)).cloned()))
        }

        async fn find_many(
            &self,
            db: &str,
            predicate: &Predicate,
        ) -> Result<Vec<Spot>, ApplicationError> {
            self.failures.check(MockOperation::SpotFindMany)?;

            let records = self.records.lock().unwrap();
            Ok(records
                .get(db)
                .map(|all| all.iter().filter(|s| predicate.matches(*s)).cloned().collect())
                .unwrap_or_default())
        }

        async fn replace_one(
            &self,
            db: &str,
            predicate: &Predicate,
            spot: &Spot,
        ) -> Result<u64, ApplicationError> {
            let mut records = self.records.lock().unwrap();
            let Some(existing) = records
                .get_mut(db)
                .and_then(|all| all.iter_mut().find(|s| predicate.matches(&**s)))
            else {
                return Ok(0);
            };

            *existing = Spot {
                id: existing.id.clone(),
                ..spot.clone()
            };
            Ok(1)
        }

        async fn delete_many(&self, db: &str, predicate: &Predicate) -> Result<u64, ApplicationError> {
            self.failures.check(MockOperation::SpotDeleteMany)?;

            let mut records = self.records.lock().unwrap();
            let Some(all) = records.get_mut(db) else {
                return Ok(0);
            };

            let before = all.len();
            all.retain(|s| !predicate.matches(s));
            Ok((before - all.len()) as u64)
        }
    }

    /// In-memory [`Storage`], partitioned by database name.
    #[derive(Clone)]
    pub struct MockStorage {
        quadrants: MockQuadrantRepository,
        spots: MockSpotRepository,
        failures: Failures,
    }

    impl MockStorage {
        pub fn new() -> Self {
            let failures = Failures::default();
            Self {
                quadrants: MockQuadrantRepository {
                    records: Default::default(),
                    failures: failures.clone(),
                },
                spots: MockSpotRepository {
                    records: Default::default(),
                    failures: failures.clone(),
                },
                failures,
            }
        }

        pub fn fail_on(&self, operation: MockOperation) {
            self.failures.0.lock().unwrap().insert(operation);
        }

        pub fn clear_failures(&self) {
            self.failures.0.lock().unwrap().clear();
        }

        pub fn quadrants_in(&self, db: &str) -> Vec<Quadrant> {
            let records = self.quadrants.records.lock().unwrap();
            records.get(db).cloned().unwrap_or_default()
        }

        pub fn spots_in(&self, db: &str) -> Vec<Spot> {
            let records = self.spots.records.lock().unwrap();
            records.get(db).cloned().unwrap_or_default()
        }

        /// Appends a spot id to a stored quadrant bypassing the stores.
        pub fn push_spot_id(&self, db: &str, quadrant_id: &str, spot_id: &str) {
            let mut records = self.quadrants.records.lock().unwrap();
            let quadrant = records
                .get_mut(db)
                .and_then(|all| all.iter_mut().find(|q| q.id == quadrant_id))
                .expect("quadrant must exist");
            quadrant.spot_ids.push(spot_id.to_string());
        }
    }

    impl Storage for MockStorage {
        fn quadrants(&self) -> Arc<dyn QuadrantRepository> {
            Arc::new(self.quadrants.clone())
        }

        fn spots(&self) -> Arc<dyn SpotRepository> {
            Arc::new(self.spots.clone())
        }
    }

    /// Checks both directions of the quadrant/spot relationship.
    pub fn assert_relationships(storage: &MockStorage, db: &str) {
        let quadrants = storage.quadrants_in(db);
        let spots = storage.spots_in(db);

        for quadrant in &quadrants {
            for spot_id in &quadrant.spot_ids {
                let spot = spots
                    .iter()
                    .find(|s| &s.id == spot_id)
                    .unwrap_or_else(|| panic!("quadrant {} lists missing spot {spot_id}", quadrant.id));
                assert_eq!(
                    spot.quadrant_id, quadrant.id,
                    "spot {spot_id} is listed by a quadrant it doesn't belong to"
                );
            }
        }

        for spot in &spots {
            let owner = quadrants
                .iter()
                .find(|q| q.id == spot.quadrant_id)
                .unwrap_or_else(|| panic!("spot {} has no quadrant", spot.id));
            assert!(
                owner.contains_spot(&spot.id),
                "spot {} is missing from its quadrant",
                spot.id
            );
        }
    }
}

use maze_types::{errors::ApplicationError, quadrant::Quadrant};

use crate::filters::Predicate;

/// Document-level access to the quadrants collection of a database.
///
/// Implementations never touch spot documents; keeping both sides of the
/// relationship in sync is the job of the stores.
#[async_trait::async_trait]
pub trait QuadrantRepository: Send + Sync {
    /// Insert a new document and return the id assigned by storage.
    /// `quadrant.id` and `quadrant.spots` are ignored.
    async fn insert(&self, db: &str, quadrant: &Quadrant) -> Result<String, ApplicationError>;

    /// First document matching the predicate, without hydrated spots.
    async fn find_one(
        &self,
        db: &str,
        predicate: &Predicate,
    ) -> Result<Option<Quadrant>, ApplicationError>;

    /// Replace the whole document of the first match. Returns the number of
    /// replaced documents.
    async fn replace_one(
        &self,
        db: &str,
        predicate: &Predicate,
        quadrant: &Quadrant,
    ) -> Result<u64, ApplicationError>;

    async fn delete_one(&self, db: &str, predicate: &Predicate) -> Result<u64, ApplicationError>;

    /// Remove the given ids from `spot_ids` of every quadrant in the database.
    async fn pull_spot_ids(&self, db: &str, spot_ids: &[String]) -> Result<u64, ApplicationError>;
}

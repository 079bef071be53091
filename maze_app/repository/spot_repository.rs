use maze_types::{errors::ApplicationError, spot::Spot};

use crate::filters::Predicate;

#[async_trait::async_trait]
pub trait SpotRepository: Send + Sync {
    /// Insert a new document and return the id assigned by storage.
    async fn insert(&self, db: &str, spot: &Spot) -> Result<String, ApplicationError>;

    async fn find_one(&self, db: &str, predicate: &Predicate)
    -> Result<Option<Spot>, ApplicationError>;

    /// All matching documents. Documents that can't be decoded are skipped.
    async fn find_many(&self, db: &str, predicate: &Predicate) -> Result<Vec<Spot>, ApplicationError>;

    async fn replace_one(
        &self,
        db: &str,
        predicate: &Predicate,
        spot: &Spot,
    ) -> Result<u64, ApplicationError>;

    async fn delete_many(&self, db: &str, predicate: &Predicate) -> Result<u64, ApplicationError>;
}

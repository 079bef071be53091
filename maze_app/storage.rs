use std::sync::Arc;

use crate::repository::*;

/// Provider of the repositories the stores work with.
///
/// Writes issued through the returned repositories are independent: there is
/// no commit or rollback, so a multi-step operation that fails halfway keeps
/// the steps already applied. A transactional backend would hand out
/// repositories bound to one transaction here.
pub trait Storage: Send + Sync {
    fn quadrants(&self) -> Arc<dyn QuadrantRepository>;
    fn spots(&self) -> Arc<dyn SpotRepository>;
}

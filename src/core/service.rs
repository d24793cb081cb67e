//! Generic listing service shared by every repository adapter

use crate::config::ListingConfig;
use crate::core::entity::{Entity, EntityId};
use crate::core::error::QueryError;
use crate::core::executor;
use crate::core::plan::{QueryPlan, ScopePredicate};
use crate::core::query::ListingRequest;
use crate::core::store::EntityStore;
use std::sync::Arc;

/// Listing operations for one entity type over an abstract store
///
/// The service holds no per-request state; clones share the store and
/// configuration and can serve concurrent requests.
pub struct ListingService<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
    config: Arc<ListingConfig>,
}

impl<E: Entity> Clone for ListingService<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E: Entity> ListingService<E> {
    pub fn new(store: Arc<dyn EntityStore<E>>, config: Arc<ListingConfig>) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Plan `request` against `E`'s registry under the configured policy
    pub fn plan(&self, request: &ListingRequest) -> Result<QueryPlan<E>, QueryError> {
        QueryPlan::from_request(request, &self.config)
    }

    /// Filtered, sorted, paginated listing
    pub async fn list(&self, request: &ListingRequest) -> Result<Vec<E>, QueryError> {
        let plan = self.plan(request)?;
        executor::execute(&plan, self.store.as_ref()).await
    }

    /// Same as [`list`](Self::list), restricted by one extra join predicate
    pub async fn list_scoped(
        &self,
        request: &ListingRequest,
        scope: ScopePredicate<E>,
    ) -> Result<Vec<E>, QueryError> {
        let plan = self.plan(request)?.scoped(scope);
        executor::execute(&plan, self.store.as_ref()).await
    }

    /// Run a plan the caller built directly
    pub async fn execute(&self, plan: &QueryPlan<E>) -> Result<Vec<E>, QueryError> {
        executor::execute(plan, self.store.as_ref()).await
    }

    /// Get an entity by id
    pub async fn get(&self, id: EntityId) -> Result<Option<E>, QueryError> {
        Ok(self.store.find_by_id(id).await?)
    }
}

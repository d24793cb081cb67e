//! In-memory stores for testing and development

use crate::config::ListingConfig;
use crate::core::entity::{Entity, EntityId};
use crate::core::error::StorageError;
use crate::core::executor::CompiledQuery;
use crate::core::store::{EntityStore, SpendingStore, TagFrequency, UserSpend};
use crate::entities::{CatalogStores, Certificate, Order, Repositories, Tag, User};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory table of one entity type
///
/// Rows are keyed by id; inserting an existing id replaces the row. Uses
/// RwLock for thread-safe access; clones share the same table.
pub struct InMemoryStore<E> {
    rows: Arc<RwLock<HashMap<EntityId, E>>>,
}

impl<E> Clone for InMemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryStore<E> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<EntityId, E>>, StorageError> {
        self.rows.read().map_err(|_| StorageError::LockPoisoned {
            resource: E::resource_name().to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<EntityId, E>>, StorageError> {
        self.rows.write().map_err(|_| StorageError::LockPoisoned {
            resource: E::resource_name().to_string(),
        })
    }

    /// Insert or replace a row
    pub fn insert(&self, entity: E) -> Result<E, StorageError> {
        let mut rows = self.write()?;
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    /// Insert or replace many rows under one lock
    pub fn insert_all(&self, entities: impl IntoIterator<Item = E>) -> Result<(), StorageError> {
        let mut rows = self.write()?;
        for entity in entities {
            rows.insert(entity.id(), entity);
        }
        Ok(())
    }

    pub fn remove(&self, id: EntityId) -> Result<Option<E>, StorageError> {
        Ok(self.write()?.remove(&id))
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.is_empty())
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    async fn select(&self, query: &CompiledQuery<E>) -> Result<Vec<E>, StorageError> {
        let rows = self.read()?;
        Ok(query.evaluate(rows.values().cloned()))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, StorageError> {
        Ok(self.read()?.get(&id).cloned())
    }
}

/// The four catalog tables together, with order aggregates joined across
/// them
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    pub certificates: InMemoryStore<Certificate>,
    pub tags: InMemoryStore<Tag>,
    pub orders: InMemoryStore<Order>,
    pub users: InMemoryStore<User>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Store handles backed by this catalog
    pub fn stores(&self) -> CatalogStores {
        CatalogStores {
            certificates: Arc::new(self.certificates.clone()),
            tags: Arc::new(self.tags.clone()),
            orders: Arc::new(self.orders.clone()),
            users: Arc::new(self.users.clone()),
            spending: Arc::new(self.clone()),
        }
    }

    /// Repositories backed by this catalog
    pub fn repositories(&self, config: Arc<ListingConfig>) -> Repositories {
        Repositories::new(self.stores(), config)
    }
}

#[async_trait]
impl SpendingStore for InMemoryCatalog {
    async fn total_cost_by_user(&self) -> Result<Vec<UserSpend>, StorageError> {
        let orders = self.orders.read()?;

        let mut totals: BTreeMap<EntityId, Decimal> = BTreeMap::new();
        for order in orders.values() {
            *totals.entry(order.user_id).or_default() += order.cost;
        }

        Ok(totals
            .into_iter()
            .map(|(user_id, total_cost)| UserSpend {
                user_id,
                total_cost,
            })
            .collect())
    }

    async fn tag_frequency_for_user(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<TagFrequency>, StorageError> {
        // orders before certificates, both held for one consistent snapshot
        let orders = self.orders.read()?;
        let certificates = self.certificates.read()?;

        let mut counts: BTreeMap<EntityId, u64> = BTreeMap::new();
        let purchased = orders
            .values()
            .filter(|order| order.user_id == user_id)
            .filter_map(|order| certificates.get(&order.certificate_id));
        for certificate in purchased {
            for tag in &certificate.tags {
                *counts.entry(tag.id).or_default() += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(tag_id, count)| TagFrequency { tag_id, count })
            .collect())
    }
}

//! Store traits for listing and aggregation
//!
//! The engine never talks to a concrete database. It hands a store one
//! [`CompiledQuery`] per listing and expects the ordered window back, and it
//! drives the spending aggregation through the two grouping calls of
//! [`SpendingStore`]. Backends own connection handling, timeouts and
//! cancellation; their errors come back as [`StorageError`] and are passed
//! through untouched.

use crate::core::entity::{Entity, EntityId};
use crate::core::error::StorageError;
use crate::core::executor::CompiledQuery;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

/// Trait for stores that can answer compiled listing queries
///
/// Implementations must evaluate the query as one request against one
/// snapshot: filter with [`CompiledQuery::matches`], order with
/// [`CompiledQuery::compare`], then skip `offset` rows and take `limit`.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Return the ordered window of rows matching `query`
    async fn select(&self, query: &CompiledQuery<E>) -> Result<Vec<E>, StorageError>;

    /// Get a single row by identity
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, StorageError>;
}

/// Total order cost of one purchasing user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserSpend {
    pub user_id: EntityId,
    pub total_cost: Decimal,
}

/// Number of times one tag occurs across a set of orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagFrequency {
    pub tag_id: EntityId,
    pub count: u64,
}

/// Grouping primitives over orders
///
/// Each method is a single grouped query; groups may come back in any
/// order, picking the winner is the caller's job.
#[async_trait]
pub trait SpendingStore: Send + Sync {
    /// Orders grouped by purchasing user, cost summed per group
    async fn total_cost_by_user(&self) -> Result<Vec<UserSpend>, StorageError>;

    /// The user's orders joined to their certificates' tags, counted per tag.
    ///
    /// A certificate bought twice contributes its tags twice.
    async fn tag_frequency_for_user(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<TagFrequency>, StorageError>;
}

//! Orders and their repository

use crate::config::ListingConfig;
use crate::core::entity::{Entity, EntityId};
use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::plan::ScopePredicate;
use crate::core::query::ListingRequest;
use crate::core::registry::{Field, FieldRegistry};
use crate::core::service::ListingService;
use crate::core::store::EntityStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// One purchase of a certificate by a user
///
/// `cost` is the price paid at purchase time and does not follow later
/// certificate price changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub user_id: EntityId,
    pub certificate_id: EntityId,
    pub cost: Decimal,
    pub purchase_date: DateTime<Utc>,
}

impl Order {
    pub fn new(id: EntityId, user_id: EntityId, certificate_id: EntityId, cost: Decimal) -> Self {
        Self {
            id,
            user_id,
            certificate_id,
            cost,
            purchase_date: Utc::now(),
        }
    }

    pub fn purchased_at(mut self, at: DateTime<Utc>) -> Self {
        self.purchase_date = at;
        self
    }

    /// Scope predicate: order was placed by user `user_id`
    pub fn placed_by(user_id: EntityId) -> ScopePredicate<Order> {
        ScopePredicate::new(format!("user.id = {}", user_id), move |o: &Order| {
            o.user_id == user_id
        })
    }
}

impl Entity for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<Order>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::builder()
                .field(
                    Field::new("user_id", |o: &Order| FieldValue::from(o.user_id))
                        .alias("userId")
                        .filterable(),
                )
                .field(
                    Field::new("certificate_id", |o: &Order| {
                        FieldValue::from(o.certificate_id)
                    })
                    .alias("certificateId")
                    .filterable(),
                )
                .field(
                    Field::new("cost", |o: &Order| FieldValue::from(o.cost))
                        .filterable()
                        .sortable(),
                )
                .field(
                    Field::new("purchase_date", |o: &Order| {
                        FieldValue::from(o.purchase_date)
                    })
                    .alias("purchaseDate")
                    .filterable()
                    .sortable(),
                )
                .build()
        })
    }
}

/// Repository adapter for orders
#[derive(Clone)]
pub struct OrderRepository {
    listing: ListingService<Order>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn EntityStore<Order>>, config: Arc<ListingConfig>) -> Self {
        Self {
            listing: ListingService::new(store, config),
        }
    }

    pub async fn find_all(&self, request: &ListingRequest) -> Result<Vec<Order>, QueryError> {
        self.listing.list(request).await
    }

    /// Orders placed by user `user_id`
    pub async fn find_by_user_id(
        &self,
        user_id: EntityId,
        request: &ListingRequest,
    ) -> Result<Vec<Order>, QueryError> {
        self.listing
            .list_scoped(request, Order::placed_by(user_id))
            .await
    }

    pub async fn find_by_id(&self, id: EntityId) -> Result<Option<Order>, QueryError> {
        self.listing.get(id).await
    }
}

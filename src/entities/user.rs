//! Customers and their repository

use crate::config::ListingConfig;
use crate::core::entity::{Entity, EntityId};
use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::query::ListingRequest;
use crate::core::registry::{Field, FieldRegistry};
use crate::core::service::ListingService;
use crate::core::store::EntityStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// A customer placing orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: EntityId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<User>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::builder()
                .field(
                    Field::new("name", |u: &User| FieldValue::from(u.name.as_str()))
                        .filterable()
                        .searchable()
                        .sortable(),
                )
                .field(
                    Field::new("email", |u: &User| FieldValue::from(u.email.as_str()))
                        .filterable()
                        .searchable()
                        .sortable(),
                )
                .build()
        })
    }
}

/// Repository adapter for users
#[derive(Clone)]
pub struct UserRepository {
    listing: ListingService<User>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn EntityStore<User>>, config: Arc<ListingConfig>) -> Self {
        Self {
            listing: ListingService::new(store, config),
        }
    }

    pub async fn find_all(&self, request: &ListingRequest) -> Result<Vec<User>, QueryError> {
        self.listing.list(request).await
    }

    pub async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, QueryError> {
        self.listing.get(id).await
    }
}

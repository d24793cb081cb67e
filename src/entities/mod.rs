//! Catalog resources: certificates, tags, orders and users
//!
//! Each resource declares its [`FieldRegistry`](crate::core::FieldRegistry)
//! and a thin repository adapter over the generic listing service.

pub mod certificate;
pub mod order;
pub mod tag;
pub mod user;

pub use certificate::{Certificate, CertificateRepository};
pub use order::{Order, OrderRepository};
pub use tag::{Tag, TagRepository};
pub use user::{User, UserRepository};

use crate::config::ListingConfig;
use crate::core::store::{EntityStore, SpendingStore};
use std::sync::Arc;

/// One repository per resource, sharing a configuration
#[derive(Clone)]
pub struct Repositories {
    pub certificates: CertificateRepository,
    pub tags: TagRepository,
    pub orders: OrderRepository,
    pub users: UserRepository,
}

/// Store handles needed to build [`Repositories`]
pub struct CatalogStores {
    pub certificates: Arc<dyn EntityStore<Certificate>>,
    pub tags: Arc<dyn EntityStore<Tag>>,
    pub orders: Arc<dyn EntityStore<Order>>,
    pub users: Arc<dyn EntityStore<User>>,
    pub spending: Arc<dyn SpendingStore>,
}

impl Repositories {
    pub fn new(stores: CatalogStores, config: Arc<ListingConfig>) -> Self {
        Self {
            certificates: CertificateRepository::new(stores.certificates, Arc::clone(&config)),
            tags: TagRepository::new(stores.tags, stores.spending, Arc::clone(&config)),
            orders: OrderRepository::new(stores.orders, Arc::clone(&config)),
            users: UserRepository::new(stores.users, config),
        }
    }
}

//! # certlist
//!
//! Dynamic listing queries for a gift-certificate catalog.
//!
//! ## Features
//!
//! - **Field Registries**: per-entity allow-lists of filter, search and sort fields
//! - **Permissive Parsing**: unknown fields are skipped, or rejected in strict mode
//! - **Deterministic Paging**: every ordering ends with an id tie-break
//! - **Scoped Listings**: "certificates with tag 3" add one predicate to a normal listing
//! - **Spending Aggregation**: most popular tag of the highest-spending user
//! - **Pluggable Stores**: async store traits with an in-memory implementation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use certlist::prelude::*;
//!
//! let catalog = InMemoryCatalog::new();
//! catalog.tags.insert(Tag::new(3, "relax"))?;
//!
//! let repos = catalog.repositories(Arc::new(ListingConfig::default()));
//!
//! let mut params = RawParams::new();
//! params.insert("sort".into(), vec!["-price,name".into()]);
//! params.insert("search".into(), vec!["spa".into()]);
//! let request = ListingRequest::new(params, 0, 10)?;
//!
//! let certificates = repos.certificates.find_by_tag_id(3, &request).await?;
//! let favourite = repos.tags.find_most_popular_tag_of_top_spender().await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CompiledQuery, Entity, EntityId, EntityStore, Field, FieldRegistry, FieldValue,
        FilterCriterion, FilterMode, ListingRequest, ListingService, PageWindow, QueryError,
        QueryPlan, RawParams, ScopePredicate, SortDirection, SortToken, SpendingStore,
        StorageError,
    };

    // === Entities ===
    pub use crate::entities::{
        Certificate, CertificateRepository, Order, OrderRepository, Repositories, Tag,
        TagRepository, User, UserRepository,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::{InMemoryCatalog, InMemoryStore};

    // === Config ===
    pub use crate::config::{ListingConfig, UnknownFieldPolicy};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use std::sync::Arc;
}

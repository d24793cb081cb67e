//! Core query-construction engine: field registries, request parsing,
//! query plans and their execution

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod executor;
pub mod field;
pub mod filter;
pub mod plan;
pub mod query;
pub mod registry;
pub mod service;
pub mod sort;
pub mod store;

pub use aggregate::find_most_popular_tag_of_top_spender;
pub use entity::{Entity, EntityId};
pub use error::{AggregationStage, QueryError, StorageError};
pub use executor::{CompiledQuery, execute};
pub use field::FieldValue;
pub use filter::{FilterCriterion, FilterMode, RawParams};
pub use plan::{QueryPlan, ScopePredicate};
pub use query::{ListingRequest, PageWindow};
pub use registry::{Field, FieldAccessor, FieldRegistry, FieldRegistryBuilder};
pub use service::ListingService;
pub use sort::{SortDirection, SortToken};
pub use store::{EntityStore, SpendingStore, TagFrequency, UserSpend};

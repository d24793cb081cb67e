//! Entity trait defining the core abstraction for all listable resources

use crate::core::registry::FieldRegistry;

/// Identifier type shared by every resource in the catalog
pub type EntityId = i64;

/// Base trait for all entities the listing engine can query.
///
/// Every entity has:
/// - a plural resource name used in logs and errors (e.g., "certificates")
/// - an integer identity, which is also the final ordering tie-break
/// - a process-wide [`FieldRegistry`] describing which fields callers may
///   filter, search and sort on
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "certificates", "tags")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "certificate", "tag")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> EntityId;

    /// The static field table for this entity type.
    ///
    /// Implementations build it once (typically behind a `OnceLock`) and hand
    /// out the same reference for the lifetime of the process.
    fn registry() -> &'static FieldRegistry<Self>;
}

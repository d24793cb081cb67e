//! Per-entity field tables
//!
//! A [`FieldRegistry`] is the allow-list every request is checked against:
//! only the fields it names can be filtered, searched or sorted on. Request
//! keys and sort tokens that do not resolve here never reach the store.

use crate::core::entity::Entity;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;

/// Reads one field out of an entity
pub type FieldAccessor<E> = fn(&E) -> FieldValue;

/// Name of the identity field every registry carries
pub const IDENTITY_FIELD: &str = "id";

/// One declared field of an entity type
///
/// A field is addressed by its canonical name or by any of its aliases
/// (e.g. `create_date` and `createDate`). Capabilities are opt-in.
pub struct Field<E> {
    name: &'static str,
    aliases: Vec<&'static str>,
    accessor: FieldAccessor<E>,
    sortable: bool,
    filterable: bool,
    searchable: bool,
}

impl<E> Field<E> {
    /// Declare a field with no capabilities yet
    pub fn new(name: &'static str, accessor: FieldAccessor<E>) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            accessor,
            sortable: false,
            filterable: false,
            searchable: false,
        }
    }

    /// Add an alternative request key for this field
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Allow ordering by this field
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow equality filtering on this field
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Include this field in free-text search
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Canonical name followed by aliases, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Read this field from an entity
    pub fn value(&self, entity: &E) -> FieldValue {
        (self.accessor)(entity)
    }

    /// Ascending ordering function for this field
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        self.value(a).total_cmp(&self.value(b))
    }
}

impl<E> fmt::Debug for Field<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("searchable", &self.searchable)
            .finish()
    }
}

/// Immutable allow-list of queryable fields for one entity type
///
/// Built once at startup and shared read-only by every request.
pub struct FieldRegistry<E> {
    entity_type: &'static str,
    fields: IndexMap<&'static str, Field<E>>,
    /// Request key (canonical name or alias) -> canonical name
    keys: IndexMap<&'static str, &'static str>,
}

impl<E: Entity> FieldRegistry<E> {
    /// Start a registry for `E`.
    ///
    /// The identity field `id` is registered as sortable up front, so every
    /// entity can be ordered by id.
    pub fn builder() -> FieldRegistryBuilder<E> {
        let mut fields = IndexMap::new();
        fields.insert(
            IDENTITY_FIELD,
            Field::new(IDENTITY_FIELD, identity_value::<E> as FieldAccessor<E>).sortable(),
        );
        FieldRegistryBuilder {
            entity_type: E::resource_name_singular(),
            fields,
        }
    }
}

impl<E> FieldRegistry<E> {
    /// Singular name of the entity type this registry describes
    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// Look up a field by canonical name or alias
    pub fn field(&self, key: &str) -> Option<&Field<E>> {
        self.keys.get(key).and_then(|name| self.fields.get(name))
    }

    /// Resolve a sort token's field name to a sortable field
    pub fn sortable(&self, key: &str) -> Option<&Field<E>> {
        self.field(key).filter(|field| field.is_sortable())
    }

    /// Resolve a request key to a filterable field
    pub fn filterable(&self, key: &str) -> Option<&Field<E>> {
        self.field(key).filter(|field| field.is_filterable())
    }

    /// Filterable fields in declaration order
    pub fn filter_fields(&self) -> impl Iterator<Item = &Field<E>> {
        self.fields.values().filter(|field| field.is_filterable())
    }

    /// Searchable fields in declaration order
    pub fn search_fields(&self) -> impl Iterator<Item = &Field<E>> {
        self.fields.values().filter(|field| field.is_searchable())
    }

    pub fn has_search_fields(&self) -> bool {
        self.fields.values().any(|field| field.is_searchable())
    }

    /// Whether `key` names any field, whatever its capabilities
    pub fn is_known(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }
}

impl<E> fmt::Debug for FieldRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("entity_type", &self.entity_type)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`FieldRegistry`]
pub struct FieldRegistryBuilder<E> {
    entity_type: &'static str,
    fields: IndexMap<&'static str, Field<E>>,
}

impl<E> FieldRegistryBuilder<E> {
    /// Declare a field. Re-declaring a name replaces the earlier entry.
    pub fn field(mut self, field: Field<E>) -> Self {
        self.fields.insert(field.name, field);
        self
    }

    pub fn build(self) -> FieldRegistry<E> {
        let mut keys = IndexMap::new();
        for field in self.fields.values() {
            for key in field.keys() {
                // first declaration of a key wins
                keys.entry(key).or_insert(field.name);
            }
        }

        FieldRegistry {
            entity_type: self.entity_type,
            fields: self.fields,
            keys,
        }
    }
}

fn identity_value<E: Entity>(entity: &E) -> FieldValue {
    FieldValue::Integer(entity.id())
}

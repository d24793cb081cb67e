//! Filter and free-text search criteria
//!
//! Request parameters are matched against the entity's filterable aliases;
//! each hit becomes an equality criterion. The `search` parameter fans out
//! into one case-insensitive substring criterion per searchable field.
//!
//! Combination rule applied by the executor:
//!
//! ```text
//! eq_1 AND eq_2 AND ... AND (contains_1 OR contains_2 OR ...)
//! ```
//!
//! Blank values produce no criterion at all, so an empty filter or search
//! never excludes rows.

use crate::config::{ParamNames, UnknownFieldPolicy};
use crate::core::error::QueryError;
use crate::core::registry::FieldRegistry;
use serde::Serialize;
use std::collections::HashMap;

/// Decoded query string: every key maps to all of its values, in order
pub type RawParams = HashMap<String, Vec<String>>;

/// Default name of the free-text search parameter
pub const SEARCH_PARAM: &str = "search";

/// How a criterion compares the field with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterMode {
    /// Field equals the value (AND-ed with every other criterion)
    Equality,
    /// Field contains the value, ignoring case (OR-ed with the other
    /// substring criteria)
    SubstringContains,
}

/// A single validated predicate over one registry field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriterion {
    pub field: &'static str,
    pub value: String,
    pub mode: FilterMode,
}

impl FilterCriterion {
    pub fn equality(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            mode: FilterMode::Equality,
        }
    }

    pub fn contains(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            mode: FilterMode::SubstringContains,
        }
    }
}

/// First value of `key`, trimmed; `None` when absent or blank
pub fn first_value<'a>(params: &'a RawParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(|values| values.first())
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Build criteria from request parameters, ignoring unknown keys
pub fn build<E>(params: &RawParams, registry: &FieldRegistry<E>) -> Vec<FilterCriterion> {
    build_with_search_key(params, registry, SEARCH_PARAM)
}

/// Same as [`build`], reading free text from a custom parameter name
pub fn build_with_search_key<E>(
    params: &RawParams,
    registry: &FieldRegistry<E>,
    search_key: &str,
) -> Vec<FilterCriterion> {
    let mut criteria = Vec::new();

    for field in registry.filter_fields() {
        // the first alias present decides; later aliases of the same field are ignored
        let Some(key) = field.keys().find(|key| params.contains_key(*key)) else {
            continue;
        };
        if let Some(value) = first_value(params, key) {
            criteria.push(FilterCriterion::equality(field.name(), value));
        }
    }

    if let Some(text) = first_value(params, search_key) {
        criteria.extend(
            registry
                .search_fields()
                .map(|field| FilterCriterion::contains(field.name(), text)),
        );
    }

    criteria
}

/// Build criteria under an explicit unknown-field policy.
///
/// With [`UnknownFieldPolicy::Reject`], any parameter that is neither a
/// reserved name nor a filterable alias fails the request.
pub fn build_with_policy<E>(
    params: &RawParams,
    registry: &FieldRegistry<E>,
    policy: UnknownFieldPolicy,
    names: &ParamNames,
) -> Result<Vec<FilterCriterion>, QueryError> {
    if policy == UnknownFieldPolicy::Reject {
        let reserved = names.reserved();
        let mut unknown: Vec<&str> = params
            .keys()
            .map(String::as_str)
            .filter(|key| !reserved.contains(key) && registry.filterable(key).is_none())
            .collect();
        unknown.sort_unstable();

        if let Some(field) = unknown.first() {
            return Err(QueryError::InvalidField {
                entity_type: registry.entity_type().to_string(),
                field: field.to_string(),
            });
        }
    }

    Ok(build_with_search_key(params, registry, &names.search))
}

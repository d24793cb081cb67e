//! Sort expression parsing
//!
//! A sort expression is a comma-separated list of field names, each
//! optionally prefixed with `+` (ascending) or `-` (descending):
//!
//! ```text
//! sort=-price,name        price descending, then name ascending
//! sort=+createDate        create_date ascending (alias)
//! ```
//!
//! Tokens are resolved against the entity's [`FieldRegistry`]. Unknown
//! fields are dropped and repeated fields keep their first occurrence, so the
//! resulting list is a clean lexicographic comparator chain.

use crate::config::UnknownFieldPolicy;
use crate::core::error::QueryError;
use crate::core::registry::{FieldRegistry, IDENTITY_FIELD};
use serde::Serialize;

/// Direction of one ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison result
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One validated ordering key
///
/// `field` is always a canonical registry name, never a raw request token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortToken {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortToken {
    pub fn ascending(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

impl std::fmt::Display for SortToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "+{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

/// Order used when the caller gives no sort expression at all
pub fn default_order() -> Vec<SortToken> {
    vec![SortToken::ascending(IDENTITY_FIELD)]
}

/// Parse a raw sort expression, silently dropping unknown fields.
///
/// A missing or blank expression yields the default `id` ascending order.
/// An expression made only of unknown fields yields an empty list; the
/// executor still appends its identity tie-break.
pub fn parse<E>(raw: Option<&str>, registry: &FieldRegistry<E>) -> Vec<SortToken> {
    let resolved = resolve(raw, registry);
    resolved.trace_dropped(registry);
    resolved.tokens
}

/// Parse a raw sort expression under an explicit unknown-field policy
pub fn parse_with_policy<E>(
    raw: Option<&str>,
    registry: &FieldRegistry<E>,
    policy: UnknownFieldPolicy,
) -> Result<Vec<SortToken>, QueryError> {
    let resolved = resolve(raw, registry);

    if policy == UnknownFieldPolicy::Reject {
        if let Some(name) = resolved.unknown.first() {
            return Err(QueryError::InvalidField {
                entity_type: registry.entity_type().to_string(),
                field: name.to_string(),
            });
        }
    }

    resolved.trace_dropped(registry);
    Ok(resolved.tokens)
}

/// Tokens that resolved, plus the names that did not, in request order
struct Resolved<'a> {
    tokens: Vec<SortToken>,
    unknown: Vec<&'a str>,
}

impl Resolved<'_> {
    fn trace_dropped<E>(&self, registry: &FieldRegistry<E>) {
        for name in &self.unknown {
            tracing::trace!(
                entity_type = registry.entity_type(),
                field = *name,
                "dropping unknown sort field"
            );
        }
    }
}

fn resolve<'a, E>(raw: Option<&'a str>, registry: &FieldRegistry<E>) -> Resolved<'a> {
    let mut resolved = Resolved {
        tokens: Vec::new(),
        unknown: Vec::new(),
    };

    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        resolved.tokens = default_order();
        return resolved;
    }

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (direction, name) = split_direction(token);

        let Some(field) = registry.sortable(name) else {
            resolved.unknown.push(name);
            continue;
        };

        if resolved.tokens.iter().any(|t| t.field == field.name()) {
            continue;
        }
        resolved.tokens.push(SortToken {
            field: field.name(),
            direction,
        });
    }

    resolved
}

fn split_direction(token: &str) -> (SortDirection, &str) {
    if let Some(rest) = token.strip_prefix('-') {
        (SortDirection::Descending, rest.trim_start())
    } else if let Some(rest) = token.strip_prefix('+') {
        (SortDirection::Ascending, rest.trim_start())
    } else {
        (SortDirection::Ascending, token)
    }
}

//! Fully resolved listing plans

use crate::config::ListingConfig;
use crate::core::entity::Entity;
use crate::core::error::QueryError;
use crate::core::filter::{self, FilterCriterion};
use crate::core::query::{ListingRequest, PageWindow};
use crate::core::sort::{self, SortToken};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied extra predicate for scoped listings
///
/// Scoped listings ("certificates with tag 3", "orders of user 7") add one
/// equality join condition on top of the request's own filters. The engine
/// treats it as opaque: it is AND-ed with everything else and never
/// inspected. `label` only feeds logs and `Debug`.
pub struct ScopePredicate<E> {
    label: String,
    predicate: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> ScopePredicate<E> {
    pub fn new(
        label: impl Into<String>,
        predicate: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, entity: &E) -> bool {
        (self.predicate)(entity)
    }
}

impl<E> Clone for ScopePredicate<E> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E> fmt::Debug for ScopePredicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopePredicate").field(&self.label).finish()
    }
}

/// Validated description of one listing request
#[derive(Debug, Clone)]
pub struct QueryPlan<E> {
    pub criteria: Vec<FilterCriterion>,
    pub order: Vec<SortToken>,
    pub window: PageWindow,
    pub scope: Option<ScopePredicate<E>>,
}

impl<E: Entity> QueryPlan<E> {
    /// Plan with no filters, default ordering and the given window
    pub fn new(window: PageWindow) -> Self {
        Self {
            criteria: Vec::new(),
            order: sort::default_order(),
            window,
            scope: None,
        }
    }

    /// Resolve a parsed request against `E`'s registry.
    ///
    /// Sort and filter parameters are read through the configured names and
    /// validated under the configured unknown-field policy.
    pub fn from_request(
        request: &ListingRequest,
        config: &ListingConfig,
    ) -> Result<Self, QueryError> {
        let registry = E::registry();
        let policy = config.unknown_fields;

        let raw_sort = request.param(&config.params.sort);
        let order = sort::parse_with_policy(raw_sort, registry, policy)?;
        let criteria =
            filter::build_with_policy(&request.params, registry, policy, &config.params)?;

        Ok(Self {
            criteria,
            order,
            window: request.window,
            scope: None,
        })
    }

    /// Restrict the plan with a scoped-listing predicate
    pub fn scoped(mut self, scope: ScopePredicate<E>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<FilterCriterion>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_order(mut self, order: Vec<SortToken>) -> Self {
        self.order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Row(i64);

    #[test]
    fn test_scope_predicate_is_opaque_and_shared() {
        let scope = ScopePredicate::new("even rows", |row: &Row| row.0 % 2 == 0);
        let copy = scope.clone();

        assert_eq!(copy.label(), "even rows");
        assert!(scope.matches(&Row(4)));
        assert!(!copy.matches(&Row(3)));
        assert_eq!(format!("{:?}", scope), "ScopePredicate(\"even rows\")");
    }
}

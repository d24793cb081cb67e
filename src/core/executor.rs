//! Query compilation and execution
//!
//! [`CompiledQuery`] binds a [`QueryPlan`] to its entity's registry: filter
//! criteria and sort tokens become direct references to registry fields, so
//! evaluation never looks a name up per row. [`execute`] then issues exactly
//! one store call.

use crate::core::entity::Entity;
use crate::core::error::QueryError;
use crate::core::filter::FilterMode;
use crate::core::plan::{QueryPlan, ScopePredicate};
use crate::core::query::PageWindow;
use crate::core::registry::Field;
use crate::core::sort::{SortDirection, SortToken};
use crate::core::store::EntityStore;
use std::cmp::Ordering;

/// A plan resolved against `E`'s registry, ready for a store to evaluate
///
/// Row semantics:
/// - a row matches when every equality criterion holds, at least one
///   substring criterion holds (if there are any), and the scope predicate
///   holds (if there is one)
/// - rows are ordered by the sort keys in order, then by ascending id, so
///   the order is total and pages are reproducible
pub struct CompiledQuery<E: 'static> {
    entity_type: &'static str,
    equalities: Vec<(&'static Field<E>, String)>,
    /// Needles are stored lowercase
    contains: Vec<(&'static Field<E>, String)>,
    scope: Option<ScopePredicate<E>>,
    order: Vec<(&'static Field<E>, SortDirection)>,
    window: PageWindow,
}

impl<E: Entity> CompiledQuery<E> {
    /// Bind `plan` to `E::registry()`.
    ///
    /// Criteria or sort tokens naming fields the registry does not allow for
    /// that use are dropped, same as during parsing.
    pub fn compile(plan: &QueryPlan<E>) -> Self {
        let registry = E::registry();
        let mut equalities = Vec::new();
        let mut contains = Vec::new();

        for criterion in &plan.criteria {
            let Some(field) = registry.field(criterion.field) else {
                tracing::trace!(
                    entity_type = registry.entity_type(),
                    field = criterion.field,
                    "dropping criterion on unknown field"
                );
                continue;
            };
            match criterion.mode {
                FilterMode::Equality if field.is_filterable() => {
                    equalities.push((field, criterion.value.clone()));
                }
                FilterMode::SubstringContains if field.is_searchable() => {
                    contains.push((field, criterion.value.to_lowercase()));
                }
                _ => tracing::trace!(
                    entity_type = registry.entity_type(),
                    field = criterion.field,
                    mode = ?criterion.mode,
                    "dropping criterion the field does not allow"
                ),
            }
        }

        let mut order: Vec<(&'static Field<E>, SortDirection)> = Vec::new();
        for token in &plan.order {
            match registry.sortable(token.field) {
                Some(field) if !order.iter().any(|(f, _)| f.name() == field.name()) => {
                    order.push((field, token.direction));
                }
                _ => {}
            }
        }

        Self {
            entity_type: registry.entity_type(),
            equalities,
            contains,
            scope: plan.scope.clone(),
            order,
            window: plan.window,
        }
    }

    /// Whether `entity` satisfies the composite predicate
    pub fn matches(&self, entity: &E) -> bool {
        let equal = self
            .equalities
            .iter()
            .all(|(field, value)| field.value(entity).matches_literal(value));
        if !equal {
            return false;
        }

        let searched = self.contains.is_empty()
            || self
                .contains
                .iter()
                .any(|(field, needle)| field.value(entity).contains_folded(needle));
        if !searched {
            return false;
        }

        self.scope.as_ref().is_none_or(|scope| scope.matches(entity))
    }

    /// Composite ordering: sort keys in order, then ascending id
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        self.order
            .iter()
            .map(|(field, direction)| direction.apply(field.compare(a, b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id().cmp(&b.id()))
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// Effective ordering keys, without the implicit id tie-break
    pub fn sort_keys(&self) -> Vec<SortToken> {
        self.order
            .iter()
            .map(|(field, direction)| SortToken {
                field: field.name(),
                direction: *direction,
            })
            .collect()
    }

    /// Reference evaluation over an in-process row set: filter, stable sort,
    /// then window.
    pub fn evaluate<I>(&self, rows: I) -> Vec<E>
    where
        I: IntoIterator<Item = E>,
    {
        let mut matched: Vec<E> = rows.into_iter().filter(|row| self.matches(row)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
            .into_iter()
            .skip(self.window.offset())
            .take(self.window.limit())
            .collect()
    }
}

/// Run `plan` against `store` and return the ordered window.
///
/// Issues exactly one store call. Store failures are returned unchanged
/// inside [`QueryError::Storage`]; nothing is retried.
pub async fn execute<E, S>(plan: &QueryPlan<E>, store: &S) -> Result<Vec<E>, QueryError>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    let query = CompiledQuery::compile(plan);
    let rows = store.select(&query).await?;

    tracing::debug!(
        entity_type = query.entity_type(),
        criteria = plan.criteria.len(),
        scope = plan.scope.as_ref().map(ScopePredicate::label),
        sort = %display_order(&query.sort_keys()),
        offset = query.window().offset(),
        limit = query.window().limit(),
        rows = rows.len(),
        "executed listing query"
    );

    Ok(rows)
}

fn display_order(tokens: &[SortToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

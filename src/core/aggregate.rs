//! Spending aggregation: the most popular tag of the top spender
//!
//! Two dependent grouped queries, run strictly in sequence:
//!
//! 1. orders grouped by user, cost summed; the highest total wins
//! 2. the winner's orders joined to certificate tags, counted per tag; the
//!    most frequent tag wins
//!
//! Stage 2 is parameterized by stage 1's user id, so the two calls are
//! never merged. Exact ties are broken by the lowest id in both stages.

use crate::core::entity::EntityId;
use crate::core::error::{AggregationStage, QueryError};
use crate::core::store::{SpendingStore, TagFrequency, UserSpend};

/// Find the most frequently used tag among the orders of the user with the
/// highest total order cost.
///
/// Returns `Ok(None)` when there are no orders at all. Fails with
/// [`QueryError::AggregationNotFound`] when the top spender has no tagged
/// certificates, and with [`QueryError::Storage`] when either store call
/// fails.
pub async fn find_most_popular_tag_of_top_spender<S>(
    store: &S,
) -> Result<Option<EntityId>, QueryError>
where
    S: SpendingStore + ?Sized,
{
    let spending = store.total_cost_by_user().await?;
    let Some(top) = top_spender(&spending) else {
        tracing::debug!("no orders, no popular tag");
        return Ok(None);
    };
    tracing::debug!(
        user_id = top.user_id,
        total_cost = %top.total_cost,
        groups = spending.len(),
        "selected top spender"
    );

    let frequencies = store.tag_frequency_for_user(top.user_id).await?;
    let Some(tag) = most_frequent_tag(&frequencies) else {
        tracing::warn!(
            user_id = top.user_id,
            "top spender has no tagged certificates"
        );
        return Err(QueryError::AggregationNotFound {
            stage: AggregationStage::TagFrequency,
            message: format!("user {} has no tagged certificates", top.user_id),
        });
    };
    tracing::debug!(
        user_id = top.user_id,
        tag_id = tag.tag_id,
        count = tag.count,
        "selected most popular tag"
    );

    Ok(Some(tag.tag_id))
}

/// Highest total cost; equal totals go to the lowest user id
fn top_spender(groups: &[UserSpend]) -> Option<&UserSpend> {
    groups.iter().max_by(|a, b| {
        a.total_cost
            .cmp(&b.total_cost)
            .then_with(|| b.user_id.cmp(&a.user_id))
    })
}

/// Highest count; equal counts go to the lowest tag id. Zero counts never win.
fn most_frequent_tag(groups: &[TagFrequency]) -> Option<&TagFrequency> {
    groups
        .iter()
        .filter(|group| group.count > 0)
        .max_by(|a, b| a.count.cmp(&b.count).then_with(|| b.tag_id.cmp(&a.tag_id)))
}

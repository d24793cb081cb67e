//! Tags and their repository

use crate::config::ListingConfig;
use crate::core::aggregate;
use crate::core::entity::{Entity, EntityId};
use crate::core::error::{AggregationStage, QueryError};
use crate::core::field::FieldValue;
use crate::core::query::ListingRequest;
use crate::core::registry::{Field, FieldRegistry};
use crate::core::service::ListingService;
use crate::core::store::{EntityStore, SpendingStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// A label attached to certificates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
}

impl Tag {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Tag {
    fn resource_name() -> &'static str {
        "tags"
    }

    fn resource_name_singular() -> &'static str {
        "tag"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<Tag>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::builder()
                .field(
                    Field::new("name", |t: &Tag| FieldValue::from(t.name.as_str()))
                        .alias("tagName")
                        .filterable()
                        .searchable()
                        .sortable(),
                )
                .build()
        })
    }
}

/// Repository adapter for tags
#[derive(Clone)]
pub struct TagRepository {
    listing: ListingService<Tag>,
    spending: Arc<dyn SpendingStore>,
}

impl TagRepository {
    pub fn new(
        store: Arc<dyn EntityStore<Tag>>,
        spending: Arc<dyn SpendingStore>,
        config: Arc<ListingConfig>,
    ) -> Self {
        Self {
            listing: ListingService::new(store, config),
            spending,
        }
    }

    pub async fn find_all(&self, request: &ListingRequest) -> Result<Vec<Tag>, QueryError> {
        self.listing.list(request).await
    }

    pub async fn find_by_id(&self, id: EntityId) -> Result<Option<Tag>, QueryError> {
        self.listing.get(id).await
    }

    /// Id of the most used tag among the orders of the highest-spending user
    pub async fn find_most_popular_tag_id_of_top_spender(
        &self,
    ) -> Result<Option<EntityId>, QueryError> {
        aggregate::find_most_popular_tag_of_top_spender(self.spending.as_ref()).await
    }

    /// Same as [`find_most_popular_tag_id_of_top_spender`], resolved to the
    /// tag row
    ///
    /// [`find_most_popular_tag_id_of_top_spender`]: Self::find_most_popular_tag_id_of_top_spender
    pub async fn find_most_popular_tag_of_top_spender(&self) -> Result<Option<Tag>, QueryError> {
        let Some(tag_id) = self.find_most_popular_tag_id_of_top_spender().await? else {
            return Ok(None);
        };

        match self.listing.get(tag_id).await? {
            Some(tag) => Ok(Some(tag)),
            None => Err(QueryError::AggregationNotFound {
                stage: AggregationStage::TagLookup,
                message: format!("tag {} does not exist", tag_id),
            }),
        }
    }
}

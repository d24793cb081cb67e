//! Gift certificates and their repository

use crate::config::ListingConfig;
use crate::core::entity::{Entity, EntityId};
use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::plan::ScopePredicate;
use crate::core::query::ListingRequest;
use crate::core::registry::{Field, FieldRegistry};
use crate::core::service::ListingService;
use crate::core::store::EntityStore;
use crate::entities::tag::Tag;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// A purchasable gift certificate
///
/// `tags` is the certificate's side of the certificate/tag association,
/// loaded together with the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Validity in days
    pub duration: i32,
    pub create_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Certificate {
    /// Create an untagged certificate stamped with the current time
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        duration: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            duration,
            create_date: now,
            last_update_date: now,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Set both creation and last-update timestamps
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.create_date = at;
        self.last_update_date = at;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_update_date = at;
        self
    }

    pub fn has_tag_id(&self, tag_id: EntityId) -> bool {
        self.tags.iter().any(|tag| tag.id == tag_id)
    }

    pub fn has_tag_name(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Scope predicate: certificate is associated with tag `tag_id`
    pub fn tagged_with(tag_id: EntityId) -> ScopePredicate<Certificate> {
        ScopePredicate::new(format!("tag.id = {}", tag_id), move |c: &Certificate| {
            c.has_tag_id(tag_id)
        })
    }

    /// Scope predicate: certificate is associated with a tag named `name`
    pub fn tagged_with_name(name: impl Into<String>) -> ScopePredicate<Certificate> {
        let name = name.into();
        ScopePredicate::new(format!("tag.name = {}", name), move |c: &Certificate| {
            c.has_tag_name(&name)
        })
    }
}

impl Entity for Certificate {
    fn resource_name() -> &'static str {
        "certificates"
    }

    fn resource_name_singular() -> &'static str {
        "certificate"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn registry() -> &'static FieldRegistry<Self> {
        static REGISTRY: OnceLock<FieldRegistry<Certificate>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::builder()
                .field(
                    Field::new("name", |c: &Certificate| FieldValue::from(c.name.as_str()))
                        .filterable()
                        .searchable()
                        .sortable(),
                )
                .field(
                    Field::new("description", |c: &Certificate| {
                        FieldValue::from(c.description.as_str())
                    })
                    .filterable()
                    .searchable()
                    .sortable(),
                )
                .field(
                    Field::new("price", |c: &Certificate| FieldValue::from(c.price))
                        .filterable()
                        .sortable(),
                )
                .field(
                    Field::new("duration", |c: &Certificate| FieldValue::from(c.duration))
                        .alias("days")
                        .filterable()
                        .sortable(),
                )
                .field(
                    Field::new("create_date", |c: &Certificate| {
                        FieldValue::from(c.create_date)
                    })
                    .alias("createDate")
                    .filterable()
                    .sortable(),
                )
                .field(
                    Field::new("last_update_date", |c: &Certificate| {
                        FieldValue::from(c.last_update_date)
                    })
                    .alias("lastUpdateDate")
                    .filterable()
                    .sortable(),
                )
                .build()
        })
    }
}

/// Repository adapter for certificates
#[derive(Clone)]
pub struct CertificateRepository {
    listing: ListingService<Certificate>,
}

impl CertificateRepository {
    pub fn new(store: Arc<dyn EntityStore<Certificate>>, config: Arc<ListingConfig>) -> Self {
        Self {
            listing: ListingService::new(store, config),
        }
    }

    pub async fn find_all(&self, request: &ListingRequest) -> Result<Vec<Certificate>, QueryError> {
        self.listing.list(request).await
    }

    /// Certificates associated with tag `tag_id`, honoring the request's own
    /// filters, order and page
    pub async fn find_by_tag_id(
        &self,
        tag_id: EntityId,
        request: &ListingRequest,
    ) -> Result<Vec<Certificate>, QueryError> {
        self.listing
            .list_scoped(request, Certificate::tagged_with(tag_id))
            .await
    }

    /// Certificates associated with a tag named `name`
    pub async fn find_by_tag_name(
        &self,
        name: &str,
        request: &ListingRequest,
    ) -> Result<Vec<Certificate>, QueryError> {
        self.listing
            .list_scoped(request, Certificate::tagged_with_name(name))
            .await
    }

    pub async fn find_by_id(&self, id: EntityId) -> Result<Option<Certificate>, QueryError> {
        self.listing.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn spa() -> Certificate {
        Certificate::new(1, "Spa day", "Full day at the spa", Decimal::new(4999, 2), 30)
            .with_tags([Tag::new(3, "relax"), Tag::new(5, "wellness")])
    }

    #[test]
    fn test_tag_scopes() {
        let certificate = spa();
        assert!(Certificate::tagged_with(3).matches(&certificate));
        assert!(!Certificate::tagged_with(4).matches(&certificate));
        assert!(Certificate::tagged_with_name("wellness").matches(&certificate));
        assert!(!Certificate::tagged_with_name("Wellness").matches(&certificate));
        assert_eq!(Certificate::tagged_with(3).label(), "tag.id = 3");
    }

    #[test]
    fn test_certificate_registry() {
        let registry = Certificate::registry();
        assert_eq!(
            registry.sortable("createDate").map(Field::name),
            Some("create_date")
        );
        assert_eq!(registry.filterable("days").map(Field::name), Some("duration"));
        assert!(registry.filterable("lastUpdateDate").is_some());
        assert!(registry.filterable("tags").is_none());
        assert_eq!(
            registry.search_fields().map(Field::name).collect::<Vec<_>>(),
            vec!["name", "description"]
        );
    }

    #[test]
    fn test_updated_at_keeps_create_date() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
        let certificate = spa().created_at(created).updated_at(updated);

        let registry = Certificate::registry();
        let create_date = registry.filterable("createDate").unwrap().value(&certificate);
        let last_update = registry.filterable("lastUpdateDate").unwrap().value(&certificate);
        assert!(create_date.matches_literal("2024-03-01"));
        assert!(last_update.matches_literal("2024-04-02"));
        assert!(!last_update.matches_literal("2024-03-01"));
    }

    #[test]
    fn test_field_values() {
        let certificate = spa();
        let registry = Certificate::registry();
        let price = registry.field("price").unwrap().value(&certificate);
        assert!(price.matches_literal("49.99"));
        let duration = registry.field("days").unwrap().value(&certificate);
        assert_eq!(duration, FieldValue::Integer(30));
    }
}

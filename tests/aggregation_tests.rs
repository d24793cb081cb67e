//! Integration tests for the most-popular-tag-of-top-spender aggregation

mod fixtures;

use certlist::core::AggregationStage;
use certlist::prelude::*;
use fixtures::*;

#[tokio::test]
async fn test_seeded_catalog_top_spender_tag() {
    let repos = seeded_repositories();

    let tag_id = repos.tags.find_most_popular_tag_id_of_top_spender().await.unwrap();
    assert_eq!(tag_id, Some(OUTDOOR));

    let tag = repos.tags.find_most_popular_tag_of_top_spender().await.unwrap();
    assert_eq!(tag, Some(Tag::new(OUTDOOR, "outdoor")));
}

#[tokio::test]
async fn test_repeat_tags_count_with_multiplicity() {
    let catalog = InMemoryCatalog::new();
    let a = Tag::new(1, "A");
    let b = Tag::new(2, "B");
    catalog.tags.insert_all([a.clone(), b.clone()]).unwrap();
    catalog
        .certificates
        .insert_all([
            Certificate::new(10, "First", "", Decimal::from(10), 10)
                .with_tags([a.clone()]),
            Certificate::new(11, "Second", "", Decimal::from(20), 10)
                .with_tags([a.clone(), b]),
        ])
        .unwrap();
    catalog
        .orders
        .insert_all([
            Order::new(1, 1, 10, Decimal::from(10)),
            Order::new(2, 1, 11, Decimal::from(20)),
            Order::new(3, 2, 11, Decimal::from(5)),
        ])
        .unwrap();

    let repos = catalog.repositories(Arc::new(ListingConfig::default()));
    let tag = repos.tags.find_most_popular_tag_of_top_spender().await.unwrap();
    assert_eq!(tag, Some(a));
}

#[tokio::test]
async fn test_no_orders_means_no_tag() {
    let catalog = InMemoryCatalog::new();
    catalog.tags.insert_all(tags()).unwrap();
    catalog.certificates.insert_all(certificates()).unwrap();

    let repos = catalog.repositories(Arc::new(ListingConfig::default()));
    assert_eq!(repos.tags.find_most_popular_tag_of_top_spender().await.unwrap(), None);
}

#[tokio::test]
async fn test_untagged_top_spender_is_not_found() {
    let catalog = seeded_catalog();
    // user 3 buys the untagged gift box often enough to outspend everyone
    catalog
        .orders
        .insert_all((10..50).map(|id| Order::new(id, 3, 6, Decimal::from(10))))
        .unwrap();

    let repos = catalog.repositories(Arc::new(ListingConfig::default()));
    let err = repos
        .tags
        .find_most_popular_tag_of_top_spender()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::AggregationNotFound {
            stage: AggregationStage::TagFrequency,
            ..
        }
    ));
    assert_eq!(err.error_code(), "AGGREGATION_NOT_FOUND");
}

#[tokio::test]
async fn test_equal_totals_go_to_lowest_user_id() {
    let catalog = seeded_catalog();
    catalog.orders.remove(5).unwrap();
    // Ann now spends exactly what Bob does, on the relax-tagged spa day
    catalog
        .orders
        .insert(Order::new(5, 1, 1, Decimal::new(24451, 2)))
        .unwrap();

    let repos = catalog.repositories(Arc::new(ListingConfig::default()));
    let tag = repos.tags.find_most_popular_tag_of_top_spender().await.unwrap();
    assert_eq!(tag.map(|t| t.id), Some(RELAX));
}

#[tokio::test]
async fn test_dangling_tag_reference_fails_lookup() {
    let catalog = seeded_catalog();
    catalog.tags.remove(OUTDOOR).unwrap();

    let repos = catalog.repositories(Arc::new(ListingConfig::default()));
    assert_eq!(
        repos.tags.find_most_popular_tag_id_of_top_spender().await.unwrap(),
        Some(OUTDOOR)
    );

    let err = repos
        .tags
        .find_most_popular_tag_of_top_spender()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::AggregationNotFound {
            stage: AggregationStage::TagLookup,
            ..
        }
    ));
}

//! Shared seeded catalog for integration tests
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod fixtures;
//! use fixtures::*;
//! ```
//!
//! Seed data:
//!
//! | id | certificate      | price  | days | tags             |
//! |----|------------------|--------|------|------------------|
//! | 1  | Spa day          | 49.99  | 30   | relax            |
//! | 2  | Climbing course  | 120.00 | 60   | sport, outdoor   |
//! | 3  | Kayak tour       | 75.50  | 14   | sport, outdoor   |
//! | 4  | Wine tasting     | 75.50  | 1    | food, relax      |
//! | 5  | Hiking weekend   | 99.00  | 2    | outdoor          |
//! | 6  | Gift box         | 10.00  | 365  | (none)           |
//!
//! Creation dates run 2024-03-01 to 2024-03-06 in the order 1, 4, 3, 5, 2, 6.
//! Only the climbing course (2) was updated afterwards, on 2024-03-20.
//!
//! Orders: Ann (1) buys 1 and 4 (125.49 total), Bob (2) buys 2, 3 and 5
//! (294.50 total). Cid (3) has no orders. Bob's most used tag is `outdoor`.

#![allow(dead_code)]

use certlist::prelude::*;
use chrono::TimeZone;

pub const RELAX: EntityId = 1;
pub const SPORT: EntityId = 2;
pub const OUTDOOR: EntityId = 3;
pub const FOOD: EntityId = 4;

pub fn tags() -> Vec<Tag> {
    vec![
        Tag::new(RELAX, "relax"),
        Tag::new(SPORT, "sport"),
        Tag::new(OUTDOOR, "outdoor"),
        Tag::new(FOOD, "food"),
    ]
}

fn tag(id: EntityId) -> Tag {
    tags()
        .into_iter()
        .find(|t| t.id == id)
        .expect("seeded tag")
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap()
}

pub fn certificates() -> Vec<Certificate> {
    vec![
        certificate(1, "Spa day", "Full day at the spa", 4999, 30)
            .with_tags([tag(RELAX)])
            .created_at(day(1)),
        certificate(2, "Climbing course", "Outdoor climbing with a guide", 12000, 60)
            .with_tags([tag(SPORT), tag(OUTDOOR)])
            .created_at(day(5))
            .updated_at(day(20)),
        certificate(3, "Kayak tour", "River kayaking for two", 7550, 14)
            .with_tags([tag(SPORT), tag(OUTDOOR)])
            .created_at(day(3)),
        certificate(4, "Wine tasting", "Evening with local wines", 7550, 1)
            .with_tags([tag(FOOD), tag(RELAX)])
            .created_at(day(2)),
        certificate(5, "Hiking weekend", "Mountain hiking and a spa evening", 9900, 2)
            .with_tags([tag(OUTDOOR)])
            .created_at(day(4)),
        certificate(6, "Gift box", "Untagged surprise", 1000, 365).created_at(day(6)),
    ]
}

/// Certificate priced in cents
fn certificate(id: EntityId, name: &str, description: &str, cents: i64, days: i32) -> Certificate {
    Certificate::new(id, name, description, Decimal::new(cents, 2), days)
}

pub fn users() -> Vec<User> {
    vec![
        User::new(1, "Ann", "ann@example.com"),
        User::new(2, "Bob", "bob@example.com"),
        User::new(3, "Cid", "cid@example.org"),
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order::new(1, 1, 1, Decimal::new(4999, 2)).purchased_at(day(10)),
        Order::new(2, 2, 2, Decimal::new(12000, 2)).purchased_at(day(11)),
        Order::new(3, 2, 3, Decimal::new(7550, 2)).purchased_at(day(12)),
        Order::new(4, 2, 5, Decimal::new(9900, 2)).purchased_at(day(13)),
        Order::new(5, 1, 4, Decimal::new(7550, 2)).purchased_at(day(14)),
    ]
}

/// A catalog holding all seed rows
pub fn seeded_catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog.tags.insert_all(tags()).unwrap();
    catalog.certificates.insert_all(certificates()).unwrap();
    catalog.users.insert_all(users()).unwrap();
    catalog.orders.insert_all(orders()).unwrap();
    catalog
}

/// Repositories over the seeded catalog with default configuration
pub fn seeded_repositories() -> Repositories {
    seeded_catalog().repositories(Arc::new(ListingConfig::default()))
}

/// Build a raw parameter map from `(key, value)` pairs
pub fn params(pairs: &[(&str, &str)]) -> RawParams {
    let mut map = RawParams::new();
    for (key, value) in pairs {
        map.entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
    map
}

/// Parse a request the way the engine would with default configuration
pub fn request(pairs: &[(&str, &str)]) -> ListingRequest {
    ListingRequest::from_params(params(pairs), &ListingConfig::default()).unwrap()
}

pub fn ids<E: Entity>(rows: &[E]) -> Vec<EntityId> {
    rows.iter().map(Entity::id).collect()
}

//! Catalog demo: seed an in-memory catalog, run a few listings and the
//! spending aggregation
//!
//! Run with `RUST_LOG=certlist=debug` to see the executed queries.

use anyhow::Result;
use certlist::prelude::*;
use certlist::telemetry::init_tracing;

fn seed(catalog: &InMemoryCatalog) -> Result<()> {
    let relax = Tag::new(1, "relax");
    let sport = Tag::new(2, "sport");
    let outdoor = Tag::new(3, "outdoor");
    catalog
        .tags
        .insert_all([relax.clone(), sport.clone(), outdoor.clone()])?;

    catalog.certificates.insert_all([
        Certificate::new(1, "Spa day", "Full day at the spa", Decimal::new(4999, 2), 30)
            .with_tags([relax.clone()]),
        Certificate::new(2, "Climbing course", "Outdoor climbing", Decimal::new(12000, 2), 60)
            .with_tags([sport.clone(), outdoor.clone()]),
        Certificate::new(3, "Kayak tour", "River kayaking", Decimal::new(7550, 2), 14)
            .with_tags([sport, outdoor.clone()]),
        Certificate::new(4, "Hiking weekend", "Mountains and a spa", Decimal::new(9900, 2), 2)
            .with_tags([outdoor, relax]),
    ])?;

    catalog.users.insert_all([
        User::new(1, "Ann", "ann@example.com"),
        User::new(2, "Bob", "bob@example.com"),
    ])?;

    catalog.orders.insert_all([
        Order::new(1, 1, 1, Decimal::new(4999, 2)),
        Order::new(2, 2, 2, Decimal::new(12000, 2)),
        Order::new(3, 2, 3, Decimal::new(7550, 2)),
        Order::new(4, 2, 4, Decimal::new(9900, 2)),
    ])?;

    Ok(())
}

fn request(pairs: &[(&str, &str)], config: &ListingConfig) -> Result<ListingRequest> {
    let params: RawParams = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
        .collect();
    Ok(ListingRequest::from_params(params, config)?)
}

fn print_certificates(title: &str, rows: &[Certificate]) {
    println!("\n{}", title);
    for c in rows {
        let tags: Vec<&str> = c.tags.iter().map(|t| t.name.as_str()).collect();
        println!("  #{} {:<16} {:>7} [{}]", c.id, c.name, c.price, tags.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("certlist=info");

    let config = Arc::new(ListingConfig::default());
    let catalog = InMemoryCatalog::new();
    seed(&catalog)?;
    let repos = catalog.repositories(Arc::clone(&config));

    let rows = repos
        .certificates
        .find_all(&request(&[("sort", "-price")], &config)?)
        .await?;
    print_certificates("All certificates, most expensive first:", &rows);

    let rows = repos
        .certificates
        .find_all(&request(&[("search", "SPA"), ("sort", "name")], &config)?)
        .await?;
    print_certificates("Search 'SPA':", &rows);

    let rows = repos
        .certificates
        .find_by_tag_id(3, &request(&[("sort", "price"), ("size", "2")], &config)?)
        .await?;
    print_certificates("Tagged 'outdoor', cheapest two:", &rows);

    let orders = repos
        .orders
        .find_by_user_id(2, &request(&[("sort", "-cost")], &config)?)
        .await?;
    println!("\nOrders of user 2:");
    for o in &orders {
        println!("  #{} certificate {} cost {}", o.id, o.certificate_id, o.cost);
    }

    match repos.tags.find_most_popular_tag_of_top_spender().await? {
        Some(tag) => println!(
            "\nMost popular tag of the top spender: {} (#{})",
            tag.name, tag.id
        ),
        None => println!("\nNo orders yet"),
    }

    Ok(())
}

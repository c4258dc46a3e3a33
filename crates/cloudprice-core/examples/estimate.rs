// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! # Cost Estimate Example
//!
//! Walks the whole dashboard flow over the bundled catalog: filter and sort,
//! summarise, build a cost estimate, export it, and evaluate budget alerts.
//! Run with:
//!
//! ```bash
//! RUST_LOG=cloudprice_core=debug cargo run --example estimate
//! ```

use cloudprice_core::{
    alerts::{self, AlertBook},
    calculator::CostEstimate,
    config::Config,
    engine::PricingEngine,
    types::{Category, Currency, FilterCriteria, SortDirection, SortField, SortSpec},
    Result,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Cloud Price Dashboard: Estimate Example\n");

    // -----------------------------------------------------------------------
    // 1. Load the bundled catalog
    // -----------------------------------------------------------------------
    let engine = PricingEngine::builtin(Config::default())?;
    println!(
        "Loaded {} services at {:.2} INR/USD\n",
        engine.catalog().len(),
        engine.catalog().exchange_rate()
    );

    // -----------------------------------------------------------------------
    // 2. Compute services, most expensive first
    // -----------------------------------------------------------------------
    let criteria = FilterCriteria {
        category: Some(Category::Compute),
        ..FilterCriteria::default()
    };
    let rows = engine.query(
        &criteria,
        Some(SortSpec::new(SortField::Price, SortDirection::Descending)),
    );
    println!("Compute services:");
    for record in &rows {
        println!(
            "  {:<32} {:<6} ₹{:>8.4}/{}",
            record.name,
            record.provider.id(),
            record.pricing.inr,
            record.pricing.unit
        );
    }

    let summary = engine.summarize(&criteria)?;
    println!(
        "  cheapest: {}  average: ₹{:.4}  median: ₹{:.4}\n",
        summary.min.name, summary.average, summary.median
    );

    // -----------------------------------------------------------------------
    // 3. Dashboard overview
    // -----------------------------------------------------------------------
    let overview = engine.dashboard()?;
    println!(
        "Starter services: {} (average ${:.4}/unit)",
        overview.starter.count, overview.starter_average_usd
    );
    for average in &overview.provider_averages {
        println!(
            "  {:<22} ₹{:.4} over {} services",
            average.provider.display_name(),
            average.average,
            average.count
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // 4. Build a cost estimate
    // -----------------------------------------------------------------------
    let mut estimate = CostEstimate::new();
    estimate.push(engine.line_item("aws-ec2-t3-micro", 2, 720)?);
    estimate.push(engine.line_item("aws-s3-standard", 100, 1)?);
    estimate.push(engine.line_item("gcp-cloud-sql-mysql", 1, 720)?);

    let total = estimate.total();
    println!("Estimate total: ${:.2} / ₹{:.2}\n", total.usd, total.inr);
    println!("{}\n", estimate.to_csv());

    // -----------------------------------------------------------------------
    // 5. Budget alerts
    // -----------------------------------------------------------------------
    let mut book = AlertBook::new();
    let monthly = book.create("Monthly Budget Alert", 10_000.0, Currency::Inr)?.id;
    let compute = book.create("Compute Costs Warning", 5_000.0, Currency::Inr)?.id;
    let storage = book.create("Storage Limit", 2_000.0, Currency::Inr)?.id;

    book.set_usage(monthly, 7_500.0)?;
    book.set_usage(compute, 5_200.0)?;
    book.set_usage(storage, 1_200.0)?;
    book.toggle(storage)?;

    println!("Alerts:");
    for alert in book.alerts() {
        println!(
            "  {:<24} {:>5.1}%  {:<8} {}",
            alert.name,
            alerts::usage_percent(alert)?,
            alerts::status(alert)?,
            if alert.is_active { "active" } else { "paused" }
        );
    }

    let counts = book.summary();
    println!(
        "\n{} alerts, {} active, {} critical, {} warning",
        counts.total, counts.active, counts.critical, counts.warning
    );

    Ok(())
}

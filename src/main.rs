// src/main.rs

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use restock::io::{reporting, synthetic};
use restock::model::records::{PackComponent, PurchaseRecord, StockRecord, TransitRecord};
use restock::{BatchInput, EngineConfig, ReplenishmentEngine};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Replenishment Forecast Demo ===");

    // 1. SETUP CONFIGURATION
    // 90 days of target coverage against a 120-day ocean lead time.
    let config = EngineConfig::default();

    let engine = match ReplenishmentEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 2. SYNTHESIZE A SMALL CATALOG
    // A steady seller, a noisy mid-mover, a slow mover, and a bundle that
    // decomposes into the steady seller.
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let days = 180;

    let mut sales = synthetic::constant_daily_sales("WIDGET-STD", start, days, 12.0, 4_500.0);
    sales.extend(synthetic::poisson_daily_sales(
        "GADGET-PRO",
        start,
        days,
        6.0,
        12_900.0,
    ));
    sales.extend(synthetic::intermittent_sales(
        "SPARE-PART",
        start,
        days,
        0.08,
        3.0,
        1_990.0,
    ));
    sales.extend(synthetic::intermittent_sales(
        "KIT-DUO",
        start,
        days,
        0.2,
        1.0,
        8_900.0,
    ));

    let stock = vec![
        StockRecord {
            sku: "WIDGET-STD".to_string(),
            total_stock: 600.0,
            description: "Standard widget".to_string(),
        },
        StockRecord {
            sku: "GADGET-PRO".to_string(),
            total_stock: 0.0,
            description: "Pro gadget".to_string(),
        },
        StockRecord {
            sku: "SPARE-PART".to_string(),
            total_stock: 40.0,
            description: "Replacement part".to_string(),
        },
    ];

    let transit = vec![TransitRecord {
        sku: "WIDGET-STD".to_string(),
        units_in_transit: 250.0,
    }];

    let purchases = vec![
        PurchaseRecord {
            sku: "WIDGET-STD".to_string(),
            date: start,
            quantity: 1_500.0,
        },
        PurchaseRecord {
            sku: "GADGET-PRO".to_string(),
            date: start,
            quantity: 400.0,
        },
    ];

    let mut packs = std::collections::HashMap::new();
    packs.insert(
        "KIT-DUO".to_string(),
        vec![PackComponent {
            component_sku: "WIDGET-STD".to_string(),
            quantity: 2.0,
        }],
    );

    let input = BatchInput {
        sales,
        stock,
        transit,
        purchases,
        packs,
        ..Default::default()
    };

    // 3. RUN THE ENGINE
    println!("Scoring catalog as of {}...", today);
    let predictions = engine.run(input, today);

    // 4. EXPORT RESULTS
    let output_file = "replenishment_suggestions.csv";
    match reporting::write_suggestions(output_file, &predictions) {
        Ok(_) => println!("Success! Suggestions written to ./{}", output_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    // 5. PRINT SUMMARY
    println!("\n=== Replenishment Suggestions ===");
    for p in &predictions {
        println!(
            "{} [{:?}{:?}] {} | demand {:.2}/day ({}) | suggest {:.0} units (${:.0})",
            p.sku, p.abc, p.xyz, p.description, p.daily_demand, p.model, p.suggested_units,
            p.total_value
        );
        for alert in &p.alerts {
            println!("    ! {}", alert);
        }
        if !p.notes.is_empty() {
            println!("    note: {}", p.notes);
        }
    }

    println!("\n{} SKU(s) need replenishment.", predictions.len());
}

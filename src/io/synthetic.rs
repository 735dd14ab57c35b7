// src/io/synthetic.rs

use chrono::NaiveDate;
use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Poisson};

use crate::model::records::SalesRecord;

/// Generates a sales history where every day moves the exact same quantity.
/// Useful for testing coverage math (the suggestion becomes predictable).
pub fn constant_daily_sales(
    sku: &str,
    start: NaiveDate,
    days: usize,
    units_per_day: f64,
    price: f64,
) -> Vec<SalesRecord> {
    (0..days)
        .map(|d| SalesRecord {
            sku: sku.to_string(),
            date: start + chrono::Duration::days(d as i64),
            units: units_per_day,
            price,
        })
        .collect()
}

/// Generates a Poisson-distributed sales history.
///
/// Demand for physical goods is a count, so Poisson is the natural noise
/// model. Days that draw zero emit no record at all: the series builder is
/// responsible for zero-filling, the same as with real transaction logs.
pub fn poisson_daily_sales(
    sku: &str,
    start: NaiveDate,
    days: usize,
    mean_units: f64,
    price: f64,
) -> Vec<SalesRecord> {
    let mut rng = thread_rng();
    let poisson = Poisson::new(mean_units).unwrap();

    let mut sales = Vec::with_capacity(days);
    for d in 0..days {
        let units: f64 = poisson.sample(&mut rng);
        if units > 0.0 {
            sales.push(SalesRecord {
                sku: sku.to_string(),
                date: start + chrono::Duration::days(d as i64),
                units,
                price,
            });
        }
    }
    sales
}

/// Generates a sparse history: each day sells `units_per_sale` with
/// probability `sale_probability`, otherwise nothing. This is the classic
/// slow-mover shape that should route to the intermittent-demand model.
pub fn intermittent_sales(
    sku: &str,
    start: NaiveDate,
    days: usize,
    sale_probability: f64,
    units_per_sale: f64,
    price: f64,
) -> Vec<SalesRecord> {
    let mut rng = thread_rng();

    let mut sales = Vec::new();
    for d in 0..days {
        if rng.gen_bool(sale_probability.clamp(0.0, 1.0)) {
            sales.push(SalesRecord {
                sku: sku.to_string(),
                date: start + chrono::Duration::days(d as i64),
                units: units_per_sale,
                price,
            });
        }
    }
    sales
}

// src/io/reporting.rs

use serde::Serialize;
use std::error::Error;
use std::path::Path;

use crate::model::prediction::Prediction;

// Flat row shape so the CSV stays one-line-per-SKU; alerts and the analysis
// window are rendered to plain text.
#[derive(Debug, Serialize)]
struct SuggestionRow {
    sku: String,
    description: String,
    daily_demand: f64,
    daily_demand_p50: f64,
    daily_demand_p75: f64,
    daily_demand_p90: f64,
    std_dev: f64,
    cv: f64,
    trend: String,
    monthly_growth_pct: f64,
    current_stock: f64,
    optimal_stock: f64,
    safety_stock: f64,
    days_of_stock: f64,
    in_transit: f64,
    suggested_units: f64,
    suggested_units_p75: f64,
    suggested_units_p90: f64,
    unit_price: f64,
    total_value: f64,
    period_start: String,
    period_end: String,
    period_days: usize,
    period_units: f64,
    abc: String,
    xyz: String,
    intermittent: bool,
    model: &'static str,
    alerts: String,
    notes: String,
}

impl From<&Prediction> for SuggestionRow {
    fn from(p: &Prediction) -> Self {
        Self {
            sku: p.sku.clone(),
            description: p.description.clone(),
            daily_demand: p.daily_demand,
            daily_demand_p50: p.daily_demand_p50,
            daily_demand_p75: p.daily_demand_p75,
            daily_demand_p90: p.daily_demand_p90,
            std_dev: p.std_dev,
            cv: p.cv,
            trend: format!("{:?}", p.trend),
            monthly_growth_pct: p.monthly_growth_pct,
            current_stock: p.current_stock,
            optimal_stock: p.optimal_stock,
            safety_stock: p.safety_stock,
            days_of_stock: p.days_of_stock,
            in_transit: p.in_transit,
            suggested_units: p.suggested_units,
            suggested_units_p75: p.suggested_units_p75,
            suggested_units_p90: p.suggested_units_p90,
            unit_price: p.unit_price,
            total_value: p.total_value,
            period_start: p.period_start.to_string(),
            period_end: p.period_end.to_string(),
            period_days: p.period_days,
            period_units: p.period_units,
            abc: format!("{:?}", p.abc),
            xyz: format!("{:?}", p.xyz),
            intermittent: p.intermittent,
            model: p.model,
            alerts: p
                .alerts
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(" | "),
            notes: p.notes.clone(),
        }
    }
}

/// Writes the suggestion list to a CSV file, one row per SKU, in the order
/// the engine produced (value-descending).
pub fn write_suggestions(file_path: &str, predictions: &[Prediction]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);
    let mut wtr = csv::Writer::from_path(path)?;

    for prediction in predictions {
        wtr.serialize(SuggestionRow::from(prediction))?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

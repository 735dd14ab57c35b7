// src/forecast/trend.rs

use crate::model::prediction::Trend;
use crate::model::records::SalesRecord;
use crate::stats::mean;
use crate::stats::regression::fit_line;

/// Significance cut for calling a slope a real trend.
const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Regression-based growth/decline detection over the cleaned transactions.
///
/// Regresses unit counts against day offsets from the first sale. A slope
/// that is significant at the 5% level classifies the SKU as growing or
/// declining; everything else, including any numerical failure, reads as
/// stable with a 0% rate. Trend detection is advisory and must never sink a
/// SKU.
///
/// Returns (trend, monthly growth rate in percent of mean demand).
pub fn analyze_trend(cleaned: &[SalesRecord]) -> (Trend, f64) {
    if cleaned.len() < 2 {
        return (Trend::Stable, 0.0);
    }

    let first_sale = match cleaned.iter().map(|s| s.date).min() {
        Some(date) => date,
        None => return (Trend::Stable, 0.0),
    };

    let points: Vec<(f64, f64)> = cleaned
        .iter()
        .map(|s| ((s.date - first_sale).num_days() as f64, s.units))
        .collect();

    let fit = match fit_line(&points) {
        Some(fit) if fit.slope.is_finite() && fit.p_value.is_finite() => fit,
        _ => return (Trend::Stable, 0.0),
    };

    if fit.p_value >= SIGNIFICANCE_LEVEL {
        return (Trend::Stable, 0.0);
    }

    let quantities: Vec<f64> = cleaned.iter().map(|s| s.units).collect();
    let mean_units = mean(&quantities);
    let monthly_rate = if mean_units > 0.0 {
        fit.slope * 30.0 / mean_units * 100.0
    } else {
        0.0
    };

    let trend = if fit.slope > 0.0 {
        Trend::Growing
    } else {
        Trend::Declining
    };

    (trend, monthly_rate)
}

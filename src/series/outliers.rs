// src/series/outliers.rs

use crate::model::records::SalesRecord;
use crate::stats::percentile;

/// Result of the IQR fence pass over one SKU's transactions.
#[derive(Debug, Clone)]
pub struct OutlierSplit {
    /// Transactions inside the fence, in input order.
    pub kept: Vec<SalesRecord>,
    /// How many transactions fell outside the fence.
    pub removed: usize,
}

/// Drops statistically anomalous transaction quantities.
///
/// Fence: [Q1 - 1.5*IQR, Q3 + 1.5*IQR] over the per-transaction unit counts.
/// Anything outside is removed outright: the day keeps a zero in the daily
/// series, nothing is redistributed or replaced. An empty input passes
/// through with zero outliers.
///
/// When the distribution is degenerate (IQR == 0) the fence collapses onto
/// the quartiles, so any value unequal to them is flagged. That is the
/// intended behavior, not an accident of the formula.
pub fn split_outliers(sales: &[SalesRecord]) -> OutlierSplit {
    if sales.is_empty() {
        return OutlierSplit {
            kept: Vec::new(),
            removed: 0,
        };
    }

    let quantities: Vec<f64> = sales.iter().map(|s| s.units).collect();
    let q1 = percentile(&quantities, 25.0);
    let q3 = percentile(&quantities, 75.0);
    let iqr = q3 - q1;

    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    let kept: Vec<SalesRecord> = sales
        .iter()
        .filter(|s| s.units >= lower && s.units <= upper)
        .cloned()
        .collect();
    let removed = sales.len() - kept.len();

    OutlierSplit { kept, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(day: u32, units: f64) -> SalesRecord {
        SalesRecord {
            sku: "SKU-1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            units,
            price: 10.0,
        }
    }

    #[test]
    fn empty_input_passes_through() {
        let split = split_outliers(&[]);
        assert!(split.kept.is_empty());
        assert_eq!(split.removed, 0);
    }

    #[test]
    fn extreme_spike_is_fenced_out() {
        let mut sales: Vec<SalesRecord> = (1..=10).map(|d| sale(d, 10.0 + d as f64)).collect();
        sales.push(sale(11, 500.0));

        let split = split_outliers(&sales);
        assert_eq!(split.removed, 1);
        assert!(split.kept.iter().all(|s| s.units < 100.0));
    }

    #[test]
    fn well_behaved_data_is_untouched() {
        let sales: Vec<SalesRecord> = (1..=12).map(|d| sale(d, 8.0 + (d % 3) as f64)).collect();
        let split = split_outliers(&sales);
        assert_eq!(split.removed, 0);
        assert_eq!(split.kept.len(), 12);
    }

    #[test]
    fn degenerate_distribution_flags_any_other_value() {
        // IQR == 0: fence collapses to the repeated value
        let mut sales: Vec<SalesRecord> = (1..=9).map(|d| sale(d, 5.0)).collect();
        sales.push(sale(10, 6.0));

        let split = split_outliers(&sales);
        assert_eq!(split.removed, 1);
        assert_eq!(split.kept.len(), 9);
        assert!(split.kept.iter().all(|s| s.units == 5.0));
    }
}

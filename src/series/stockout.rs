// src/series/stockout.rs

use crate::model::records::PurchaseRecord;
use crate::series::daily::DailySeries;
use crate::stats::mean;

/// Day-by-day reconstructed stock level over the analysis window.
///
/// Only ever used to split days into stocked vs stockout; the absolute
/// levels are an estimate and must not leak out as inventory figures.
#[derive(Debug, Clone)]
pub struct StockTimeline {
    levels: Vec<f64>,
}

impl StockTimeline {
    /// Replays purchases against observed sales across the daily grid.
    ///
    /// Recurrence: stock[t] = stock[t-1] + purchases[t] - sales[t], seeded
    /// with the first purchase quantity that lands on the grid. When no
    /// purchase falls inside the window, the seed assumes
    /// `seed_coverage_days` worth of the average observed daily demand.
    pub fn reconstruct(
        series: &DailySeries,
        purchases: &[PurchaseRecord],
        seed_coverage_days: f64,
    ) -> Self {
        let days = series.len();
        let mut purchased = vec![0.0; days];
        for purchase in purchases {
            let offset = (purchase.date - series.start).num_days();
            if offset >= 0 && (offset as usize) < days {
                purchased[offset as usize] += purchase.quantity;
            }
        }

        let seed = match purchased.iter().find(|&&q| q > 0.0) {
            Some(&first_purchase) => first_purchase,
            None => seed_coverage_days * mean(&series.values),
        };

        let mut levels = vec![0.0; days];
        if days > 0 {
            levels[0] = seed;
            for t in 1..days {
                levels[t] = levels[t - 1] + purchased[t] - series.values[t];
            }
        }

        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// True for each day the SKU had stock on the shelf.
    pub fn stocked_mask(&self) -> Vec<bool> {
        self.levels.iter().map(|&level| level > 0.0).collect()
    }

    pub fn stockout_days(&self) -> usize {
        self.levels.iter().filter(|&&level| level <= 0.0).count()
    }
}

/// Keeps only the values of days flagged true in the mask.
pub fn masked_values(series: &DailySeries, mask: &[bool]) -> Vec<f64> {
    series
        .values
        .iter()
        .zip(mask.iter())
        .filter_map(|(&value, &stocked)| if stocked { Some(value) } else { None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::SalesRecord;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn series_of(values: &[f64]) -> DailySeries {
        let sales: Vec<SalesRecord> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v > 0.0)
            .map(|(i, &v)| SalesRecord {
                sku: "SKU-1".to_string(),
                date: date(1 + i as u32),
                units: v,
                price: 1.0,
            })
            .collect();
        DailySeries::build(&sales, date(1), date(values.len() as u32))
    }

    fn purchase(day: u32, quantity: f64) -> PurchaseRecord {
        PurchaseRecord {
            sku: "SKU-1".to_string(),
            date: date(day),
            quantity,
        }
    }

    #[test]
    fn timeline_length_matches_series() {
        let series = series_of(&[1.0, 0.0, 2.0, 0.0, 1.0]);
        let timeline = StockTimeline::reconstruct(&series, &[purchase(1, 10.0)], 30.0);
        assert_eq!(timeline.len(), series.len());
    }

    #[test]
    fn recurrence_drains_and_refills() {
        // Seed 5, sell 3 on day 2, refill 4 on day 3, sell 6 on day 4
        let series = series_of(&[0.0, 3.0, 0.0, 6.0]);
        let timeline =
            StockTimeline::reconstruct(&series, &[purchase(1, 5.0), purchase(3, 4.0)], 30.0);
        assert_eq!(timeline.levels, vec![5.0, 2.0, 6.0, 0.0]);
        assert_eq!(timeline.stocked_mask(), vec![true, true, true, false]);
        assert_eq!(timeline.stockout_days(), 1);
    }

    #[test]
    fn seed_falls_back_to_average_demand_coverage() {
        // No purchase lands on the grid: seed = 30 * mean = 30 * 1.0
        let series = series_of(&[1.0, 1.0, 1.0, 1.0]);
        let timeline = StockTimeline::reconstruct(&series, &[purchase(28, 99.0)], 30.0);
        assert_eq!(timeline.levels[0], 30.0);
        assert!(timeline.stocked_mask().iter().all(|&s| s));
    }

    #[test]
    fn stockout_days_drop_out_of_the_masked_values() {
        let series = series_of(&[2.0, 2.0, 2.0, 2.0]);
        // Seed of 5 runs dry after day 3
        let timeline = StockTimeline::reconstruct(&series, &[purchase(1, 5.0)], 30.0);
        let mask = timeline.stocked_mask();
        let eligible = masked_values(&series, &mask);
        assert!(eligible.len() < series.len());
    }
}

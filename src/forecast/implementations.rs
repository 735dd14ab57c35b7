// src/forecast/implementations.rs

use crate::forecast::traits::{DemandEstimate, DemandForecaster};
use crate::stats::{mean, percentile};

/// Builds the percentile spread shared by every forecaster.
///
/// Percentiles are taken over the non-zero demand days only; zero days carry
/// no information about how big a sale is once one happens. When the series
/// never sold, all three fall back to the model's own point forecast.
fn percentile_spread(series: &[f64], daily_mean: f64) -> DemandEstimate {
    let non_zero: Vec<f64> = series.iter().copied().filter(|&v| v > 0.0).collect();

    if non_zero.is_empty() {
        return DemandEstimate {
            daily_mean,
            p50: daily_mean,
            p75: daily_mean,
            p90: daily_mean,
        };
    }

    DemandEstimate {
        daily_mean,
        p50: percentile(&non_zero, 50.0),
        p75: percentile(&non_zero, 75.0),
        p90: percentile(&non_zero, 90.0),
    }
}

// =========================================================================
// 1. EWMA (regular demand)
// =========================================================================

/// Exponentially weighted moving average over the daily series.
///
/// Recency-weighted: `s_t = alpha * x_t + (1 - alpha) * s_{t-1}`, seeded with
/// the first observation. The forecast is the smoothed value at the last day.
/// With alpha = 1.0 it degenerates to "last observed daily value".
#[derive(Debug, Clone)]
pub struct EwmaForecaster {
    alpha: f64,
}

impl EwmaForecaster {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl DemandForecaster for EwmaForecaster {
    fn label(&self) -> &'static str {
        "ewma"
    }

    fn estimate_daily_demand(&self, series: &[f64]) -> DemandEstimate {
        let mut level = match series.first() {
            Some(&first) => first,
            None => return percentile_spread(series, 0.0),
        };

        for &value in &series[1..] {
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }

        percentile_spread(series, level)
    }
}

// =========================================================================
// 2. Croston (intermittent demand)
// =========================================================================

/// Croston-style estimate for sparse demand.
///
/// Forecast = mean(non-zero demand) / mean(days between consecutive demand
/// days). A series with a single demand day has no gap to average, so the
/// interval defaults to the full series length.
#[derive(Debug, Clone)]
pub struct CrostonForecaster;

impl CrostonForecaster {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CrostonForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandForecaster for CrostonForecaster {
    fn label(&self) -> &'static str {
        "croston"
    }

    fn estimate_daily_demand(&self, series: &[f64]) -> DemandEstimate {
        let demand_days: Vec<usize> = series
            .iter()
            .enumerate()
            .filter(|(_, &v)| v > 0.0)
            .map(|(i, _)| i)
            .collect();

        if demand_days.is_empty() {
            return percentile_spread(series, 0.0);
        }

        let sizes: Vec<f64> = demand_days.iter().map(|&i| series[i]).collect();
        let mean_size = mean(&sizes);

        let mean_interval = if demand_days.len() > 1 {
            let gaps: Vec<f64> = demand_days
                .windows(2)
                .map(|pair| (pair[1] - pair[0]) as f64)
                .collect();
            mean(&gaps)
        } else {
            series.len() as f64
        };

        let forecast = if mean_interval > 0.0 {
            mean_size / mean_interval
        } else {
            mean_size
        };

        percentile_spread(series, forecast)
    }
}

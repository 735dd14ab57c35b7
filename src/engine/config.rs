// src/engine/config.rs

use thiserror::Error;

/// Tuning knobs for a full engine run. Defaults match the production
/// planning horizon: 90 days of target coverage against a 120-day ocean
/// lead time.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Days of coverage an order should leave on the shelf.
    pub desired_stock_days: u32,
    /// Door-to-door lead time of a replenishment order, in days.
    pub transit_lead_days: u32,
    /// Target probability of not stocking out during the lead time.
    pub service_level: f64,
    /// Zero-day fraction at or above which demand counts as intermittent.
    pub intermittency_threshold: f64,
    /// Smoothing factor for the EWMA forecaster. 1.0 is legal and collapses
    /// the forecast to the last observed day.
    pub ewma_alpha: f64,
    /// Cumulative value share closing the A band.
    pub abc_a_share: f64,
    /// Cumulative value share closing the B band.
    pub abc_b_share: f64,
    /// CV below this is X (upper bound exclusive).
    pub xyz_x_limit: f64,
    /// CV below this is Y (upper bound exclusive); at or above is Z.
    pub xyz_y_limit: f64,
    /// Days of average demand assumed on hand when stockout reconstruction
    /// has no purchase to seed from.
    pub seed_coverage_days: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            desired_stock_days: 90,
            transit_lead_days: 120,
            service_level: 0.95,
            intermittency_threshold: 0.5,
            ewma_alpha: 0.3,
            abc_a_share: 0.80,
            abc_b_share: 0.95,
            xyz_x_limit: 0.5,
            xyz_y_limit: 1.0,
            seed_coverage_days: 30.0,
        }
    }
}

/// The one fatal error class: a config that cannot produce meaningful
/// numbers. Everything past construction is skip-and-continue.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("service level must be inside (0, 1), got {0}")]
    ServiceLevel(f64),
    #[error("desired stock days must be positive")]
    DesiredStockDays,
    #[error("transit lead days must be positive")]
    TransitLeadDays,
    #[error("EWMA alpha must be inside (0, 1], got {0}")]
    EwmaAlpha(f64),
    #[error("intermittency threshold must be inside [0, 1], got {0}")]
    IntermittencyThreshold(f64),
    #[error("ABC cut points must satisfy 0 < a < b <= 1, got ({0}, {1})")]
    AbcCutPoints(f64, f64),
    #[error("XYZ cut points must satisfy 0 < x < y, got ({0}, {1})")]
    XyzCutPoints(f64, f64),
    #[error("seed coverage days must be positive, got {0}")]
    SeedCoverageDays(f64),
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.service_level > 0.0 && self.service_level < 1.0) {
            return Err(ConfigError::ServiceLevel(self.service_level));
        }
        if self.desired_stock_days == 0 {
            return Err(ConfigError::DesiredStockDays);
        }
        if self.transit_lead_days == 0 {
            return Err(ConfigError::TransitLeadDays);
        }
        if !(self.ewma_alpha > 0.0 && self.ewma_alpha <= 1.0) {
            return Err(ConfigError::EwmaAlpha(self.ewma_alpha));
        }
        if !(0.0..=1.0).contains(&self.intermittency_threshold) {
            return Err(ConfigError::IntermittencyThreshold(
                self.intermittency_threshold,
            ));
        }
        if !(self.abc_a_share > 0.0
            && self.abc_a_share < self.abc_b_share
            && self.abc_b_share <= 1.0)
        {
            return Err(ConfigError::AbcCutPoints(self.abc_a_share, self.abc_b_share));
        }
        if !(self.xyz_x_limit > 0.0 && self.xyz_x_limit < self.xyz_y_limit) {
            return Err(ConfigError::XyzCutPoints(self.xyz_x_limit, self.xyz_y_limit));
        }
        if self.seed_coverage_days <= 0.0 {
            return Err(ConfigError::SeedCoverageDays(self.seed_coverage_days));
        }
        Ok(())
    }
}

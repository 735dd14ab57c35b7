// src/planning/safety.rs

use crate::stats::normal::inverse_normal_cdf;

/// Sizes the variability buffer for a target service level.
///
/// # Formula
/// SS = Z(service_level) * sigma * sqrt(lead_time_days)
///
/// Z is the standard-normal quantile of the service level, sigma the
/// standard deviation of eligible daily demand. Floored at zero, so a
/// dead-flat series carries no buffer no matter how long the lead time.
pub fn safety_stock(std_dev: f64, service_level: f64, transit_lead_days: u32) -> f64 {
    let z = inverse_normal_cdf(service_level);
    let buffer = z * std_dev * (transit_lead_days as f64).sqrt();
    buffer.max(0.0)
}

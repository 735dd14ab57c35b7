// src/model/prediction.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Demand trajectory classification from the regression pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Growing,
    Stable,
    Declining,
}

/// Pareto class by annualized value share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

/// Variability class by coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum XyzClass {
    X,
    Y,
    Z,
}

/// Rule-based flags raised for a single SKU. Every matching rule emits,
/// independently of the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Alert {
    /// Coverage is below half the transit lead time.
    CriticalStockRisk { days_of_stock: f64 },
    /// Coverage exceeds twice the transit lead time.
    Overstock { days_of_stock: f64 },
    DecliningDemand,
    HighVariability { cv: f64 },
    /// On-hand stock is exactly zero right now.
    ActiveStockout,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::CriticalStockRisk { days_of_stock } => {
                write!(f, "CRITICAL: only {:.0} days of stock left", days_of_stock)
            }
            Alert::Overstock { days_of_stock } => {
                write!(f, "Overstock: {:.0} days of coverage", days_of_stock)
            }
            Alert::DecliningDemand => write!(f, "Demand is declining"),
            Alert::HighVariability { cv } => {
                write!(f, "High variability (CV={:.2})", cv)
            }
            Alert::ActiveStockout => write!(f, "Out of stock right now"),
        }
    }
}

/// The per-SKU result of a full pipeline run.
///
/// Built once per SKU; the ABC/XYZ fields are filled in by the cross-SKU
/// classification pass after the whole batch is scored, and nothing mutates
/// the record after that.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub sku: String,
    pub description: String,

    // Daily demand estimates
    pub daily_demand: f64,
    pub daily_demand_p50: f64,
    pub daily_demand_p75: f64,
    pub daily_demand_p90: f64,
    pub std_dev: f64,
    pub cv: f64,

    // Trend
    pub trend: Trend,
    pub monthly_growth_pct: f64,

    // Stock position
    pub current_stock: f64,
    pub optimal_stock: f64,
    pub safety_stock: f64,
    pub days_of_stock: f64,
    pub in_transit: f64,

    // Replenishment scenarios: normal / conservative / pessimistic
    pub suggested_units: f64,
    pub suggested_units_p75: f64,
    pub suggested_units_p90: f64,

    // Valuation
    pub unit_price: f64,
    pub total_value: f64,

    // Analysis window
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub period_days: usize,
    pub period_units: f64,

    // Cross-SKU classification (second pass)
    pub abc: AbcClass,
    pub xyz: XyzClass,

    pub intermittent: bool,
    pub model: &'static str,
    pub alerts: Vec<Alert>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_render_human_readable() {
        let alert = Alert::CriticalStockRisk { days_of_stock: 12.4 };
        assert_eq!(alert.to_string(), "CRITICAL: only 12 days of stock left");
        assert_eq!(Alert::ActiveStockout.to_string(), "Out of stock right now");
    }
}

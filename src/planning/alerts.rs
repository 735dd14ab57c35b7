// src/planning/alerts.rs

use crate::model::prediction::{Alert, Trend};

/// Threshold on the coefficient of variation above which demand is flagged
/// as hard to predict.
const HIGH_CV: f64 = 1.5;

/// Runs every alert rule against one SKU's numbers. Rules are independent;
/// all matches are emitted.
///
/// `days_of_stock` may carry the no-demand sentinel, which lands in the
/// overstock band (infinite coverage) and can never trip the critical rule.
pub fn evaluate_alerts(
    days_of_stock: f64,
    trend: Trend,
    cv: f64,
    current_stock: f64,
    transit_lead_days: u32,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let transit = transit_lead_days as f64;

    if days_of_stock < 0.5 * transit {
        alerts.push(Alert::CriticalStockRisk { days_of_stock });
    }

    if days_of_stock > 2.0 * transit {
        alerts.push(Alert::Overstock { days_of_stock });
    }

    if trend == Trend::Declining {
        alerts.push(Alert::DecliningDemand);
    }

    if cv > HIGH_CV {
        alerts.push(Alert::HighVariability { cv });
    }

    if current_stock == 0.0 {
        alerts.push(Alert::ActiveStockout);
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::replenishment::DAYS_OF_STOCK_SENTINEL;

    #[test]
    fn low_coverage_is_critical() {
        let alerts = evaluate_alerts(30.0, Trend::Stable, 0.2, 100.0, 120);
        assert_eq!(alerts, vec![Alert::CriticalStockRisk { days_of_stock: 30.0 }]);
    }

    #[test]
    fn excess_coverage_is_overstock() {
        let alerts = evaluate_alerts(300.0, Trend::Stable, 0.2, 100.0, 120);
        assert_eq!(alerts, vec![Alert::Overstock { days_of_stock: 300.0 }]);
    }

    #[test]
    fn sentinel_coverage_is_never_critical() {
        let alerts = evaluate_alerts(DAYS_OF_STOCK_SENTINEL, Trend::Stable, 0.0, 100.0, 120);
        assert!(!alerts
            .iter()
            .any(|a| matches!(a, Alert::CriticalStockRisk { .. })));
        // Infinite coverage reads as overstock instead
        assert!(alerts.iter().any(|a| matches!(a, Alert::Overstock { .. })));
    }

    #[test]
    fn independent_rules_all_fire() {
        // Zero stock, zero coverage, declining, erratic: four flags at once
        let alerts = evaluate_alerts(0.0, Trend::Declining, 2.1, 0.0, 120);
        assert_eq!(alerts.len(), 4);
        assert!(alerts.iter().any(|a| matches!(a, Alert::CriticalStockRisk { .. })));
        assert!(alerts.contains(&Alert::DecliningDemand));
        assert!(alerts.iter().any(|a| matches!(a, Alert::HighVariability { .. })));
        assert!(alerts.contains(&Alert::ActiveStockout));
    }

    #[test]
    fn healthy_position_raises_nothing() {
        let alerts = evaluate_alerts(150.0, Trend::Growing, 0.4, 800.0, 120);
        assert!(alerts.is_empty());
    }
}

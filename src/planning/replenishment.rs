// src/planning/replenishment.rs

/// Sentinel coverage for a SKU with no measurable demand. Downstream logic
/// reads it as "infinite coverage", never as a stockout signal.
pub const DAYS_OF_STOCK_SENTINEL: f64 = 999_999.0;

/// Days until the shelf runs dry at the given demand rate.
pub fn days_of_stock(current_stock: f64, daily_demand: f64) -> f64 {
    if daily_demand > 0.0 {
        current_stock / daily_demand
    } else {
        DAYS_OF_STOCK_SENTINEL
    }
}

/// One replenishment scenario: a demand rate paired with how much of the
/// safety buffer it carries.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub daily_demand: f64,
    pub safety_weight: f64,
}

/// Sizes the order suggestion for one scenario.
///
/// Target stock is the demand over the desired coverage window plus the
/// weighted safety buffer. When current coverage already outlasts the
/// transit lead time, the surplus days are netted out of the order. Units
/// already on the water are subtracted last, and the suggestion never goes
/// below zero.
pub fn suggest_quantity(
    scenario: Scenario,
    safety_stock: f64,
    current_stock: f64,
    in_transit: f64,
    desired_stock_days: u32,
    transit_lead_days: u32,
) -> f64 {
    let demand = scenario.daily_demand;
    let target = demand * desired_stock_days as f64 + scenario.safety_weight * safety_stock;

    let coverage = days_of_stock(current_stock, demand);
    let transit_days = transit_lead_days as f64;

    let mut suggestion = if coverage > transit_days {
        target - (coverage - transit_days) * demand
    } else {
        target
    };

    suggestion -= in_transit;
    suggestion.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_short_of_lead_time_orders_the_full_target() {
        // 90 days of constant demand at 10/day: 500 on hand covers 50 days,
        // under the 120-day lead time, so the suggestion is the full
        // 10 * 90 = 900.
        let scenario = Scenario {
            daily_demand: 10.0,
            safety_weight: 1.0,
        };
        let suggestion = suggest_quantity(scenario, 0.0, 500.0, 0.0, 90, 120);
        assert_eq!(suggestion, 900.0);
    }

    #[test]
    fn surplus_coverage_is_netted_out() {
        // 2000 on hand at 10/day = 200 days, 80 beyond the lead time:
        // 900 - 80*10 = 100
        let scenario = Scenario {
            daily_demand: 10.0,
            safety_weight: 1.0,
        };
        let suggestion = suggest_quantity(scenario, 0.0, 2000.0, 0.0, 90, 120);
        assert_eq!(suggestion, 100.0);
    }

    #[test]
    fn in_transit_units_reduce_and_clamp() {
        let scenario = Scenario {
            daily_demand: 10.0,
            safety_weight: 1.0,
        };
        let suggestion = suggest_quantity(scenario, 0.0, 500.0, 850.0, 90, 120);
        assert_eq!(suggestion, 50.0);

        let clamped = suggest_quantity(scenario, 0.0, 500.0, 2000.0, 90, 120);
        assert_eq!(clamped, 0.0);
    }

    #[test]
    fn zero_demand_reads_as_infinite_coverage() {
        assert_eq!(days_of_stock(500.0, 0.0), DAYS_OF_STOCK_SENTINEL);
        // With no demand, the target reduces to the weighted safety buffer
        // and the surplus term contributes nothing.
        let scenario = Scenario {
            daily_demand: 0.0,
            safety_weight: 0.5,
        };
        let suggestion = suggest_quantity(scenario, 40.0, 500.0, 0.0, 90, 120);
        assert_eq!(suggestion, 20.0);
    }

    #[test]
    fn safety_weight_scales_the_buffer_share() {
        let base = Scenario {
            daily_demand: 5.0,
            safety_weight: 1.0,
        };
        let half = Scenario {
            daily_demand: 5.0,
            safety_weight: 0.5,
        };
        let full = suggest_quantity(base, 60.0, 0.0, 0.0, 90, 120);
        let halved = suggest_quantity(half, 60.0, 0.0, 0.0, 90, 120);
        assert_eq!(full - halved, 30.0);
    }
}

// src/engine/pipeline.rs

use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use crate::engine::classify::{assign_abc, assign_xyz};
use crate::engine::config::{ConfigError, EngineConfig};
use crate::forecast::selector::{is_intermittent, select_forecaster};
use crate::forecast::trend::analyze_trend;
use crate::model::prediction::{AbcClass, Prediction, XyzClass};
use crate::model::records::{
    expand_pack_sales, PackDefinitions, PurchaseRecord, SalesRecord, StockRecord, TransitRecord,
};
use crate::planning::alerts::evaluate_alerts;
use crate::planning::replenishment::{days_of_stock, suggest_quantity, Scenario};
use crate::planning::safety::safety_stock;
use crate::series::daily::{analysis_period, DailySeries};
use crate::series::outliers::split_outliers;
use crate::series::stockout::{masked_values, StockTimeline};
use crate::stats::sample_std_dev;

/// Everything one batch run consumes. Ingestion fills this in; the engine
/// never touches a file or a database itself.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    pub sales: Vec<SalesRecord>,
    pub stock: Vec<StockRecord>,
    pub transit: Vec<TransitRecord>,
    pub purchases: Vec<PurchaseRecord>,
    pub packs: PackDefinitions,
    /// SKUs to leave out of the run entirely (discontinued lines etc).
    pub excluded_skus: HashSet<String>,
}

/// Runs the full per-SKU pipeline, then the cross-SKU classification pass.
///
/// Per-SKU scoring shares nothing mutable and fans out across threads; the
/// ABC/XYZ pass is the single join point and runs over the merged batch.
pub struct ReplenishmentEngine {
    config: EngineConfig,
}

impl ReplenishmentEngine {
    /// Validates the configuration up front. A bad config is the one fatal
    /// error; after this, problems degrade to skipped SKUs.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scores the batch and returns predictions sorted by suggested value,
    /// largest first. `today` anchors every analysis window so a run is
    /// reproducible regardless of when it executes.
    pub fn run(&self, input: BatchInput, today: NaiveDate) -> Vec<Prediction> {
        let BatchInput {
            sales,
            stock,
            transit,
            purchases,
            packs,
            excluded_skus,
        } = input;

        let sales = expand_pack_sales(sales, &packs);

        // Group per SKU in sorted order so runs (and ABC tie-breaks) are
        // deterministic.
        let mut sales_by_sku: BTreeMap<String, Vec<SalesRecord>> = BTreeMap::new();
        for sale in sales {
            sales_by_sku
                .entry(sale.sku.clone())
                .or_default()
                .push(sale);
        }

        let stock_by_sku: HashMap<&str, &StockRecord> =
            stock.iter().map(|s| (s.sku.as_str(), s)).collect();

        let mut transit_by_sku: HashMap<&str, f64> = HashMap::new();
        for record in &transit {
            *transit_by_sku.entry(record.sku.as_str()).or_insert(0.0) +=
                record.units_in_transit;
        }

        let mut purchases_by_sku: HashMap<&str, Vec<PurchaseRecord>> = HashMap::new();
        for purchase in &purchases {
            purchases_by_sku
                .entry(purchase.sku.as_str())
                .or_default()
                .push(purchase.clone());
        }

        let groups: Vec<(&String, &Vec<SalesRecord>)> = sales_by_sku
            .iter()
            .filter(|(sku, _)| !excluded_skus.contains(*sku))
            .collect();

        info!(skus = groups.len(), "scoring batch");

        // Fan out one task per SKU; collect merges per-worker results in
        // group order, so no shared accumulator exists anywhere.
        let mut predictions: Vec<Prediction> = groups
            .par_iter()
            .filter_map(|&(sku, sku_sales)| {
                self.predict_sku(
                    sku,
                    sku_sales,
                    stock_by_sku.get(sku.as_str()).copied(),
                    transit_by_sku.get(sku.as_str()).copied().unwrap_or(0.0),
                    purchases_by_sku
                        .get(sku.as_str())
                        .map(Vec::as_slice)
                        .unwrap_or(&[]),
                    today,
                )
            })
            .collect();

        // Join point: classification needs the whole batch.
        assign_abc(
            &mut predictions,
            self.config.abc_a_share,
            self.config.abc_b_share,
        );
        assign_xyz(
            &mut predictions,
            self.config.xyz_x_limit,
            self.config.xyz_y_limit,
        );

        predictions.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));

        info!(predictions = predictions.len(), "batch scored");
        predictions
    }

    /// The per-SKU pipeline. Returns `None` when the SKU should not produce
    /// a suggestion; that is a routine outcome, not an error.
    fn predict_sku(
        &self,
        sku: &str,
        sales: &[SalesRecord],
        stock: Option<&StockRecord>,
        in_transit: f64,
        purchases: &[PurchaseRecord],
        today: NaiveDate,
    ) -> Option<Prediction> {
        // 1. Fence out anomalous transactions.
        let split = split_outliers(sales);
        if split.kept.is_empty() {
            debug!(sku = %sku, "every transaction fenced as outlier, skipping");
            return None;
        }

        let current_stock = stock.map(|s| s.total_stock).unwrap_or(0.0);
        let description = stock.map(|s| s.description.clone()).unwrap_or_default();

        // 2. Build the continuous daily series over the analysis window.
        let first_sale = sales.iter().map(|s| s.date).min()?;
        let last_sale = sales.iter().map(|s| s.date).max()?;
        let (start, end) = analysis_period(first_sale, last_sale, current_stock, today);
        let series = DailySeries::build(&split.kept, start, end);

        // 3. Replay purchases to drop stockout-suppressed days from the
        //    statistics. Without purchase history every day is eligible.
        let (eligible, stockout_days) = if purchases.is_empty() {
            (series.values.clone(), 0)
        } else {
            let timeline =
                StockTimeline::reconstruct(&series, purchases, self.config.seed_coverage_days);
            let mask = timeline.stocked_mask();
            (masked_values(&series, &mask), timeline.stockout_days())
        };

        // 4. Pick and run the demand model.
        let intermittent = is_intermittent(&eligible, self.config.intermittency_threshold);
        let forecaster = select_forecaster(
            &eligible,
            self.config.intermittency_threshold,
            self.config.ewma_alpha,
        );
        let estimate = forecaster.estimate_daily_demand(&eligible);
        debug!(sku = %sku, model = forecaster.label(), "demand model selected");

        let std_dev = sample_std_dev(&eligible);
        let cv = if estimate.daily_mean > 0.0 {
            std_dev / estimate.daily_mean
        } else {
            0.0
        };

        // 5. Trend over the cleaned transactions.
        let (trend, monthly_growth_pct) = analyze_trend(&split.kept);

        // 6. Stock position and the three replenishment scenarios.
        let safety = safety_stock(
            std_dev,
            self.config.service_level,
            self.config.transit_lead_days,
        );
        let coverage = days_of_stock(current_stock, estimate.daily_mean);
        let optimal_stock =
            estimate.daily_mean * self.config.desired_stock_days as f64 + safety;

        let suggest = |daily_demand: f64, safety_weight: f64| {
            suggest_quantity(
                Scenario {
                    daily_demand,
                    safety_weight,
                },
                safety,
                current_stock,
                in_transit,
                self.config.desired_stock_days,
                self.config.transit_lead_days,
            )
        };
        let suggested_units = suggest(estimate.p50, 1.0);
        let suggested_units_p75 = suggest(estimate.p75, 0.5);
        let suggested_units_p90 = suggest(estimate.p90, 1.0);

        if suggested_units <= 0.0 {
            debug!(sku = %sku, "nothing to reorder, skipping");
            return None;
        }

        // 7. Valuation at the most recent non-zero observed price.
        let unit_price = {
            let mut dated: Vec<&SalesRecord> = sales.iter().collect();
            dated.sort_by_key(|s| s.date);
            dated
                .iter()
                .rev()
                .find(|s| s.price > 0.0)
                .map(|s| s.price)
                .unwrap_or(0.0)
        };
        let total_value = suggested_units * unit_price;

        let alerts = evaluate_alerts(
            coverage,
            trend,
            cv,
            current_stock,
            self.config.transit_lead_days,
        );

        let mut notes: Vec<String> = Vec::new();
        if split.removed > 0 {
            notes.push(format!("{} outlier transaction(s) removed", split.removed));
        }
        if stockout_days > 0 {
            notes.push(format!(
                "{} stockout day(s) excluded from statistics",
                stockout_days
            ));
        }
        if intermittent {
            notes.push("intermittent demand".to_string());
        }
        if in_transit > 0.0 {
            notes.push(format!("{:.0} units in transit", in_transit));
        }
        if series.len() < 30 {
            notes.push(format!("short history ({} days)", series.len()));
        }

        Some(Prediction {
            sku: sku.to_string(),
            description,
            daily_demand: estimate.daily_mean,
            daily_demand_p50: estimate.p50,
            daily_demand_p75: estimate.p75,
            daily_demand_p90: estimate.p90,
            std_dev,
            cv,
            trend,
            monthly_growth_pct,
            current_stock,
            optimal_stock,
            safety_stock: safety,
            days_of_stock: coverage,
            in_transit,
            suggested_units,
            suggested_units_p75,
            suggested_units_p90,
            unit_price,
            total_value,
            period_start: series.start,
            period_end: series.end(),
            period_days: series.len(),
            period_units: series.total_units(),
            abc: AbcClass::C,
            xyz: XyzClass::Z,
            intermittent,
            model: forecaster.label(),
            alerts,
            notes: notes.join(" | "),
        })
    }
}

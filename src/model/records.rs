// src/model/records.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One sales transaction as supplied by the ingestion side.
/// Quantities may still contain outliers at this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sku: String,
    pub date: NaiveDate,
    pub units: f64,
    pub price: f64,
}

/// Current on-hand stock for a SKU at the local warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub sku: String,
    pub total_stock: f64,
    #[serde(default)]
    pub description: String,
}

/// Units already ordered and on the water. Multiple rows per SKU sum up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitRecord {
    pub sku: String,
    pub units_in_transit: f64,
}

/// A historical inbound purchase. Drives the stockout reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub sku: String,
    pub date: NaiveDate,
    pub quantity: f64,
}

/// One component line of a bundle SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackComponent {
    pub component_sku: String,
    pub quantity: f64,
}

/// Map of bundle SKU -> component lines.
pub type PackDefinitions = HashMap<String, Vec<PackComponent>>;

/// Expands bundle sales into per-component sales before any analysis runs.
///
/// A sale of a bundle turns into one sale per component, units multiplied by
/// the component quantity, on the same day. The bundle price is carried
/// through unchanged for reference. Non-bundle sales pass through as-is.
pub fn expand_pack_sales(sales: Vec<SalesRecord>, packs: &PackDefinitions) -> Vec<SalesRecord> {
    if packs.is_empty() {
        return sales;
    }

    let mut expanded = Vec::with_capacity(sales.len());
    for sale in sales {
        match packs.get(&sale.sku) {
            Some(components) => {
                for component in components {
                    expanded.push(SalesRecord {
                        sku: component.component_sku.clone(),
                        date: sale.date,
                        units: sale.units * component.quantity,
                        price: sale.price,
                    });
                }
            }
            None => expanded.push(sale),
        }
    }
    expanded
}

// src/io/ingest.rs

use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::Path;

use crate::model::records::{PurchaseRecord, SalesRecord, StockRecord, TransitRecord};

fn read_records<T: DeserializeOwned>(file_path: &str) -> Result<Vec<T>, Box<dyn Error>> {
    let path = Path::new(file_path);
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Reads sales transactions from a CSV file with headers
/// `sku,date,units,price` (dates as YYYY-MM-DD).
pub fn read_sales(file_path: &str) -> Result<Vec<SalesRecord>, Box<dyn Error>> {
    read_records(file_path)
}

/// Reads current stock levels: `sku,total_stock,description`.
pub fn read_stock(file_path: &str) -> Result<Vec<StockRecord>, Box<dyn Error>> {
    read_records(file_path)
}

/// Reads in-transit quantities: `sku,units_in_transit`.
pub fn read_transit(file_path: &str) -> Result<Vec<TransitRecord>, Box<dyn Error>> {
    read_records(file_path)
}

/// Reads purchase history: `sku,date,quantity`.
pub fn read_purchases(file_path: &str) -> Result<Vec<PurchaseRecord>, Box<dyn Error>> {
    read_records(file_path)
}

// src/series/daily.rs

use chrono::NaiveDate;

use crate::model::records::SalesRecord;

/// A continuous, zero-filled daily demand series.
///
/// One entry per calendar day over [start, end], no gaps. Rebuilt fresh for
/// every run and never mutated after construction.
#[derive(Debug, Clone)]
pub struct DailySeries {
    pub start: NaiveDate,
    pub values: Vec<f64>,
}

impl DailySeries {
    /// Sums the given transactions onto the [start, end] grid. Transactions
    /// outside the window are ignored; multiple same-day transactions add up.
    pub fn build(sales: &[SalesRecord], start: NaiveDate, end: NaiveDate) -> Self {
        let days = (end - start).num_days().max(0) as usize + 1;
        let mut values = vec![0.0; days];

        for sale in sales {
            let offset = (sale.date - start).num_days();
            if offset >= 0 && (offset as usize) < days {
                values[offset as usize] += sale.units;
            }
        }

        Self { start, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn end(&self) -> NaiveDate {
        self.start + chrono::Duration::days(self.values.len() as i64 - 1)
    }

    pub fn total_units(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Decides the analysis window for one SKU.
///
/// Start is the first sale. End is the last sale when the shelf is currently
/// empty (extending further would count phantom zero-demand days), otherwise
/// whichever is later of the last sale and today.
pub fn analysis_period(
    first_sale: NaiveDate,
    last_sale: NaiveDate,
    current_stock: f64,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let end = if current_stock == 0.0 {
        last_sale
    } else {
        last_sale.max(today)
    };
    (first_sale, end)
}

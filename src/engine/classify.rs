// src/engine/classify.rs

use crate::model::prediction::{AbcClass, Prediction, XyzClass};

/// Annualized value a SKU moves at its forecast rate.
fn annual_value(prediction: &Prediction) -> f64 {
    prediction.daily_demand * prediction.unit_price * 365.0
}

/// Pareto (ABC) labeling over the whole batch.
///
/// Walks SKUs in descending annualized-value order and assigns bands by
/// cumulative share: within `a_share` of total value => A, within `b_share`
/// => B, the tail => C. The sort is stable, so equal-value SKUs keep their
/// batch order. A batch with no value at all is all C.
pub fn assign_abc(predictions: &mut [Prediction], a_share: f64, b_share: f64) {
    let total: f64 = predictions.iter().map(annual_value).sum();
    if total <= 0.0 {
        for prediction in predictions.iter_mut() {
            prediction.abc = AbcClass::C;
        }
        return;
    }

    let mut order: Vec<usize> = (0..predictions.len()).collect();
    order.sort_by(|&a, &b| {
        annual_value(&predictions[b])
            .partial_cmp(&annual_value(&predictions[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut cumulative = 0.0;
    for index in order {
        cumulative += annual_value(&predictions[index]);
        let share = cumulative / total;
        predictions[index].abc = if share <= a_share {
            AbcClass::A
        } else if share <= b_share {
            AbcClass::B
        } else {
            AbcClass::C
        };
    }
}

/// Variability (XYZ) labeling: CV under `x_limit` is X, under `y_limit` is
/// Y, everything else Z. Upper bounds are exclusive, so CV exactly at a
/// limit falls into the band above it.
pub fn assign_xyz(predictions: &mut [Prediction], x_limit: f64, y_limit: f64) {
    for prediction in predictions.iter_mut() {
        prediction.xyz = if prediction.cv < x_limit {
            XyzClass::X
        } else if prediction.cv < y_limit {
            XyzClass::Y
        } else {
            XyzClass::Z
        };
    }
}

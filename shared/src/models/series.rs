//! Cumulative series for the impact charts
//!
//! A series spreads a period total linearly across its buckets (weeks of a
//! month, months of a year). It is an accumulation curve, not measured data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::projection::ScaledImpact;
use crate::format::round_dp;
use crate::types::{ChartMetric, Period};

/// Fraction of the series maximum at which y-axis ticks are drawn
const TICK_RATIOS: [(i64, u32); 5] = [(0, 0), (25, 2), (5, 1), (75, 2), (1, 0)];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub period_label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSeries {
    pub granularity: Period,
    pub points: Vec<SeriesPoint>,
}

/// Accumulate `scaled_metric` linearly over the buckets of `granularity`.
///
/// Bucket `i` holds `scaled_metric * (i + 1) / N` rounded to three decimals,
/// so the last bucket is the full period total.
pub fn cumulative_series(scaled_metric: Decimal, granularity: Period) -> CumulativeSeries {
    let labels = granularity.bucket_labels();
    let count = labels.len() as u64;
    let buckets = Decimal::from(count);

    let points = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let step = i as u64 + 1;
            // near Decimal::MAX the product overflows; subtract the remaining share instead
            let value = scaled_metric
                .checked_mul(Decimal::from(step))
                .map(|v| v / buckets)
                .unwrap_or_else(|| {
                    scaled_metric - scaled_metric / buckets * Decimal::from(count - step)
                });
            SeriesPoint {
                period_label: (*label).to_string(),
                value: round_dp(value, 3),
            }
        })
        .collect();

    CumulativeSeries {
        granularity,
        points,
    }
}

/// Series for one chart metric of a projection, bucketed by the projection's period
pub fn metric_series(scaled: &ScaledImpact, metric: ChartMetric) -> CumulativeSeries {
    let value = match metric {
        ChartMetric::Plastic => scaled.plastic_saved_kg,
        ChartMetric::Co2 => scaled.co2_saved_kg,
    };
    cumulative_series(value, scaled.period)
}

impl CumulativeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn last_value(&self) -> Decimal {
        self.points.last().map(|p| p.value).unwrap_or(Decimal::ZERO)
    }

    pub fn max_value(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.value)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Whole-number y-axis tick labels at 0, 25, 50, 75 and 100 % of the maximum
    pub fn y_axis_ticks(&self) -> Vec<Decimal> {
        let max = self.max_value();
        TICK_RATIOS
            .iter()
            .map(|&(num, scale)| round_dp(max * Decimal::new(num, scale), 0))
            .collect()
    }
}

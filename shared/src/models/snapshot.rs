//! Immutable dashboard snapshot and its persisted form

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::impact::{BaseImpact, ImpactInput};
use super::projection::{project, ScaledImpact};
use crate::types::Period;
use crate::validation::{bean_kg_in_range, NegativeInputPolicy};

/// The state both the interactive view and the report builder read from.
///
/// A new snapshot is produced on every input change and handed out by value,
/// so a report being built keeps the figures it started with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub input: ImpactInput,
    pub base: BaseImpact,
    pub timestamp: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn new(input: ImpactInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            input,
            base: input.base_impact(),
            timestamp,
        }
    }

    pub fn project(&self, period: Period) -> ScaledImpact {
        project(&self.base, period)
    }

    pub fn yearly(&self) -> ScaledImpact {
        self.project(Period::Yearly)
    }

    /// Rebuild from persisted data.
    ///
    /// Metrics are recomputed from `beansSold`, which is zeroed when out of
    /// range like typed input; a record without a timestamp takes `now`.
    pub fn from_stored(
        stored: &StoredDashboardData,
        policy: NegativeInputPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        let beans = if bean_kg_in_range(stored.beans_sold) {
            stored.beans_sold
        } else {
            Decimal::ZERO
        };
        let input = ImpactInput::new(beans, policy);
        Self::new(input, stored.timestamp.unwrap_or(now))
    }

    pub fn to_stored(&self) -> StoredDashboardData {
        StoredDashboardData {
            beans_sold: self.base.beans_sold_kg,
            roasted_coffee: self.base.roasted_coffee_kg,
            plastic_saved: self.base.plastic_saved_kg,
            co2_saved: self.base.co2_saved_kg,
            estimated_vcu: self.base.estimated_vcu_eur,
            timestamp: Some(self.timestamp),
        }
    }
}

/// Persisted dashboard record (monthly basis), one JSON object per storage key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredDashboardData {
    pub beans_sold: Decimal,
    pub roasted_coffee: Decimal,
    pub plastic_saved: Decimal,
    pub co2_saved: Decimal,
    pub estimated_vcu: Decimal,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// The fixed record shown when nothing usable is stored
pub fn sample_dashboard_data(now: DateTime<Utc>) -> StoredDashboardData {
    StoredDashboardData {
        beans_sold: Decimal::from(1000),
        roasted_coffee: Decimal::from(1200),
        plastic_saved: Decimal::from(34),
        co2_saved: Decimal::from(800),
        estimated_vcu: Decimal::from(24),
        timestamp: Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_sample_round_trips_through_snapshot() {
        let sample = sample_dashboard_data(at(9));
        let snapshot = DashboardSnapshot::from_stored(&sample, NegativeInputPolicy::Clamp, at(10));
        assert_eq!(snapshot.timestamp, at(9));
        assert_eq!(snapshot.to_stored(), sample);
    }

    #[test]
    fn test_missing_timestamp_uses_now() {
        let mut sample = sample_dashboard_data(at(9));
        sample.timestamp = None;
        let snapshot = DashboardSnapshot::from_stored(&sample, NegativeInputPolicy::Clamp, at(10));
        assert_eq!(snapshot.timestamp, at(10));
    }

    #[test]
    fn test_out_of_range_beans_zeroed() {
        let mut stored = sample_dashboard_data(at(9));
        stored.beans_sold = Decimal::from_str("10000000000000000000000000000").unwrap();
        let snapshot = DashboardSnapshot::from_stored(&stored, NegativeInputPolicy::Clamp, at(10));
        assert_eq!(snapshot.base.beans_sold_kg, Decimal::ZERO);
        assert_eq!(snapshot.yearly().co2_saved_kg, Decimal::ZERO);
    }

    #[test]
    fn test_stored_json_shape() {
        let json = serde_json::to_value(sample_dashboard_data(at(9))).unwrap();
        assert_eq!(json["beansSold"], serde_json::json!(1000.0));
        assert_eq!(json["estimatedVcu"], serde_json::json!(24.0));
        assert_eq!(json["timestamp"], serde_json::json!("2024-03-01T09:00:00Z"));
    }

    #[test]
    fn test_parses_record_written_by_browser() {
        let json = r#"{"beansSold":60,"roastedCoffee":72,"plasticSaved":2.04,
            "co2Saved":48,"estimatedVcu":1.44,"timestamp":"2024-03-01T09:00:00.000Z"}"#;
        let stored: StoredDashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(stored.beans_sold, Decimal::from(60));
        assert_eq!(stored.timestamp, Some(at(9)));
    }
}

//! Temporal projection of base metrics onto a reporting period

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::equivalents::{equivalents_of, Equivalents};
use super::impact::BaseImpact;
use crate::format::round_dp;
use crate::types::Period;

/// Base metrics scaled to a period and rounded for display.
///
/// Bean and roasted quantities are whole kg; plastic, CO₂ and VCU value keep
/// two decimals. Always derived from a [`BaseImpact`], never re-projected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledImpact {
    pub period: Period,
    pub beans_sold_kg: Decimal,
    pub roasted_coffee_kg: Decimal,
    pub plastic_saved_kg: Decimal,
    pub co2_saved_kg: Decimal,
    pub estimated_vcu_eur: Decimal,
}

/// Scale base metrics to `period` and apply the display rounding rules
pub fn project(base: &BaseImpact, period: Period) -> ScaledImpact {
    let factor = period.scale_factor();
    ScaledImpact {
        period,
        beans_sold_kg: round_dp(base.beans_sold_kg * factor, 0),
        roasted_coffee_kg: round_dp(base.roasted_coffee_kg * factor, 0),
        plastic_saved_kg: round_dp(base.plastic_saved_kg * factor, 2),
        co2_saved_kg: round_dp(base.co2_saved_kg * factor, 2),
        estimated_vcu_eur: round_dp(base.estimated_vcu_eur * factor, 2),
    }
}

/// Average monthly figures derived from a yearly projection (yearly / 12).
///
/// Unrounded; formatting decides how many decimals to show.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverage {
    pub beans_sold_kg: Decimal,
    pub roasted_coffee_kg: Decimal,
    pub plastic_saved_kg: Decimal,
    pub co2_saved_kg: Decimal,
    pub estimated_vcu_eur: Decimal,
}

impl ScaledImpact {
    /// Real-world equivalents of this projection's own totals
    pub fn equivalents(&self) -> Equivalents {
        equivalents_of(self.co2_saved_kg, self.plastic_saved_kg)
    }

    /// Spread this projection evenly over its months
    pub fn monthly_average(&self) -> MonthlyAverage {
        let months = self.period.scale_factor();
        MonthlyAverage {
            beans_sold_kg: self.beans_sold_kg / months,
            roasted_coffee_kg: self.roasted_coffee_kg / months,
            plastic_saved_kg: self.plastic_saved_kg / months,
            co2_saved_kg: self.co2_saved_kg / months,
            estimated_vcu_eur: self.estimated_vcu_eur / months,
        }
    }
}

impl MonthlyAverage {
    pub fn equivalents(&self) -> Equivalents {
        equivalents_of(self.co2_saved_kg, self.plastic_saved_kg)
    }
}

/// Equivalents at both granularities, as shown side by side in the report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquivalentsPair {
    pub monthly: Equivalents,
    pub yearly: Equivalents,
}

/// Monthly (yearly ÷ 12) and yearly equivalents from one yearly projection
pub fn equivalents_pair(yearly: &ScaledImpact) -> EquivalentsPair {
    EquivalentsPair {
        monthly: yearly.monthly_average().equivalents(),
        yearly: yearly.equivalents(),
    }
}

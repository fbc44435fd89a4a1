//! Real-world equivalents of CO₂ and plastic savings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::round_dp;

/// Average CO₂ captured by one tree per year (kg)
pub const TREE_YEARLY_CO2_CAPTURE_KG: Decimal = Decimal::from_parts(2177, 0, 0, false, 2);
/// Average car emissions per km (kg CO₂)
pub const CAR_CO2_PER_KM_KG: Decimal = Decimal::from_parts(12, 0, 0, false, 2);
/// Weight of one 500 ml plastic water bottle (kg)
pub const PLASTIC_BOTTLE_WEIGHT_KG: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Equivalents {
    /// Trees needed to capture the CO₂ in one month (unrounded)
    pub trees: Decimal,
    /// Whole car-km
    pub car_km: Decimal,
    /// Whole plastic bottles
    pub bottles: Decimal,
}

/// Convert a CO₂/plastic pair into trees, car-km and bottles.
///
/// The tree figure uses the monthly capture rate (21.77 / 12 kg per tree).
/// The car figure keeps the dashboard's historical ×100 scaling.
pub fn equivalents_of(co2_saved_kg: Decimal, plastic_saved_kg: Decimal) -> Equivalents {
    let monthly_tree_capture = TREE_YEARLY_CO2_CAPTURE_KG / Decimal::from(12);
    Equivalents {
        trees: co2_saved_kg / monthly_tree_capture,
        car_km: round_dp(co2_saved_kg / CAR_CO2_PER_KM_KG * Decimal::ONE_HUNDRED, 0),
        bottles: round_dp(plastic_saved_kg / PLASTIC_BOTTLE_WEIGHT_KG, 0),
    }
}

/// The three methodology notes shown under every equivalents block
pub const EQUIVALENTS_NOTES: [&str; 3] = [
    "Tree equivalents based on average CO₂ capture of 21.77 kg per tree per year.",
    "Car emissions equivalents based on average CO₂ emissions of 0.12 kg per car per km.",
    "Plastic bottle equivalents based on average weight of 20g per 500ml plastic water bottle.",
];

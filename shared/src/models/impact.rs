//! Impact model: monthly bean volume to base sustainability metrics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{apply_negative_policy, coerce_bean_kg, parse_bean_kg, NegativeInputPolicy};

/// Roasted coffee produced per kg of beans sold
pub const ROAST_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
/// Plastic saved per kg of coffee (34 g bag replaced by an aluminium pail)
pub const PLASTIC_FACTOR_KG: Decimal = Decimal::from_parts(34, 0, 0, false, 3);
/// CO₂ saved per kg of coffee, air roasting vs. gas drum roasting
pub const CO2_FACTOR_KG: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
/// Price of one Verified Carbon Unit (1 tonne CO₂e)
pub const VCU_PRICE_EUR: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
pub const KG_PER_TONNE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// The single user input: kg of beans per month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImpactInput {
    pub bean_kg_per_month: Decimal,
}

impl ImpactInput {
    pub fn new(bean_kg_per_month: Decimal, policy: NegativeInputPolicy) -> Self {
        Self {
            bean_kg_per_month: apply_negative_policy(bean_kg_per_month, policy),
        }
    }

    /// Build from the raw text of the input field
    pub fn from_raw(raw: &str, policy: NegativeInputPolicy) -> Self {
        Self::new(parse_bean_kg(raw), policy)
    }

    /// Build from a host number
    pub fn from_f64(value: f64, policy: NegativeInputPolicy) -> Self {
        Self::new(coerce_bean_kg(value), policy)
    }

    pub fn base_impact(&self) -> BaseImpact {
        compute_base_impact(self.bean_kg_per_month)
    }
}

/// Base impact metrics on a monthly basis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BaseImpact {
    pub beans_sold_kg: Decimal,
    pub roasted_coffee_kg: Decimal,
    pub plastic_saved_kg: Decimal,
    pub co2_saved_kg: Decimal,
    pub estimated_vcu_eur: Decimal,
}

/// Derive the monthly base metrics from a bean quantity.
///
/// Every consumer (dashboard and report) goes through this function so the
/// figures can never diverge for the same input.
pub fn compute_base_impact(bean_kg_per_month: Decimal) -> BaseImpact {
    let co2_saved_kg = bean_kg_per_month * CO2_FACTOR_KG;
    BaseImpact {
        beans_sold_kg: bean_kg_per_month,
        roasted_coffee_kg: bean_kg_per_month * ROAST_FACTOR,
        plastic_saved_kg: bean_kg_per_month * PLASTIC_FACTOR_KG,
        co2_saved_kg,
        estimated_vcu_eur: co2_saved_kg / KG_PER_TONNE * VCU_PRICE_EUR,
    }
}

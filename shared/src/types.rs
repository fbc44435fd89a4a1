//! Common types used across the dashboard

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reporting period applied to the monthly base metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Yearly,
}

pub const WEEK_LABELS: [&str; 4] = ["Week 1", "Week 2", "Week 3", "Week 4"];

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Period {
    /// Multiplier from the monthly basis
    pub fn scale_factor(&self) -> Decimal {
        match self {
            Period::Monthly => Decimal::ONE,
            Period::Yearly => Decimal::from(12),
        }
    }

    /// Labels of the sub-period buckets used by cumulative series
    pub fn bucket_labels(&self) -> &'static [&'static str] {
        match self {
            Period::Monthly => &WEEK_LABELS,
            Period::Yearly => &MONTH_LABELS,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_labels().len()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Period::Monthly),
            "yearly" => Some(Period::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Monthly => write!(f, "Monthly Overview"),
            Period::Yearly => write!(f, "Yearly Projection"),
        }
    }
}

/// Metric plotted on the cumulative chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartMetric {
    #[default]
    Plastic,
    Co2,
}

impl ChartMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMetric::Plastic => "plastic",
            ChartMetric::Co2 => "co2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "plastic" => Some(ChartMetric::Plastic),
            "co2" => Some(ChartMetric::Co2),
            _ => None,
        }
    }

    /// Line colour used by both the dashboard and the report
    pub fn color(&self) -> &'static str {
        match self {
            ChartMetric::Plastic => "#2E7D32",
            ChartMetric::Co2 => "#1976D2",
        }
    }
}

impl std::fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartMetric::Plastic => write!(f, "Plastic Saved"),
            ChartMetric::Co2 => write!(f, "CO₂ Saved"),
        }
    }
}

/// Width assumed until the host page reports its own
pub const DEFAULT_VIEWPORT_WIDTH_PX: f64 = 1280.0;

/// Viewport information provided by the host page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH_PX)
    }
}

impl Viewport {
    pub fn new(width_px: f64) -> Self {
        Self { width_px }
    }

    pub fn is_mobile(&self, breakpoint_px: u32) -> bool {
        self.width_px <= f64::from(breakpoint_px)
    }
}

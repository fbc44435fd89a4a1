//! Interactive dashboard view model
//!
//! Everything the page needs to draw cards, equivalents and the cumulative
//! chart for the currently selected period and metric.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{format_euro, format_kg, format_number};
use crate::models::{metric_series, CumulativeSeries, DashboardSnapshot, Equivalents, ScaledImpact, EQUIVALENTS_NOTES};
use crate::types::{ChartMetric, Period, Viewport};

const MOBILE_FONT_PX: u32 = 10;
const DESKTOP_FONT_PX: u32 = 12;

/// A labelled figure on a card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    pub value: Decimal,
    pub display: String,
}

impl MetricCard {
    fn new(label: &str, value: Decimal, display: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            display,
        }
    }
}

/// Chart description handed to the charting collaborator
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub metric: ChartMetric,
    pub title: String,
    pub dataset_label: String,
    pub x_axis_title: String,
    pub color: String,
    /// "Week" or "Month", used for "Total accumulated by Week 3"
    pub bucket_noun: String,
    pub font_size_px: u32,
    pub series: CumulativeSeries,
}

impl ChartSpec {
    pub fn new(scaled: &ScaledImpact, metric: ChartMetric, font_size_px: u32) -> Self {
        let (title, x_axis_title, bucket_noun) = match scaled.period {
            Period::Monthly => ("Weekly Cumulative Impact", "Weekly Breakdown", "Week"),
            Period::Yearly => ("Monthly Cumulative Impact", "Monthly Breakdown", "Month"),
        };
        let dataset_label = match metric {
            ChartMetric::Plastic => "Cumulative Plastic Saved (kg)",
            ChartMetric::Co2 => "Cumulative CO₂ Saved (kg)",
        };
        Self {
            metric,
            title: title.to_string(),
            dataset_label: dataset_label.to_string(),
            x_axis_title: x_axis_title.to_string(),
            color: metric.color().to_string(),
            bucket_noun: bucket_noun.to_string(),
            font_size_px,
            series: metric_series(scaled, metric),
        }
    }

    /// Tooltip lines for the bucket at `index`
    pub fn tooltip(&self, index: usize) -> Option<[String; 2]> {
        let point = self.series.points.get(index)?;
        Some([
            format!("{}: {} kg", self.dataset_label, format_number(point.value)),
            format!("Total accumulated by {} {}", self.bucket_noun, index + 1),
        ])
    }
}

/// Formatted equivalents block
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EquivalentsView {
    pub values: Equivalents,
    pub cards: Vec<MetricCard>,
    pub notes: Vec<String>,
}

impl EquivalentsView {
    pub fn new(values: Equivalents) -> Self {
        Self {
            cards: vec![
                MetricCard::new("Trees Equivalent", values.trees, format_number(values.trees)),
                MetricCard::new(
                    "Car Emissions Saved (km)",
                    values.car_km,
                    format_number(values.car_km),
                ),
                MetricCard::new(
                    "Plastic Bottles Avoided",
                    values.bottles,
                    format_number(values.bottles),
                ),
            ],
            notes: EQUIVALENTS_NOTES.iter().map(|n| n.to_string()).collect(),
            values,
        }
    }
}

/// Complete view for one period/metric selection
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub period: Period,
    pub heading: String,
    pub scaled: ScaledImpact,
    pub business_cards: Vec<MetricCard>,
    pub impact_cards: Vec<MetricCard>,
    pub equivalents: EquivalentsView,
    pub chart: ChartSpec,
}

impl DashboardView {
    pub fn build(
        snapshot: &DashboardSnapshot,
        period: Period,
        metric: ChartMetric,
        viewport: Viewport,
        mobile_breakpoint_px: u32,
    ) -> Self {
        let scaled = snapshot.project(period);
        let font_size_px = if viewport.is_mobile(mobile_breakpoint_px) {
            MOBILE_FONT_PX
        } else {
            DESKTOP_FONT_PX
        };

        let business_cards = vec![
            MetricCard::new(
                "Coffee Beans Sold (kg)",
                scaled.beans_sold_kg,
                format_number(scaled.beans_sold_kg),
            ),
            MetricCard::new(
                "Roasted Coffee (kg)",
                scaled.roasted_coffee_kg,
                format_number(scaled.roasted_coffee_kg),
            ),
        ];

        let impact_cards = vec![
            MetricCard::new(
                "Plastic Saved",
                scaled.plastic_saved_kg,
                format_kg(scaled.plastic_saved_kg),
            ),
            MetricCard::new(
                "CO₂ Saved",
                scaled.co2_saved_kg,
                format_kg(scaled.co2_saved_kg),
            ),
            MetricCard::new(
                "Estimated VCU",
                scaled.estimated_vcu_eur,
                format_euro(scaled.estimated_vcu_eur),
            ),
        ];

        Self {
            period,
            heading: period.to_string(),
            equivalents: EquivalentsView::new(scaled.equivalents()),
            chart: ChartSpec::new(&scaled, metric, font_size_px),
            business_cards,
            impact_cards,
            scaled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImpactInput;
    use crate::validation::NegativeInputPolicy;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot(beans: f64) -> DashboardSnapshot {
        DashboardSnapshot::new(
            ImpactInput::from_f64(beans, NegativeInputPolicy::Clamp),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_monthly_view() {
        let view = DashboardView::build(
            &snapshot(60.0),
            Period::Monthly,
            ChartMetric::Plastic,
            Viewport::new(1280.0),
            768,
        );
        assert_eq!(view.heading, "Monthly Overview");
        assert_eq!(view.business_cards[0].display, "60.00");
        assert_eq!(view.impact_cards[0].display, "2.04 kg");
        assert_eq!(view.impact_cards[2].display, "€1.44");
        assert_eq!(view.chart.title, "Weekly Cumulative Impact");
        assert_eq!(view.chart.series.len(), 4);
        assert_eq!(view.chart.series.last_value(), dec("2.04"));
        assert_eq!(view.chart.font_size_px, 12);
    }

    #[test]
    fn test_yearly_co2_view_on_mobile() {
        let view = DashboardView::build(
            &snapshot(60.0),
            Period::Yearly,
            ChartMetric::Co2,
            Viewport::new(375.0),
            768,
        );
        assert_eq!(view.heading, "Yearly Projection");
        assert_eq!(view.chart.dataset_label, "Cumulative CO₂ Saved (kg)");
        assert_eq!(view.chart.x_axis_title, "Monthly Breakdown");
        assert_eq!(view.chart.color, "#1976D2");
        assert_eq!(view.chart.series.len(), 12);
        assert_eq!(view.chart.series.last_value(), dec("576"));
        assert_eq!(view.chart.font_size_px, 10);
        assert_eq!(view.equivalents.values.car_km, dec("480000"));
        assert_eq!(view.equivalents.cards[1].display, "480,000");
    }

    #[test]
    fn test_tooltip() {
        let view = DashboardView::build(
            &snapshot(60.0),
            Period::Monthly,
            ChartMetric::Plastic,
            Viewport::default(),
            768,
        );
        let lines = view.chart.tooltip(2).unwrap();
        assert_eq!(lines[0], "Cumulative Plastic Saved (kg): 1.53 kg");
        assert_eq!(lines[1], "Total accumulated by Week 3");
        assert!(view.chart.tooltip(4).is_none());
    }

    #[test]
    fn test_zero_input_displays_zeros() {
        let view = DashboardView::build(
            &snapshot(0.0),
            Period::Yearly,
            ChartMetric::Plastic,
            Viewport::default(),
            768,
        );
        assert!(view.impact_cards.iter().all(|c| c.display.contains('0')));
        assert_eq!(view.equivalents.cards[0].display, "0");
    }
}

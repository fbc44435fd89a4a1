//! Printable sustainability report
//!
//! The report is a data tree, always on the yearly basis regardless of the
//! dashboard's selected period. Layout and PDF encoding belong to the
//! rendering collaborator behind [`ReportRenderer`].

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ImpactError, ImpactResult};
use crate::format::{format_euro, format_kg, format_number};
use crate::models::{
    cumulative_series, equivalents_pair, CumulativeSeries, DashboardSnapshot, EquivalentsPair,
    MonthlyAverage, ScaledImpact, EQUIVALENTS_NOTES,
};
use crate::types::{ChartMetric, Period};

const BRAND: &str = "OLOR air-roasted in berlin";

/// Turns a report data tree into downloadable bytes
pub trait ReportRenderer {
    fn render(&self, document: &ReportDocument) -> ImpactResult<Vec<u8>>;
}

/// Monthly-average / yearly-total pair for one metric
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetric {
    pub label: String,
    pub monthly_average: Decimal,
    pub yearly_total: Decimal,
    pub monthly_display: String,
    pub yearly_display: String,
}

impl ReportMetric {
    fn kg(label: &str, monthly_average: Decimal, yearly_total: Decimal) -> Self {
        Self {
            label: format!("{} - Monthly Average", label),
            monthly_average,
            yearly_total,
            monthly_display: format_kg(monthly_average),
            yearly_display: format!("{} kg total yearly", format_number(yearly_total)),
        }
    }

    fn euro(label: &str, monthly_average: Decimal, yearly_total: Decimal) -> Self {
        Self {
            label: format!("{} - Monthly Average", label),
            monthly_average,
            yearly_total,
            monthly_display: format_euro(monthly_average),
            yearly_display: format!("{} total yearly", format_euro(yearly_total)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewPage {
    pub title: String,
    pub generated_on: String,
    pub business: Vec<ReportMetric>,
    pub environmental: Vec<ReportMetric>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPage {
    pub metric: ChartMetric,
    pub title: String,
    pub analysis_title: String,
    pub analysis: Vec<String>,
    pub series: CumulativeSeries,
    pub y_axis_ticks: Vec<Decimal>,
    pub legend: String,
    pub color: String,
    pub total: Decimal,
    pub total_display: String,
    pub total_caption: String,
    pub methodology_title: String,
    pub methodology: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentsPage {
    pub title: String,
    pub equivalents: EquivalentsPair,
    pub monthly_display: Vec<(String, String)>,
    pub yearly_display: Vec<(String, String)>,
    pub notes: Vec<String>,
    pub achievements: Vec<String>,
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportPage {
    BusinessOverview(OverviewPage),
    PlasticChart(ChartPage),
    Co2Chart(ChartPage),
    EquivalentsSummary(EquivalentsPage),
}

/// Four-page report built from one snapshot
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub snapshot: DashboardSnapshot,
    pub yearly: ScaledImpact,
    pub monthly_average: MonthlyAverage,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    pub fn build(snapshot: &DashboardSnapshot, generated_at: DateTime<Utc>, file_name: &str) -> Self {
        let yearly = snapshot.project(Period::Yearly);
        let monthly = yearly.monthly_average();
        let equivalents = equivalents_pair(&yearly);

        let pages = vec![
            ReportPage::BusinessOverview(overview_page(&yearly, &monthly, generated_at)),
            ReportPage::PlasticChart(plastic_page(&yearly, &monthly)),
            ReportPage::Co2Chart(co2_page(&yearly)),
            ReportPage::EquivalentsSummary(equivalents_page(&yearly, equivalents, generated_at)),
        ];

        Self {
            file_name: file_name.to_string(),
            generated_at,
            snapshot: *snapshot,
            yearly,
            monthly_average: monthly,
            pages,
        }
    }

    pub fn to_json(&self) -> ImpactResult<String> {
        serde_json::to_string(self).map_err(|e| ImpactError::ReportGeneration(e.to_string()))
    }

    pub fn chart_page(&self, metric: ChartMetric) -> Option<&ChartPage> {
        self.pages.iter().find_map(|page| match (page, metric) {
            (ReportPage::PlasticChart(p), ChartMetric::Plastic) => Some(p),
            (ReportPage::Co2Chart(p), ChartMetric::Co2) => Some(p),
            _ => None,
        })
    }
}

fn overview_page(yearly: &ScaledImpact, monthly: &MonthlyAverage, generated_at: DateTime<Utc>) -> OverviewPage {
    OverviewPage {
        title: "Sustainability Impact Report".to_string(),
        generated_on: format!("Generated on {}", generated_at.format("%-m/%-d/%Y")),
        business: vec![
            ReportMetric::kg("Coffee Beans", monthly.beans_sold_kg, yearly.beans_sold_kg),
            ReportMetric::kg("Roasted Coffee", monthly.roasted_coffee_kg, yearly.roasted_coffee_kg),
        ],
        environmental: vec![
            ReportMetric::kg("CO₂ Saved", monthly.co2_saved_kg, yearly.co2_saved_kg),
            ReportMetric::kg("Plastic Saved", monthly.plastic_saved_kg, yearly.plastic_saved_kg),
            ReportMetric::euro("VCU Value", monthly.estimated_vcu_eur, yearly.estimated_vcu_eur),
        ],
    }
}

fn chart_page(
    metric: ChartMetric,
    total: Decimal,
    analysis_title: &str,
    analysis: Vec<String>,
    methodology_title: &str,
    methodology: Vec<String>,
) -> ChartPage {
    let series = cumulative_series(total, Period::Yearly);
    ChartPage {
        metric,
        title: format!("Yearly Cumulative {}", metric),
        analysis_title: analysis_title.to_string(),
        analysis,
        y_axis_ticks: series.y_axis_ticks(),
        series,
        legend: format!("{} (kg)", metric),
        color: metric.color().to_string(),
        total,
        total_display: format!("Total: {}", format_kg(total)),
        total_caption: format!("{} per Year", metric),
        methodology_title: methodology_title.to_string(),
        methodology,
    }
}

fn plastic_page(yearly: &ScaledImpact, monthly: &MonthlyAverage) -> ChartPage {
    chart_page(
        ChartMetric::Plastic,
        yearly.plastic_saved_kg,
        "Business Projection Analysis",
        vec![
            format!(
                "By choosing our coffee, you would be saving {} kg of plastic per month, totaling {} kg per year.",
                format_number(monthly.plastic_saved_kg),
                format_number(yearly.plastic_saved_kg)
            ),
            "Each kg of roasted coffee saves 34g of plastic through our aluminum pail packaging instead of plastic bags".to_string(),
        ],
        "How We Calculate Plastic Savings:",
        vec![
            format!(
                "Packaging savings: {} kg coffee × 34g = {} kg plastic saved",
                format_number(yearly.beans_sold_kg),
                format_number(yearly.plastic_saved_kg)
            ),
            format!(
                "Total plastic saved: {} kg through sustainable packaging",
                format_number(yearly.plastic_saved_kg)
            ),
        ],
    )
}

fn co2_page(yearly: &ScaledImpact) -> ChartPage {
    chart_page(
        ChartMetric::Co2,
        yearly.co2_saved_kg,
        "Environmental Impact Analysis",
        vec![
            "This chart shows the cumulative CO₂ savings throughout the year, demonstrating the environmental impact of our sustainable production methods and eco-friendly materials compared to traditional industrial processes.".to_string(),
        ],
        "Air Roasting Efficiency:",
        vec![
            "Traditional drum roasting: 1.2 kg CO₂ per kg of coffee".to_string(),
            "Our air roasting method: 0.4 kg CO₂ per kg of coffee".to_string(),
            format!(
                "Calculation: {} kg × 0.8 kg CO₂/kg = {} kg CO₂ saved",
                format_number(yearly.beans_sold_kg),
                format_number(yearly.co2_saved_kg)
            ),
            "Our methods reduce energy consumption by 33% in roasting".to_string(),
            format!(
                "Total CO₂ savings: {} kg through sustainable air roasting methods",
                format_number(yearly.co2_saved_kg)
            ),
        ],
    )
}

fn equivalents_page(
    yearly: &ScaledImpact,
    equivalents: EquivalentsPair,
    generated_at: DateTime<Utc>,
) -> EquivalentsPage {
    let display = |eq: &crate::models::Equivalents, per: &str| {
        vec![
            (format!("Trees Equivalent {}", per), format_number(eq.trees)),
            (format!("Car Emissions Saved {}", per), format!("{} km", format_number(eq.car_km))),
            (format!("Plastic Bottles Avoided {}", per), format_number(eq.bottles)),
        ]
    };

    EquivalentsPage {
        title: "Environmental Impact Equivalents".to_string(),
        monthly_display: display(&equivalents.monthly, "per month"),
        yearly_display: display(&equivalents.yearly, "per year"),
        notes: EQUIVALENTS_NOTES.iter().map(|n| n.to_string()).collect(),
        achievements: vec![
            format!("Saved {} kg of CO₂ emissions", format_number(yearly.co2_saved_kg)),
            format!("Prevented {} kg of plastic waste", format_number(yearly.plastic_saved_kg)),
            format!("Generated {} in VCU value", format_euro(yearly.estimated_vcu_eur)),
            format!("Equivalent to {} trees planted", format_number(equivalents.yearly.trees)),
        ],
        footer: vec![
            format!("This report was generated by {} Sustainability Impact Simulator", BRAND),
            format!("{} - Sustainable coffee solutions for a better planet.", BRAND),
            format!("© {} {}. All rights reserved.", generated_at.year(), BRAND),
        ],
        equivalents,
    }
}

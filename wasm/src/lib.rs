//! WebAssembly module for the Sustainability Impact Dashboard
//!
//! Provides client-side:
//! - The dashboard session (input, period and chart selection, persisted state)
//! - Report building and the download lifecycle
//! - Stateless impact calculations and number formatting

pub mod error;
pub mod logging;
pub mod renderer;
pub mod storage;

use chrono::Utc;
use wasm_bindgen::prelude::*;

use shared::format::format_number_f64;
use shared::session::DashboardSession;
use shared::storage::LoadOrigin;
use shared::{ChartMetric, DashboardConfig, ImpactError, Period};

use crate::error::{json_error, to_js_error};
use crate::renderer::JsReportRenderer;
use crate::storage::LocalStorageStore;

// Re-export shared types for use from Rust consumers
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    logging::init_logging(None);
}

/// Replace the default log filter, e.g. `"shared=debug"`
#[wasm_bindgen]
pub fn set_log_filter(directive: &str) {
    logging::init_logging(Some(directive));
}

fn parse_period(value: &str) -> Result<Period, JsValue> {
    Period::from_str(value)
        .ok_or_else(|| to_js_error(ImpactError::Configuration(format!("unknown period '{}'", value))))
}

fn parse_metric(value: &str) -> Result<ChartMetric, JsValue> {
    ChartMetric::from_str(value)
        .ok_or_else(|| to_js_error(ImpactError::Configuration(format!("unknown chart metric '{}'", value))))
}

/// Dashboard state for one page
#[wasm_bindgen]
pub struct ImpactDashboard {
    session: DashboardSession<LocalStorageStore>,
}

#[wasm_bindgen]
impl ImpactDashboard {
    /// Restore the dashboard from `localStorage`.
    ///
    /// `config_json` holds optional overrides of the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ImpactDashboard, JsValue> {
        let config = DashboardConfig::load(config_json.as_deref()).map_err(to_js_error)?;
        let session = DashboardSession::restore(config, LocalStorageStore::open(), Utc::now());
        Ok(ImpactDashboard { session })
    }

    /// Text to show in the bean field
    #[wasm_bindgen(getter)]
    pub fn input_text(&self) -> String {
        self.session.input_text().to_string()
    }

    /// True when the figures come from the built-in sample
    #[wasm_bindgen(getter)]
    pub fn is_sample(&self) -> bool {
        self.session.origin() == LoadOrigin::Sample
    }

    #[wasm_bindgen(getter)]
    pub fn period(&self) -> String {
        self.session.period().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn metric(&self) -> String {
        self.session.metric().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn report_file_name(&self) -> String {
        self.session.config().report.file_name.clone()
    }

    /// Apply the raw text of the bean field; returns the new snapshot as JSON
    pub fn set_bean_kg(&mut self, raw: &str) -> Result<String, JsValue> {
        let snapshot = self.session.set_bean_input(raw, Utc::now());
        serde_json::to_string(&snapshot).map_err(json_error)
    }

    pub fn select_period(&mut self, period: &str) -> Result<(), JsValue> {
        self.session.select_period(parse_period(period)?);
        Ok(())
    }

    pub fn select_metric(&mut self, metric: &str) -> Result<(), JsValue> {
        self.session.select_metric(parse_metric(metric)?);
        Ok(())
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        self.session.set_viewport_width(width_px);
    }

    /// Everything the page renders for the current selection
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.view()).map_err(json_error)
    }

    /// Start a report build; the ticket carries the document to lay out
    pub fn begin_report(&mut self) -> Result<String, JsValue> {
        let ticket = self.session.begin_report(Utc::now()).map_err(to_js_error)?;
        serde_json::to_string(&ticket).map_err(json_error)
    }

    pub fn report_rendered(&mut self, build_id: u32) -> Result<(), JsValue> {
        self.session
            .report_rendered(build_id, Utc::now())
            .map_err(to_js_error)
    }

    pub fn report_failed(&mut self, build_id: u32, reason: &str) -> Result<(), JsValue> {
        self.session.report_failed(build_id, reason).map_err(to_js_error)
    }

    pub fn report_delivered(&mut self, build_id: u32) -> Result<(), JsValue> {
        self.session.report_delivered(build_id).map_err(to_js_error)
    }

    /// Document of the finished report, if one is waiting for download
    pub fn ready_report_json(&self) -> Result<Option<String>, JsValue> {
        self.session
            .ready_report()
            .map(|document| document.to_json().map_err(to_js_error))
            .transpose()
    }

    /// Lifecycle status; also expires a build that ran past the timeout
    pub fn poll_report(&mut self) -> Result<String, JsValue> {
        let status = self.session.poll_report(Utc::now());
        serde_json::to_string(&status).map_err(json_error)
    }

    /// Build, render through `render_fn` and mark the report delivered.
    ///
    /// `render_fn(documentJson)` must return the file bytes.
    pub fn generate_report(&mut self, render_fn: js_sys::Function) -> Result<Vec<u8>, JsValue> {
        let renderer = JsReportRenderer::new(render_fn);
        let rendered = self
            .session
            .generate_report(&renderer, Utc::now())
            .map_err(to_js_error)?;
        self.session
            .report_delivered(rendered.build_id)
            .map_err(to_js_error)?;

        tracing::info!(
            build_id = rendered.build_id,
            bytes = rendered.bytes.len(),
            file_name = %rendered.file_name,
            "Report generated"
        );
        Ok(rendered.bytes)
    }
}

/// Base impact of a monthly bean quantity, as JSON
#[wasm_bindgen]
pub fn compute_base_impact(bean_kg_per_month: f64) -> Result<String, JsValue> {
    let input = ImpactInput::from_f64(bean_kg_per_month, Default::default());
    serde_json::to_string(&input.base_impact()).map_err(json_error)
}

/// Projection of a monthly bean quantity to `period`, as JSON
#[wasm_bindgen]
pub fn project_impact(bean_kg_per_month: f64, period: &str) -> Result<String, JsValue> {
    let period = parse_period(period)?;
    let input = ImpactInput::from_f64(bean_kg_per_month, Default::default());
    serde_json::to_string(&project(&input.base_impact(), period)).map_err(json_error)
}

/// Cumulative chart series for an already scaled total, as JSON
#[wasm_bindgen]
pub fn cumulative_series_json(scaled_metric: f64, period: &str) -> Result<String, JsValue> {
    let period = parse_period(period)?;
    let total = shared::coerce_finite(scaled_metric);
    serde_json::to_string(&cumulative_series(total, period)).map_err(json_error)
}

/// Display formatting used across the dashboard
#[wasm_bindgen]
pub fn format_number(value: f64) -> String {
    format_number_f64(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_base_impact_json() {
        let json: serde_json::Value =
            serde_json::from_str(&compute_base_impact(60.0).unwrap()).unwrap();
        assert_eq!(json["co2SavedKg"], serde_json::json!(48.0));
        assert_eq!(json["plasticSavedKg"], serde_json::json!(2.04));
    }

    #[test]
    fn test_non_finite_input_is_zero() {
        let json: serde_json::Value =
            serde_json::from_str(&compute_base_impact(f64::NAN).unwrap()).unwrap();
        assert_eq!(json["co2SavedKg"], serde_json::json!(0.0));
    }

    #[test]
    fn test_project_impact_yearly() {
        let json: serde_json::Value =
            serde_json::from_str(&project_impact(60.0, "yearly").unwrap()).unwrap();
        assert_eq!(json["beansSoldKg"], serde_json::json!(720.0));
        assert_eq!(json["co2SavedKg"], serde_json::json!(576.0));
    }

    #[test]
    fn test_cumulative_series_json() {
        let json: serde_json::Value =
            serde_json::from_str(&cumulative_series_json(2.04, "monthly").unwrap()).unwrap();
        let values: Vec<f64> = json["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["value"].as_f64().unwrap())
            .collect();
        assert_eq!(values, vec![0.51, 1.02, 1.53, 2.04]);
    }

    #[test]
    fn test_cumulative_series_json_keeps_large_totals() {
        let json: serde_json::Value =
            serde_json::from_str(&cumulative_series_json(4e15, "monthly").unwrap()).unwrap();
        assert_eq!(json["points"][3]["value"], serde_json::json!(4e15));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.5), "1,235");
        assert_eq!(format_number(48.0), "48.00");
        assert_eq!(format_number(f64::INFINITY), "0");
    }
}

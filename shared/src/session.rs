//! Dashboard session controller
//!
//! Owns the one piece of mutable state (the current snapshot) and the report
//! lifecycle. Consumers receive snapshots and views by value.

use chrono::{DateTime, Utc};

use crate::config::DashboardConfig;
use crate::dashboard::DashboardView;
use crate::error::ImpactResult;
use crate::lifecycle::{RenderedReport, ReportJob, ReportStatus, ReportTicket};
use crate::models::{DashboardSnapshot, ImpactInput};
use crate::report::{ReportDocument, ReportRenderer};
use crate::storage::{load_dashboard_data, save_dashboard_data, KeyValueStore, LoadOrigin};
use crate::types::{ChartMetric, Period, Viewport};

pub struct DashboardSession<S: KeyValueStore> {
    config: DashboardConfig,
    store: S,
    input_text: String,
    snapshot: DashboardSnapshot,
    origin: LoadOrigin,
    period: Period,
    metric: ChartMetric,
    viewport: Viewport,
    report: ReportJob,
}

impl<S: KeyValueStore> DashboardSession<S> {
    /// Re-hydrate from storage, or from the sample record when nothing usable is stored
    pub fn restore(config: DashboardConfig, store: S, now: DateTime<Utc>) -> Self {
        let (stored, origin) = load_dashboard_data(&store, &config.storage.key, now);
        let snapshot =
            DashboardSnapshot::from_stored(&stored, config.input.negative_policy, now);
        let report = ReportJob::new(config.report.timeout_ms);

        tracing::debug!(
            beans_kg = %snapshot.base.beans_sold_kg,
            ?origin,
            "Dashboard session restored"
        );

        Self {
            input_text: snapshot.input.bean_kg_per_month.normalize().to_string(),
            config,
            store,
            snapshot,
            origin,
            period: Period::default(),
            metric: ChartMetric::default(),
            viewport: Viewport::default(),
            report,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn metric(&self) -> ChartMetric {
        self.metric
    }

    /// Current snapshot, by value
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot
    }

    /// Apply an edit of the bean field.
    ///
    /// Recomputes the snapshot, persists it, discards any finished report and
    /// supersedes an in-flight one, so no download can carry the previous figures.
    pub fn set_bean_input(&mut self, raw: &str, now: DateTime<Utc>) -> DashboardSnapshot {
        let input = ImpactInput::from_raw(raw, self.config.input.negative_policy);
        self.input_text = raw.to_string();
        self.snapshot = DashboardSnapshot::new(input, now);
        self.origin = LoadOrigin::Stored;

        tracing::debug!(
            raw,
            beans_kg = %input.bean_kg_per_month,
            "Bean input changed"
        );

        if let Err(err) = save_dashboard_data(
            &mut self.store,
            &self.config.storage.key,
            &self.snapshot.to_stored(),
        ) {
            tracing::warn!(error = %err, "Failed to persist dashboard data");
        }

        self.report.invalidate();
        self.snapshot
    }

    pub fn select_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn select_metric(&mut self, metric: ChartMetric) {
        self.metric = metric;
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        self.viewport = Viewport::new(width_px);
    }

    /// View for the current period and chart metric
    pub fn view(&self) -> DashboardView {
        DashboardView::build(
            &self.snapshot,
            self.period,
            self.metric,
            self.viewport,
            self.config.display.mobile_breakpoint_px,
        )
    }

    /// Phase one of a download: snapshot the data tree for the renderer
    pub fn begin_report(&mut self, now: DateTime<Utc>) -> ImpactResult<ReportTicket> {
        self.report
            .start(self.snapshot, now, &self.config.report.file_name)
    }

    pub fn report_rendered(&mut self, build_id: u32, now: DateTime<Utc>) -> ImpactResult<()> {
        self.report.complete(build_id, now)
    }

    pub fn report_failed(&mut self, build_id: u32, reason: &str) -> ImpactResult<()> {
        self.report.fail(build_id, reason)
    }

    pub fn report_delivered(&mut self, build_id: u32) -> ImpactResult<()> {
        self.report.deliver(build_id)
    }

    pub fn ready_report(&self) -> Option<&ReportDocument> {
        self.report.ready_document()
    }

    /// Evaluate the build timeout and report the lifecycle state
    pub fn poll_report(&mut self, now: DateTime<Utc>) -> ReportStatus {
        self.report.check_timeout(now);
        self.report.status()
    }

    /// Build and render synchronously through `renderer`
    pub fn generate_report<R: ReportRenderer + ?Sized>(
        &mut self,
        renderer: &R,
        now: DateTime<Utc>,
    ) -> ImpactResult<RenderedReport> {
        self.report
            .generate(self.snapshot, renderer, now, &self.config.report.file_name)
    }
}

//! Report generation lifecycle
//!
//! ```text
//! Idle ──start──▶ Building ──complete──▶ Ready ──deliver──▶ Delivered
//!                    │  └──fail──▶ Failed
//!                    └──timeout──▶ TimedOut
//! ```
//!
//! A build owns the document it was started with. An input change discards
//! finished reports and marks an in-flight build superseded: its document is
//! never rewritten, and it can no longer become ready.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{ImpactError, ImpactResult};
use crate::models::DashboardSnapshot;
use crate::report::{ReportDocument, ReportRenderer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportState {
    Idle,
    Building {
        build_id: u32,
        started_at: DateTime<Utc>,
        document: Box<ReportDocument>,
        /// The input changed after this build started
        superseded: bool,
    },
    Ready {
        build_id: u32,
        document: Box<ReportDocument>,
    },
    Delivered {
        build_id: u32,
    },
    Failed {
        build_id: u32,
        reason: String,
    },
    TimedOut {
        build_id: u32,
    },
}

impl ReportState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportState::Idle => "idle",
            ReportState::Building { .. } => "building",
            ReportState::Ready { .. } => "ready",
            ReportState::Delivered { .. } => "delivered",
            ReportState::Failed { .. } => "failed",
            ReportState::TimedOut { .. } => "timed_out",
        }
    }

    pub fn build_id(&self) -> Option<u32> {
        match self {
            ReportState::Idle => None,
            ReportState::Building { build_id, .. }
            | ReportState::Ready { build_id, .. }
            | ReportState::Delivered { build_id }
            | ReportState::Failed { build_id, .. }
            | ReportState::TimedOut { build_id } => Some(*build_id),
        }
    }
}

/// Host-facing summary of the lifecycle
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatus {
    pub state: String,
    pub build_id: Option<u32>,
    /// True while the download trigger should stay disabled
    pub in_progress: bool,
    pub error: Option<String>,
}

/// Handed to the host when a build starts
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportTicket {
    pub build_id: u32,
    pub file_name: String,
    pub document: ReportDocument,
}

/// Output of a synchronous build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub build_id: u32,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Drives a single report download at a time
#[derive(Debug, Clone)]
pub struct ReportJob {
    state: ReportState,
    last_build_id: u32,
    timeout: Duration,
}

impl ReportJob {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            state: ReportState::Idle,
            last_build_id: 0,
            timeout: Duration::milliseconds(timeout_ms as i64),
        }
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn status(&self) -> ReportStatus {
        ReportStatus {
            state: self.state.as_str().to_string(),
            build_id: self.state.build_id(),
            in_progress: matches!(self.state, ReportState::Building { .. }),
            error: match &self.state {
                ReportState::Failed { reason, .. } => Some(reason.clone()),
                ReportState::TimedOut { .. } => Some(ImpactError::ReportTimedOut.to_string()),
                _ => None,
            },
        }
    }

    /// Document of a finished, undelivered build
    pub fn ready_document(&self) -> Option<&ReportDocument> {
        match &self.state {
            ReportState::Ready { document, .. } => Some(document.as_ref()),
            _ => None,
        }
    }

    fn is_expired(&self, started_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - started_at >= self.timeout
    }

    /// Expire a stuck build. Returns true when a build was discarded.
    pub fn check_timeout(&mut self, now: DateTime<Utc>) -> bool {
        if let ReportState::Building {
            build_id,
            started_at,
            ..
        } = self.state
        {
            if self.is_expired(started_at, now) {
                tracing::warn!(build_id, "Report build timed out, discarding");
                self.state = ReportState::TimedOut { build_id };
                return true;
            }
        }
        false
    }

    /// Start a build from `snapshot`, taken by value
    pub fn start(
        &mut self,
        snapshot: DashboardSnapshot,
        now: DateTime<Utc>,
        file_name: &str,
    ) -> ImpactResult<ReportTicket> {
        self.check_timeout(now);
        if let ReportState::Building {
            superseded: false, ..
        } = self.state
        {
            return Err(ImpactError::ReportInProgress);
        }

        self.last_build_id = self.last_build_id.wrapping_add(1);
        let build_id = self.last_build_id;
        let document = ReportDocument::build(&snapshot, now, file_name);

        tracing::debug!(build_id, from = self.state.as_str(), "Report build started");
        self.state = ReportState::Building {
            build_id,
            started_at: now,
            document: Box::new(document.clone()),
            superseded: false,
        };

        Ok(ReportTicket {
            build_id,
            file_name: file_name.to_string(),
            document,
        })
    }

    fn check_build_id(&self, build_id: u32) -> ImpactResult<()> {
        match self.state.build_id() {
            Some(current) if current == build_id => Ok(()),
            expected => Err(ImpactError::StaleReport {
                expected,
                got: build_id,
            }),
        }
    }

    fn invalid(&self, action: &str) -> ImpactError {
        ImpactError::InvalidStateTransition(format!(
            "cannot {} a report that is {}",
            action,
            self.state.as_str()
        ))
    }

    /// Rendering finished for `build_id`
    pub fn complete(&mut self, build_id: u32, now: DateTime<Utc>) -> ImpactResult<()> {
        self.check_build_id(build_id)?;
        if self.check_timeout(now) {
            return Err(ImpactError::ReportTimedOut);
        }

        let state = std::mem::replace(&mut self.state, ReportState::Idle);
        match state {
            ReportState::Building {
                superseded: true, ..
            } => {
                tracing::debug!(build_id, "Superseded build finished, discarding");
                Err(ImpactError::StaleReport {
                    expected: None,
                    got: build_id,
                })
            }
            ReportState::Building { document, .. } => {
                tracing::debug!(build_id, "Report build ready");
                self.state = ReportState::Ready { build_id, document };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("complete"))
            }
        }
    }

    /// Rendering failed for `build_id`; the user may retry
    pub fn fail(&mut self, build_id: u32, reason: &str) -> ImpactResult<()> {
        self.check_build_id(build_id)?;
        match self.state {
            ReportState::Building {
                superseded: true, ..
            } => {
                tracing::debug!(build_id, reason, "Superseded build failed, discarding");
                self.state = ReportState::Idle;
                Ok(())
            }
            ReportState::Building { .. } => {
                tracing::warn!(build_id, reason, "Report build failed");
                self.state = ReportState::Failed {
                    build_id,
                    reason: reason.to_string(),
                };
                Ok(())
            }
            _ => Err(self.invalid("fail")),
        }
    }

    /// The user downloaded the finished report
    pub fn deliver(&mut self, build_id: u32) -> ImpactResult<()> {
        self.check_build_id(build_id)?;
        match self.state {
            ReportState::Ready { .. } => {
                tracing::debug!(build_id, "Report delivered");
                self.state = ReportState::Delivered { build_id };
                Ok(())
            }
            _ => Err(self.invalid("deliver")),
        }
    }

    /// Drop any finished report after an input change
    pub fn invalidate(&mut self) {
        match &mut self.state {
            ReportState::Idle => {}
            ReportState::Building {
                build_id,
                superseded,
                ..
            } => {
                tracing::debug!(build_id = *build_id, "Input changed during build, marking it superseded");
                *superseded = true;
            }
            _ => {
                tracing::debug!(from = self.state.as_str(), "Report invalidated");
                self.state = ReportState::Idle;
            }
        }
    }

    /// Start, render and complete in one call
    pub fn generate<R: ReportRenderer + ?Sized>(
        &mut self,
        snapshot: DashboardSnapshot,
        renderer: &R,
        now: DateTime<Utc>,
        file_name: &str,
    ) -> ImpactResult<RenderedReport> {
        let ticket = self.start(snapshot, now, file_name)?;
        match renderer.render(&ticket.document) {
            Ok(bytes) => {
                self.complete(ticket.build_id, now)?;
                Ok(RenderedReport {
                    build_id: ticket.build_id,
                    file_name: ticket.file_name,
                    bytes,
                })
            }
            Err(err) => {
                self.fail(ticket.build_id, &err.to_string())?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImpactInput;
    use crate::validation::NegativeInputPolicy;
    use chrono::TimeZone;

    const FILE: &str = "olor-sustainability-report.pdf";

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    fn snapshot(beans: f64) -> DashboardSnapshot {
        DashboardSnapshot::new(ImpactInput::from_f64(beans, NegativeInputPolicy::Clamp), t(0))
    }

    #[test]
    fn test_happy_path() {
        let mut job = ReportJob::new(5000);
        assert_eq!(job.state().as_str(), "idle");

        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        assert_eq!(ticket.build_id, 1);
        assert!(job.status().in_progress);

        job.complete(ticket.build_id, t(300)).unwrap();
        assert_eq!(job.state().as_str(), "ready");
        assert!(job.ready_document().is_some());

        job.deliver(ticket.build_id).unwrap();
        assert_eq!(job.state().as_str(), "delivered");
        assert!(!job.status().in_progress);
    }

    #[test]
    fn test_second_start_while_building_rejected() {
        let mut job = ReportJob::new(5000);
        job.start(snapshot(60.0), t(0), FILE).unwrap();
        let err = job.start(snapshot(60.0), t(100), FILE).unwrap_err();
        assert_eq!(err.code(), "REPORT_IN_PROGRESS");
    }

    #[test]
    fn test_timeout_allows_retry() {
        let mut job = ReportJob::new(5000);
        let first = job.start(snapshot(60.0), t(0), FILE).unwrap();

        assert!(!job.check_timeout(t(4999)));
        assert!(job.check_timeout(t(5000)));
        assert_eq!(job.state().as_str(), "timed_out");
        assert_eq!(job.status().error.as_deref(), Some("Report generation timed out"));

        let second = job.start(snapshot(60.0), t(5100), FILE).unwrap();
        assert_eq!(second.build_id, first.build_id + 1);
    }

    #[test]
    fn test_start_expires_stuck_build() {
        let mut job = ReportJob::new(5000);
        job.start(snapshot(60.0), t(0), FILE).unwrap();
        assert!(job.start(snapshot(60.0), t(6000), FILE).is_ok());
    }

    #[test]
    fn test_late_completion_times_out() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        let err = job.complete(ticket.build_id, t(7000)).unwrap_err();
        assert_eq!(err.code(), "REPORT_TIMED_OUT");
        assert_eq!(job.state().as_str(), "timed_out");
    }

    #[test]
    fn test_stale_build_id_rejected() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        let err = job.complete(ticket.build_id + 7, t(10)).unwrap_err();
        assert_eq!(err.code(), "STALE_REPORT");
        assert_eq!(job.state().as_str(), "building");
    }

    #[test]
    fn test_wrong_state_transitions() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        assert_eq!(job.deliver(ticket.build_id).unwrap_err().code(), "INVALID_STATE_TRANSITION");

        job.complete(ticket.build_id, t(10)).unwrap();
        assert_eq!(job.complete(ticket.build_id, t(20)).unwrap_err().code(), "INVALID_STATE_TRANSITION");
        assert_eq!(job.fail(ticket.build_id, "late").unwrap_err().code(), "INVALID_STATE_TRANSITION");
        assert_eq!(job.state().as_str(), "ready");
    }

    #[test]
    fn test_failure_then_retry() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        job.fail(ticket.build_id, "renderer crashed").unwrap();
        assert_eq!(job.status().error.as_deref(), Some("renderer crashed"));
        assert!(job.start(snapshot(60.0), t(10), FILE).is_ok());
    }

    #[test]
    fn test_invalidate_drops_ready_report() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        job.complete(ticket.build_id, t(10)).unwrap();

        job.invalidate();
        assert_eq!(job.state(), &ReportState::Idle);
        assert!(job.ready_document().is_none());
    }

    #[test]
    fn test_superseded_build_never_becomes_ready() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        job.invalidate();
        assert_eq!(job.state().as_str(), "building");

        let err = job.complete(ticket.build_id, t(10)).unwrap_err();
        assert_eq!(err.code(), "STALE_REPORT");
        assert_eq!(job.state(), &ReportState::Idle);
        assert!(job.ready_document().is_none());
        assert!(job.deliver(ticket.build_id).is_err());
    }

    #[test]
    fn test_superseded_build_does_not_block_restart() {
        let mut job = ReportJob::new(5000);
        let first = job.start(snapshot(60.0), t(0), FILE).unwrap();
        job.invalidate();

        let second = job.start(snapshot(100.0), t(10), FILE).unwrap();
        assert_eq!(job.complete(first.build_id, t(20)).unwrap_err().code(), "STALE_REPORT");
        job.complete(second.build_id, t(30)).unwrap();
        assert_eq!(job.ready_document().unwrap().snapshot, snapshot(100.0));
    }

    #[test]
    fn test_superseded_build_failure_returns_to_idle() {
        let mut job = ReportJob::new(5000);
        let ticket = job.start(snapshot(60.0), t(0), FILE).unwrap();
        job.invalidate();
        job.fail(ticket.build_id, "canvas lost").unwrap();
        assert_eq!(job.state(), &ReportState::Idle);
    }
}

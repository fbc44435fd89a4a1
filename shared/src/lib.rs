//! Shared types and logic for the Sustainability Impact Dashboard
//!
//! This crate holds the impact calculation core used identically by the
//! interactive dashboard and the printable report, plus the session, storage
//! and report lifecycle around it. The browser bindings live in the `wasm` crate.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod models;
pub mod report;
pub mod session;
pub mod storage;
pub mod types;
pub mod validation;

pub use crate::config::DashboardConfig;
pub use error::{ImpactError, ImpactResult};
pub use models::*;
pub use types::*;
pub use validation::*;

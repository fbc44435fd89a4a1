//! Persisted dashboard state
//!
//! The host provides a string key-value store (browser `localStorage` in
//! production). Reads never fail outward: anything missing or unreadable is
//! replaced by the sample record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{ImpactError, ImpactResult};
use crate::models::{sample_dashboard_data, StoredDashboardData};
use crate::validation::bean_kg_in_range;

/// Minimal key-value storage seam
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ImpactResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ImpactResult<()>;
}

/// In-memory store for native use and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ImpactResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ImpactResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Where a loaded record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Stored,
    Sample,
}

/// Parse a stored record. A bean quantity outside the accepted range counts
/// as unreadable.
pub fn parse_dashboard_data(json: &str) -> ImpactResult<StoredDashboardData> {
    let data: StoredDashboardData = serde_json::from_str(json)?;
    if !bean_kg_in_range(data.beans_sold) {
        return Err(ImpactError::StorageParse(serde::de::Error::custom(format!(
            "beansSold {} is outside the accepted range",
            data.beans_sold
        ))));
    }
    Ok(data)
}

/// Load the last snapshot, falling back to the sample record
pub fn load_dashboard_data<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    now: DateTime<Utc>,
) -> (StoredDashboardData, LoadOrigin) {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!(key, "No stored dashboard data, using sample data");
            return (sample_dashboard_data(now), LoadOrigin::Sample);
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Storage read failed, using sample data");
            return (sample_dashboard_data(now), LoadOrigin::Sample);
        }
    };

    match parse_dashboard_data(&raw) {
        Ok(data) => {
            tracing::debug!(key, "Restored stored dashboard data");
            (data, LoadOrigin::Stored)
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Error parsing stored data, using sample data");
            (sample_dashboard_data(now), LoadOrigin::Sample)
        }
    }
}

/// Persist a record under `key`
pub fn save_dashboard_data<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    data: &StoredDashboardData,
) -> ImpactResult<()> {
    let json = serde_json::to_string(data).map_err(ImpactError::StorageParse)?;
    store.set(key, &json)
}

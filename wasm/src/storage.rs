//! `localStorage` backed key-value store

use shared::storage::KeyValueStore;
use shared::{ImpactError, ImpactResult};

use crate::error::js_error_message;

/// Wraps `window.localStorage`. A missing or blocked storage (private mode,
/// sandboxed iframe) makes every call fail, which the session treats as
/// "nothing stored".
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, dashboard data will not persist");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> ImpactResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| ImpactError::StorageUnavailable("localStorage is not available".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> ImpactResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| ImpactError::StorageUnavailable(js_error_message(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> ImpactResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ImpactError::StorageUnavailable(js_error_message(&e)))
    }
}

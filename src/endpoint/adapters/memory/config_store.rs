//! Copy-on-write in-memory endpoint configuration store.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::endpoint::{
    domain::{EndpointConfig, Shortcut},
    ports::{EndpointConfigStore, EndpointStoreError, EndpointStoreResult},
};

type Snapshot = Arc<BTreeMap<Shortcut, EndpointConfig>>;

/// Thread-safe in-memory endpoint configuration store.
///
/// Readers clone the current snapshot pointer and never hold the lock while
/// inspecting entries. Writers build a new map and swap it in, so an
/// in-flight route keeps the view it started with.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEndpointStore {
    state: Arc<RwLock<Snapshot>>,
}

impl InMemoryEndpointStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given entries.
    ///
    /// Later entries replace earlier ones with the same shortcut.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = EndpointConfig>) -> Self {
        let map = entries
            .into_iter()
            .map(|config| (config.shortcut().clone(), config))
            .collect();
        Self {
            state: Arc::new(RwLock::new(Arc::new(map))),
        }
    }

    /// Returns the current immutable snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Unavailable`] when the lock is poisoned.
    pub fn snapshot(&self) -> EndpointStoreResult<Arc<BTreeMap<Shortcut, EndpointConfig>>> {
        let state = self
            .state
            .read()
            .map_err(|err| EndpointStoreError::Unavailable(err.to_string()))?;
        Ok(Arc::clone(&state))
    }

    /// Adds a new endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::DuplicateShortcut`] when the shortcut is
    /// already configured.
    pub fn insert(&self, config: EndpointConfig) -> EndpointStoreResult<()> {
        self.modify(|entries| {
            if entries.contains_key(config.shortcut()) {
                return Err(EndpointStoreError::DuplicateShortcut(
                    config.shortcut().clone(),
                ));
            }
            entries.insert(config.shortcut().clone(), config);
            Ok(())
        })
    }

    /// Adds an endpoint or replaces the one with the same shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Unavailable`] when the lock is poisoned.
    pub fn upsert(&self, config: EndpointConfig) -> EndpointStoreResult<()> {
        self.modify(|entries| {
            entries.insert(config.shortcut().clone(), config);
            Ok(())
        })
    }

    /// Removes an endpoint and returns its last configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::NotFound`] when the shortcut is not
    /// configured.
    pub fn remove(&self, shortcut: &Shortcut) -> EndpointStoreResult<EndpointConfig> {
        self.modify(|entries| {
            entries
                .remove(shortcut)
                .ok_or_else(|| EndpointStoreError::NotFound(shortcut.clone()))
        })
    }

    /// Replaces every entry at once.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Unavailable`] when the lock is poisoned.
    pub fn replace_all(
        &self,
        entries: impl IntoIterator<Item = EndpointConfig>,
    ) -> EndpointStoreResult<()> {
        let map = entries
            .into_iter()
            .map(|config| (config.shortcut().clone(), config))
            .collect();
        let mut state = self
            .state
            .write()
            .map_err(|err| EndpointStoreError::Unavailable(err.to_string()))?;
        *state = Arc::new(map);
        Ok(())
    }

    fn modify<T>(
        &self,
        change: impl FnOnce(&mut BTreeMap<Shortcut, EndpointConfig>) -> EndpointStoreResult<T>,
    ) -> EndpointStoreResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|err| EndpointStoreError::Unavailable(err.to_string()))?;
        let mut next = BTreeMap::clone(&state);
        let outcome = change(&mut next)?;
        *state = Arc::new(next);
        Ok(outcome)
    }
}

impl EndpointConfigStore for InMemoryEndpointStore {
    fn find_by_shortcut(&self, shortcut: &str) -> EndpointStoreResult<Option<EndpointConfig>> {
        Ok(self.snapshot()?.get(shortcut).cloned())
    }

    fn list(&self) -> EndpointStoreResult<Vec<EndpointConfig>> {
        Ok(self.snapshot()?.values().cloned().collect())
    }
}

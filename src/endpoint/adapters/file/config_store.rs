//! File-backed endpoint configuration store.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::{Arc, Mutex};

use super::models::{EndpointFile, PersistedEndpoint};
use crate::endpoint::{
    adapters::memory::InMemoryEndpointStore,
    domain::{EndpointConfig, EndpointDomainError, Shortcut},
    ports::{EndpointConfigStore, EndpointStoreError, EndpointStoreResult},
};

/// Outcome of reading the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of entries that validated and are now routable.
    pub loaded: usize,
    /// Entries skipped because they failed validation, by raw shortcut.
    pub rejected: Vec<(String, EndpointDomainError)>,
}

/// Endpoint configuration store persisted as a JSON file.
///
/// Entries are validated once at load time; the router only ever sees
/// validated snapshots served from an [`InMemoryEndpointStore`]. Mutations
/// write the whole file first and publish the new snapshot only after the
/// write succeeded.
#[derive(Debug, Clone)]
pub struct FileEndpointStore {
    dir: Arc<Dir>,
    file_name: String,
    entries: InMemoryEndpointStore,
    write_guard: Arc<Mutex<()>>,
}

impl FileEndpointStore {
    /// Opens the settings file at `path` and loads it.
    ///
    /// A missing file yields an empty store; it is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::Persistence`] when the directory cannot
    /// be opened or the file cannot be read, and
    /// [`EndpointStoreError::InvalidPersistedData`] when it is not valid JSON.
    pub fn open(path: &Utf8Path) -> EndpointStoreResult<(Self, LoadReport)> {
        let file_name = path.file_name().ok_or_else(|| {
            EndpointStoreError::persistence(io::Error::other("path must include a file name"))
        })?;
        let parent = match path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(EndpointStoreError::persistence)?;
        Self::from_dir(dir, file_name)
    }

    /// Uses an already opened directory handle.
    ///
    /// # Errors
    ///
    /// See [`FileEndpointStore::open`].
    pub fn from_dir(
        dir: Dir,
        file_name: impl Into<String>,
    ) -> EndpointStoreResult<(Self, LoadReport)> {
        let store = Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
            entries: InMemoryEndpointStore::new(),
            write_guard: Arc::new(Mutex::new(())),
        };
        let report = store.reload()?;
        Ok((store, report))
    }

    /// Re-reads the settings file and publishes a new snapshot.
    ///
    /// Invalid entries are skipped and reported rather than failing the
    /// whole load.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError`] when the file cannot be read or parsed.
    pub fn reload(&self) -> EndpointStoreResult<LoadReport> {
        let file = self.read_file()?;
        let mut report = LoadReport::default();
        let mut configs = Vec::with_capacity(file.len());

        for (shortcut, persisted) in file {
            match persisted.into_config(&shortcut) {
                Ok(config) => configs.push(config),
                Err(error) => {
                    tracing::warn!(
                        shortcut = %shortcut,
                        %error,
                        "skipping invalid endpoint configuration"
                    );
                    report.rejected.push((shortcut, error));
                }
            }
        }

        report.loaded = configs.len();
        self.entries.replace_all(configs)?;
        tracing::debug!(
            file = %self.file_name,
            loaded = report.loaded,
            rejected = report.rejected.len(),
            "endpoint configuration loaded"
        );
        Ok(report)
    }

    /// Adds a new endpoint and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::DuplicateShortcut`] when the shortcut is
    /// taken, or a persistence error when the file cannot be written.
    pub fn insert(&self, config: EndpointConfig) -> EndpointStoreResult<()> {
        self.persist_change(|entries| entries.insert(config))
    }

    /// Adds or replaces an endpoint and persists it.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the file cannot be written.
    pub fn upsert(&self, config: EndpointConfig) -> EndpointStoreResult<()> {
        self.persist_change(|entries| entries.upsert(config))
    }

    /// Removes an endpoint and persists the remaining entries.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError::NotFound`] when the shortcut is not
    /// configured, or a persistence error when the file cannot be written.
    pub fn remove(&self, shortcut: &Shortcut) -> EndpointStoreResult<EndpointConfig> {
        self.persist_change(|entries| entries.remove(shortcut))
    }

    fn persist_change<T>(
        &self,
        change: impl FnOnce(&InMemoryEndpointStore) -> EndpointStoreResult<T>,
    ) -> EndpointStoreResult<T> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|err| EndpointStoreError::Unavailable(err.to_string()))?;

        let staged = InMemoryEndpointStore::with_entries(self.entries.list()?);
        let outcome = change(&staged)?;
        let next = staged.list()?;
        self.write_file(&next)?;
        self.entries.replace_all(next)?;
        Ok(outcome)
    }

    fn read_file(&self) -> EndpointStoreResult<EndpointFile> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(contents) if contents.trim().is_empty() => Ok(EndpointFile::new()),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(EndpointStoreError::invalid_persisted_data)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(EndpointFile::new()),
            Err(err) => Err(EndpointStoreError::persistence(err)),
        }
    }

    fn write_file(&self, configs: &[EndpointConfig]) -> EndpointStoreResult<()> {
        let file: EndpointFile = configs
            .iter()
            .map(|config| {
                (
                    config.shortcut().as_str().to_owned(),
                    PersistedEndpoint::from(config),
                )
            })
            .collect();
        let contents =
            serde_json::to_string_pretty(&file).map_err(EndpointStoreError::persistence)?;

        let staging_name = format!(".{}.tmp", self.file_name);
        self.dir
            .write(&staging_name, contents)
            .map_err(EndpointStoreError::persistence)?;
        self.dir
            .rename(&staging_name, &self.dir, &self.file_name)
            .map_err(EndpointStoreError::persistence)
    }
}

impl EndpointConfigStore for FileEndpointStore {
    fn find_by_shortcut(&self, shortcut: &str) -> EndpointStoreResult<Option<EndpointConfig>> {
        self.entries.find_by_shortcut(shortcut)
    }

    fn list(&self) -> EndpointStoreResult<Vec<EndpointConfig>> {
        self.entries.list()
    }
}

//! Device-local marker flags persisted as a small JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use coldcase_core::session::MarkerStore;

use crate::error::SourceError;

/// A [`MarkerStore`] that writes through to a JSON object on disk.
///
/// A missing or unreadable file starts with every flag `false`. Write
/// failures are logged and the in-memory value is kept.
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    path: PathBuf,
    flags: BTreeMap<String, bool>,
}

impl FileMarkerStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let flags = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt marker file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read marker file");
                BTreeMap::new()
            }
        };
        Self { path, flags }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), SourceError> {
        let io_error = |source| SourceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let body = serde_json::to_string_pretty(&self.flags)?;
        std::fs::write(&self.path, body).map_err(io_error)
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Failed to save marker file");
        }
    }
}

impl MarkerStore for FileMarkerStore {
    fn get(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    fn set(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
        self.persist_or_warn();
    }

    fn clear(&mut self) {
        self.flags.clear();
        self.persist_or_warn();
    }
}

#[cfg(test)]
mod tests {
    use coldcase_core::session::{SessionMarkers, BANNER_DISMISSED_KEY};

    use super::*;

    #[test]
    fn banner_dismissal_survives_reopen() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("markers.json");

        let mut first = SessionMarkers::new(FileMarkerStore::open(&path));
        assert!(first.banner_visible());
        first.dismiss_banner();
        first.dismiss_content_warning();

        let second = SessionMarkers::new(FileMarkerStore::open(&path));
        assert!(!second.banner_visible());
        assert!(second.content_warning_required());
    }

    #[test]
    fn missing_file_means_all_false() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileMarkerStore::open(dir.path().join("absent.json"));
        assert!(!store.get(BANNER_DISMISSED_KEY));
    }

    #[test]
    fn corrupt_file_means_all_false() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("markers.json");
        std::fs::write(&path, "{ not json").expect("write corrupt file");

        let mut store = FileMarkerStore::open(&path);
        assert!(!store.get(BANNER_DISMISSED_KEY));

        store.set(BANNER_DISMISSED_KEY, true);
        assert!(FileMarkerStore::open(&path).get(BANNER_DISMISSED_KEY));
    }

    #[test]
    fn creates_parent_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("state").join("markers.json");

        let mut store = FileMarkerStore::open(&path);
        store.set(BANNER_DISMISSED_KEY, true);
        assert!(path.exists());
    }
}

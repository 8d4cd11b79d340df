//! JSON file store
//!
//! File layout:
//! ```json
//! {
//!   "format_version": 1,
//!   "saved_at": "2026-10-19T09:30:00Z",
//!   "checksum": "crc32:deadbeef",
//!   "workspace": { "analyses": [...], "active_analysis_id": "..." }
//! }
//! ```
//!
//! Saves write a sibling temp file, fsync it, then rename it over the
//! target, so a crash never leaves a half-written state file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::Workspace;

use super::checksum::{compute_checksum, format_checksum, parse_checksum};
use super::errors::{PersistenceError, PersistenceResult};
use super::store::StateStore;

/// Current state file format
pub const FORMAT_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    format_version: u8,
    saved_at: DateTime<Utc>,
    checksum: String,
    workspace: Workspace,
}

/// Stores the workspace as one JSON file
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn workspace_checksum(workspace: &Workspace) -> PersistenceResult<u32> {
    let bytes = serde_json::to_vec(workspace)
        .map_err(|e| PersistenceError::Corrupt(format!("Failed to encode workspace: {}", e)))?;
    Ok(compute_checksum(&bytes))
}

impl StateStore for FileStateStore {
    fn load(&self) -> PersistenceResult<Option<Workspace>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: StateFile = serde_json::from_str(&content).map_err(|e| {
            PersistenceError::Corrupt(format!("{}: {}", self.path.display(), e))
        })?;

        if file.format_version != FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(file.format_version));
        }

        let expected = parse_checksum(&file.checksum).ok_or_else(|| {
            PersistenceError::Corrupt(format!("Invalid checksum field: {}", file.checksum))
        })?;
        let actual = workspace_checksum(&file.workspace)?;
        if expected != actual {
            return Err(PersistenceError::Corrupt(format!(
                "Checksum mismatch: expected {}, found {}",
                format_checksum(expected),
                format_checksum(actual)
            )));
        }

        Ok(Some(file.workspace))
    }

    fn save(&self, workspace: &Workspace) -> PersistenceResult<()> {
        let file = StateFile {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            checksum: format_checksum(workspace_checksum(workspace)?),
            workspace: workspace.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| PersistenceError::Corrupt(format!("Failed to encode state: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        let mut out = File::create(&temp)?;
        out.write_all(json.as_bytes())?;
        out.sync_all()?;
        drop(out);

        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewEvidence, Rating};
    use tempfile::TempDir;

    fn sample() -> Workspace {
        let mut ws = Workspace::new();
        ws.create_analysis("Outage", "Why did the link drop?", None);
        let h = ws.add_hypothesis("fibre cut").unwrap();
        let e = ws.add_evidence(NewEvidence::new("carrier ticket")).unwrap();
        ws.set_rating(e.id, h.id, Rating::VeryConsistent);
        ws.create_snapshot("v1", None).unwrap();
        ws
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("nested").join("state.json"));
        let ws = sample();

        store.save(&ws).unwrap();
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), Some(ws));
    }

    #[test]
    fn test_tampered_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStateStore::new(&path);
        store.save(&sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        fs::write(&path, content.replace("fibre cut", "fibre out")).unwrap();

        assert!(matches!(store.load(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let err = FileStateStore::new(&path).load().unwrap_err();
        assert_eq!(err.code(), "ACH_STATE_CORRUPT");
    }
}

//! # State Store Trait

use std::sync::Mutex;

use crate::repository::Workspace;

use super::errors::{PersistenceError, PersistenceResult};

/// Where the whole workspace is kept between runs.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait StateStore: std::fmt::Debug {
    fn load(&self) -> PersistenceResult<Option<Workspace>>;

    fn save(&self, workspace: &Workspace) -> PersistenceResult<()>;
}

/// In-process store, used by tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    saved: Mutex<Option<Workspace>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a workspace
    pub fn with_state(workspace: Workspace) -> Self {
        Self {
            saved: Mutex::new(Some(workspace)),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> PersistenceResult<Option<Workspace>> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| PersistenceError::Unavailable("Lock poisoned".into()))?;
        Ok(saved.clone())
    }

    fn save(&self, workspace: &Workspace) -> PersistenceResult<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| PersistenceError::Unavailable("Lock poisoned".into()))?;
        *saved = Some(workspace.clone());
        Ok(())
    }
}

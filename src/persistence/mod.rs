//! Persistence of the workspace
//!
//! The engine exposes its whole state as one serializable [`Workspace`].
//! A [`StateStore`] loads it at startup and saves it after mutations.
//!
//! From the engine's side persistence is best effort:
//! - [`Workspace::load_or_default`] starts empty when the store has nothing
//!   or cannot be read
//! - [`Workspace::save_to`] reports failure in the log only
//!
//! Callers that must not lose data (the CLI) use the store directly and
//! surface its errors.

mod checksum;
mod errors;
mod file;
mod store;

pub use checksum::{compute_checksum, format_checksum, parse_checksum};
pub use errors::{PersistenceError, PersistenceResult};
pub use file::{FileStateStore, FORMAT_VERSION};
pub use store::{MemoryStateStore, StateStore};

use crate::observability::{log_event_with_fields, Event};
use crate::repository::Workspace;

impl Workspace {
    /// Load from `store`, or start with no analyses
    pub fn load_or_default(store: &dyn StateStore) -> Workspace {
        match store.load() {
            Ok(Some(workspace)) => {
                log_event_with_fields(
                    Event::StateLoaded,
                    &[("analyses", &workspace.analyses().len().to_string())],
                );
                workspace
            }
            Ok(None) => Workspace::new(),
            Err(e) => {
                log_event_with_fields(
                    Event::PersistenceUnavailable,
                    &[("code", e.code()), ("error", &e.to_string()), ("op", "load")],
                );
                Workspace::new()
            }
        }
    }

    /// Save to `store`. Failure is logged and otherwise ignored.
    pub fn save_to(&self, store: &dyn StateStore) {
        match store.save(self) {
            Ok(()) => log_event_with_fields(
                Event::StateSaved,
                &[("analyses", &self.analyses().len().to_string())],
            ),
            Err(e) => log_event_with_fields(
                Event::PersistenceUnavailable,
                &[("code", e.code()), ("error", &e.to_string()), ("op", "save")],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn load(&self) -> PersistenceResult<Option<Workspace>> {
            Err(PersistenceError::Unavailable("offline".into()))
        }

        fn save(&self, _workspace: &Workspace) -> PersistenceResult<()> {
            Err(PersistenceError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_broken_store_starts_empty() {
        let ws = Workspace::load_or_default(&BrokenStore);
        assert!(ws.analyses().is_empty());
    }

    #[test]
    fn test_failed_save_leaves_workspace_intact() {
        let mut ws = Workspace::new();
        ws.create_analysis("t", "q", None);
        let before = ws.clone();
        ws.save_to(&BrokenStore);
        assert_eq!(ws, before);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStateStore::new();
        assert!(Workspace::load_or_default(&store).analyses().is_empty());

        let mut ws = Workspace::new();
        ws.create_analysis("t", "q", None);
        ws.save_to(&store);

        let loaded = Workspace::load_or_default(&store);
        assert_eq!(loaded, ws);
    }
}

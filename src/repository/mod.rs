//! Analysis repository
//!
//! CRUD and referential integrity for the collections of the active
//! analysis in a [`Workspace`].
//!
//! # Rules
//!
//! - Every operation is scoped to the active analysis. With none selected,
//!   reads return empty values and writes return `None` / `false`.
//! - A mutation either applies fully and advances `updated_at`, or leaves
//!   the analysis untouched.
//! - Deleting a hypothesis removes its ratings and milestones; deleting
//!   evidence removes its ratings. Both happen inside the same mutation.
//! - `set_rating` is an upsert keyed by (evidence, hypothesis).
//!
//! The `set_*` bulk operations replace a collection wholesale and exist for
//! restore and import tooling.

mod analyses;
mod errors;
mod evidence;
mod hypotheses;
mod import;
mod milestones;
mod ratings;
mod workspace;

pub use errors::{RepositoryError, RepositoryResult};
pub use workspace::Workspace;

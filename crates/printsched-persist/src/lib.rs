//! # printsched-persist
//!
//! The read/write contracts around the planner (`SnapshotSource`,
//! `PlanWriter`), the in-memory reference store, and the `run` function
//! that sequences nuclear wipe, snapshot load, planning, and apply into one
//! call (spec §4.5, §4.6, §6).

mod applier;
mod error;
mod in_memory;
mod snapshot;
mod writer;

pub use applier::{run, RunOptions, RunReport};
pub use error::PersistError;
pub use in_memory::InMemoryStore;
pub use snapshot::{RunFilter, Snapshot, SnapshotSource};
pub use writer::{ApplyOptions, ApplyReport, PlanWriter};

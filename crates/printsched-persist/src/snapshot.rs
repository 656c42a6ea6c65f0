//! The read-side contract: what a run needs loaded before planning can
//! start, and how a caller restricts which jobs it covers (spec §6).

use crate::PersistError;
use printsched_core::{Break, Holiday, Job, ProductionStage, Shift, StageInstance};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Narrows a snapshot load (and, later, the planner itself) to a subset of
/// jobs or one division. An empty filter loads everything eligible.
#[derive(Clone, Debug, Default)]
pub struct RunFilter {
    pub only_job_ids: Option<HashSet<Uuid>>,
    pub division: Option<String>,
}

/// Everything the planner needs for one run: calendar primitives, every
/// resource, and every job with its stage instances.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub shifts: Vec<Shift>,
    pub breaks: Vec<Break>,
    pub holidays: Vec<Holiday>,
    pub production_stages: Vec<ProductionStage>,
    pub jobs: Vec<Job>,
    pub stages: Vec<StageInstance>,
}

/// Loads a `Snapshot` from wherever jobs, stages, and calendar rows live.
/// `InMemoryStore` is the reference implementation used by tests and the
/// CLI; a durable backend implements the same trait against a real store.
pub trait SnapshotSource {
    /// Reads a snapshot narrowed by `filter`. A failure here aborts the run
    /// before any write is attempted (`SnapshotUnavailable`, spec §7).
    fn load(&self, filter: &RunFilter) -> Result<Snapshot, PersistError>;
}

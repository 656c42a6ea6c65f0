//! The write-side contract: how placements reach storage, and in which of
//! the three apply modes (spec §4.5).

use crate::PersistError;
use printsched_core::PlacementUpdate;
use uuid::Uuid;

/// Controls how `PlanWriter::apply` treats each placement.
#[derive(Clone, Copy, Debug)]
pub struct ApplyOptions {
    /// `false`: compute counts only, write nothing (spec §4.5).
    pub commit: bool,
    /// `true`: write only where the target stage's `scheduled_start_at` is
    /// still null. Ignored when `commit` is false.
    pub only_if_unset: bool,
    /// `true`: persist `schedule_status = "proposed"` instead of `"scheduled"`.
    pub as_proposed: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            commit: false,
            only_if_unset: true,
            as_proposed: false,
        }
    }
}

/// Outcome of one `apply` call, whether or not it actually wrote anything.
#[derive(Clone, Debug, Default)]
pub struct ApplyReport {
    /// Rows written (or, under `commit=false`, that would have been written).
    pub written: usize,
    /// Rows skipped because `only_if_unset` found a non-null `scheduled_start_at`.
    pub skipped_already_set: usize,
    /// Row-level write failures; the run continues past each one (spec §7).
    pub failed: Vec<(Uuid, String)>,
}

impl ApplyReport {
    pub fn merge(&mut self, other: ApplyReport) {
        self.written += other.written;
        self.skipped_already_set += other.skipped_already_set;
        self.failed.extend(other.failed);
    }
}

/// Applies planner output to storage. `InMemoryStore` is the reference
/// implementation; a durable backend implements the same trait.
pub trait PlanWriter {
    /// Applies `updates` under `opts`, returning per-run counts. Individual
    /// row failures are collected into the report rather than aborting
    /// (`WriteFailed`, spec §7); only an unrecoverable storage failure
    /// should return `Err`.
    fn apply(&self, updates: &[PlacementUpdate], opts: &ApplyOptions) -> Result<ApplyReport, PersistError>;
}

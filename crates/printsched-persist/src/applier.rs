//! Orchestrates one end-to-end run: optional nuclear wipe, snapshot load,
//! planning, and apply — the sequence spec.md §4.4-§4.6 describes as a
//! single entrypoint call.

use crate::snapshot::{RunFilter, SnapshotSource};
use crate::writer::{ApplyOptions, ApplyReport, PlanWriter};
use crate::PersistError;
use chrono::{DateTime, Utc};
use printsched_core::{PlannerIssue, SchedulerConfig};
use printsched_planner::{plan, Calendar, PlannerInput};
use std::collections::HashSet;
use uuid::Uuid;

/// Flags accepted by the run entrypoint (spec §6).
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub commit: bool,
    pub as_proposed: bool,
    pub only_if_unset: bool,
    /// Wipe existing scheduling output and replan from `start_from` before
    /// planning (spec §4.6).
    pub nuclear: bool,
    /// When `nuclear` is set, wipe every stage regardless of date instead of
    /// only those at or after `start_from`'s resolved `baseStart`.
    pub wipe_all: bool,
    /// Anchor for nuclear mode; resolved to the next working start via
    /// `Calendar::next_working_start`. Defaults to "now" when unset.
    pub start_from: Option<DateTime<Utc>>,
    pub only_job_ids: Option<HashSet<Uuid>>,
    pub division: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            commit: false,
            as_proposed: false,
            only_if_unset: true,
            nuclear: false,
            wipe_all: false,
            start_from: None,
            only_job_ids: None,
            division: None,
        }
    }
}

/// Everything one run produced: non-fatal planner findings, the apply
/// counts, the anchor actually used for job baselines, and (for nuclear
/// runs) how many rows were wiped beforehand.
#[derive(Debug)]
pub struct RunReport {
    pub issues: Vec<PlannerIssue>,
    pub apply: ApplyReport,
    pub wiped: usize,
    pub base_start: DateTime<Utc>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            apply: ApplyReport::default(),
            wiped: 0,
            base_start: DateTime::<Utc>::default(),
        }
    }
}

/// Runs snapshot load, optional nuclear wipe, planning, and apply against
/// `source`/`writer`, in that order. `SnapshotUnavailable` aborts before any
/// write; `NuclearWipeFailed` aborts before planning (spec §7).
pub fn run<S, W>(
    source: &S,
    writer: &W,
    config: &SchedulerConfig,
    wipe: Option<&dyn Fn(Option<DateTime<Utc>>) -> Result<usize, PersistError>>,
    options: &RunOptions,
) -> Result<RunReport, PersistError>
where
    S: SnapshotSource,
    W: PlanWriter,
{
    let tz: chrono_tz::Tz = config
        .local_timezone
        .parse()
        .unwrap_or(chrono_tz::Africa::Johannesburg);

    let mut report = RunReport::default();
    let mut base_start = options.start_from.unwrap_or_else(Utc::now);

    let filter = RunFilter {
        only_job_ids: options.only_job_ids.clone(),
        division: options.division.clone(),
    };
    let snapshot = source.load(&filter)?;
    let calendar = Calendar::new(&snapshot.shifts, &snapshot.breaks, &snapshot.holidays, tz, config.horizon_days);

    if options.nuclear {
        base_start = calendar
            .next_working_start(base_start)
            .map_err(|e| PersistError::NuclearWipeFailed(e.to_string()))?;

        if let Some(wipe_fn) = wipe {
            let cutoff = if options.wipe_all { None } else { Some(base_start) };
            report.wiped = wipe_fn(cutoff)?;
        }
    }

    let planner_input = PlannerInput {
        jobs: &snapshot.jobs,
        stages: &snapshot.stages,
        production_stages: &snapshot.production_stages,
        calendar: &calendar,
        config,
        pin_to_base: options.nuclear,
        base_start,
        only_job_ids: options.only_job_ids.as_ref(),
        division: options.division.as_deref(),
    };
    let output = plan(&planner_input);
    report.issues = output.issues;
    report.base_start = base_start;

    let apply_opts = ApplyOptions {
        commit: options.commit,
        only_if_unset: options.only_if_unset,
        as_proposed: options.as_proposed,
    };
    report.apply = writer.apply(&output.updates, &apply_opts)?;

    Ok(report)
}

//! Reference `SnapshotSource`/`PlanWriter` implementation backed by an
//! in-process `Mutex`. Used by the CLI, by tests, and as the template a
//! durable backend adapter follows.

use crate::snapshot::{RunFilter, Snapshot, SnapshotSource};
use crate::writer::{ApplyOptions, ApplyReport, PlanWriter};
use crate::PersistError;
use chrono::{DateTime, Utc};
use printsched_core::{
    Break, Holiday, Job, PlacementUpdate, ProductionStage, ScheduleStatus, Shift, StageInstance,
};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

struct Tables {
    shifts: Vec<Shift>,
    breaks: Vec<Break>,
    holidays: Vec<Holiday>,
    production_stages: Vec<ProductionStage>,
    jobs: Vec<Job>,
    stages: HashMap<Uuid, StageInstance>,
}

pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new(
        shifts: Vec<Shift>,
        breaks: Vec<Break>,
        holidays: Vec<Holiday>,
        production_stages: Vec<ProductionStage>,
        jobs: Vec<Job>,
        stages: Vec<StageInstance>,
    ) -> Self {
        let stages = stages.into_iter().map(|s| (s.id, s)).collect();
        Self {
            tables: Mutex::new(Tables {
                shifts,
                breaks,
                holidays,
                production_stages,
                jobs,
                stages,
            }),
        }
    }

    /// Returns every stage instance as currently stored, for test assertions
    /// and CLI inspection output.
    pub fn stage_snapshot(&self) -> Vec<StageInstance> {
        let tables = match self.tables.lock() {
            Ok(tables) => tables,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut stages: Vec<StageInstance> = tables.stages.values().cloned().collect();
        stages.sort_by_key(|s| s.id);
        stages
    }

    /// Nulls scheduling-output fields on every stage. When `cutoff` is
    /// `Some`, only stages whose `scheduled_start_at` falls on or after it
    /// are wiped (`wipeAll=false`); `None` wipes unconditionally
    /// (`wipeAll=true`), per spec §4.6.
    pub fn wipe(&self, cutoff: Option<DateTime<Utc>>) -> Result<usize, PersistError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| PersistError::NuclearWipeFailed("in-memory store mutex poisoned".to_string()))?;
        let mut wiped = 0;
        for stage in tables.stages.values_mut() {
            let in_scope = match (cutoff, stage.scheduled_start_at) {
                (None, _) => true,
                (Some(cutoff), Some(start)) => start >= cutoff,
                (Some(_), None) => false,
            };
            if !in_scope {
                continue;
            }
            stage.scheduled_start_at = None;
            stage.scheduled_end_at = None;
            stage.scheduled_minutes = None;
            stage.schedule_status = None;
            wiped += 1;
        }
        Ok(wiped)
    }
}

impl SnapshotSource for InMemoryStore {
    fn load(&self, filter: &RunFilter) -> Result<Snapshot, PersistError> {
        let tables = self.tables.lock().map_err(|_| {
            PersistError::SnapshotUnavailable("in-memory store mutex poisoned".to_string())
        })?;

        let jobs: Vec<Job> = tables
            .jobs
            .iter()
            .filter(|job| filter.only_job_ids.as_ref().map_or(true, |ids| ids.contains(&job.id)))
            .filter(|job| {
                filter
                    .division
                    .as_deref()
                    .map_or(true, |division| job.division.as_deref() == Some(division))
            })
            .cloned()
            .collect();
        let job_ids: std::collections::HashSet<Uuid> = jobs.iter().map(|j| j.id).collect();

        let stages: Vec<StageInstance> = tables
            .stages
            .values()
            .filter(|stage| job_ids.contains(&stage.job_id))
            .cloned()
            .collect();

        Ok(Snapshot {
            shifts: tables.shifts.clone(),
            breaks: tables.breaks.clone(),
            holidays: tables.holidays.clone(),
            production_stages: tables.production_stages.clone(),
            jobs,
            stages,
        })
    }
}

impl PlanWriter for InMemoryStore {
    fn apply(&self, updates: &[PlacementUpdate], opts: &ApplyOptions) -> Result<ApplyReport, PersistError> {
        let mut report = ApplyReport::default();
        let mut tables = self.tables.lock().map_err(|_| {
            PersistError::SnapshotUnavailable("in-memory store mutex poisoned".to_string())
        })?;

        for update in updates {
            let Some(stage) = tables.stages.get_mut(&update.stage_id) else {
                report
                    .failed
                    .push((update.stage_id, "stage not found in store".to_string()));
                continue;
            };

            if opts.only_if_unset && !stage.is_unset() {
                report.skipped_already_set += 1;
                continue;
            }

            if !opts.commit {
                report.written += 1;
                continue;
            }

            stage.scheduled_start_at = Some(update.start);
            stage.scheduled_end_at = Some(update.end);
            stage.scheduled_minutes = Some(update.minutes);
            stage.schedule_status = Some(if opts.as_proposed {
                ScheduleStatus::Proposed
            } else {
                ScheduleStatus::Scheduled
            });
            report.written += 1;
        }

        Ok(report)
    }
}

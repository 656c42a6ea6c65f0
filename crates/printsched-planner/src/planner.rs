//! Orchestrates one planning run: FIFO job ordering, per-job stage ordering,
//! dependency barriers, resource contention, and calendar placement
//! (spec §4.4). Pure and synchronous — no I/O happens here.

use crate::calendar::Calendar;
use crate::dependency::{check_predecessor_group, is_barrier};
use crate::resource_queue::ResourceQueue;
use chrono::{DateTime, Utc};
use printsched_core::{Job, PlannerIssue, ProductionStage, SchedulerConfig, StageInstance, PlacementUpdate};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Everything one `plan` call needs. Carries no mutable state of its own;
/// `plan` owns a fresh `ResourceQueue` for the duration of the run.
pub struct PlannerInput<'a> {
    pub jobs: &'a [Job],
    pub stages: &'a [StageInstance],
    pub production_stages: &'a [ProductionStage],
    pub calendar: &'a Calendar,
    pub config: &'a SchedulerConfig,
    /// When true, every job is anchored at `base_start` instead of its own
    /// `proof_approved_at` (nuclear-wipe reschedule mode, spec §4.5, §9).
    pub pin_to_base: bool,
    pub base_start: DateTime<Utc>,
    /// Restricts planning to this job subset, if set (spec §6).
    pub only_job_ids: Option<&'a HashSet<Uuid>>,
    /// Restricts planning to jobs in this division, if set (spec §6).
    pub division: Option<&'a str>,
}

/// Everything one `plan` call produces: the placements to apply and the
/// non-fatal findings collected along the way.
#[derive(Debug, Default)]
pub struct PlannerOutput {
    pub updates: Vec<PlacementUpdate>,
    pub issues: Vec<PlannerIssue>,
}

/// Runs the planner over `input` and returns every placement and issue
/// produced, in job-then-stage order. Never fails outright: a stage that
/// can't be placed is recorded as an issue and skipped (spec §7).
pub fn plan(input: &PlannerInput<'_>) -> PlannerOutput {
    let mut output = PlannerOutput::default();
    let production_stage_by_id: HashMap<Uuid, &ProductionStage> =
        input.production_stages.iter().map(|ps| (ps.id, ps)).collect();

    let mut eligible_jobs: Vec<&Job> = input
        .jobs
        .iter()
        .filter(|job| job.is_eligible())
        .filter(|job| input.only_job_ids.map_or(true, |ids| ids.contains(&job.id)))
        .filter(|job| input.division.map_or(true, |division| job.division.as_deref() == Some(division)))
        .collect();
    eligible_jobs.sort_by_key(|job| job.fifo_key());

    let mut resource_queue = ResourceQueue::new();
    if input.pin_to_base {
        let resources = input.production_stages.iter().map(|ps| ps.id);
        resource_queue.seed_all(resources, input.base_start);
    }

    let mut ends: HashMap<Uuid, DateTime<Utc>> = HashMap::new();

    for job in eligible_jobs {
        let baseline = if input.pin_to_base {
            input.base_start
        } else {
            job.proof_approved_at.unwrap_or(input.base_start)
        };

        let mut job_stages: Vec<&StageInstance> = input
            .stages
            .iter()
            .filter(|stage| stage.job_id == job.id)
            .filter(|stage| stage.status.is_plannable())
            .filter(|stage| {
                production_stage_by_id
                    .get(&stage.production_stage_id)
                    .map_or(true, |ps| !input.config.is_non_schedulable(&ps.name))
            })
            .collect();
        job_stages.sort_by_key(|stage| stage.effective_order());

        for stage in &job_stages {
            if let Some(issue) = check_predecessor_group(stage, &job_stages) {
                output.issues.push(issue);
            }
        }

        for candidate in &job_stages {
            let mut earliest = baseline;
            for predecessor in &job_stages {
                if predecessor.id == candidate.id {
                    continue;
                }
                if !is_barrier(predecessor, candidate) {
                    continue;
                }
                if let Some(&end) = ends.get(&predecessor.id) {
                    earliest = earliest.max(end);
                }
            }
            earliest = resource_queue.earliest_available(candidate.production_stage_id, earliest);

            let duration = candidate.duration_minutes();
            let placement = if duration == 0 {
                input
                    .calendar
                    .next_working_start(earliest)
                    .map(|start| (start, start))
            } else {
                input.calendar.place_duration(earliest, duration).map(|segments| {
                    let start = segments.first().expect("place_duration never returns empty segments").start;
                    let end = segments.last().expect("place_duration never returns empty segments").end;
                    (start, end)
                })
            };

            match placement {
                Ok((start, end)) => {
                    output.updates.push(PlacementUpdate {
                        stage_id: candidate.id,
                        start,
                        end,
                        minutes: duration,
                    });
                    ends.insert(candidate.id, end);
                    resource_queue.advance(candidate.production_stage_id, end);
                }
                Err(_) => {
                    output.issues.push(PlannerIssue::HorizonExhausted {
                        stage_id: candidate.id,
                        job_id: job.id,
                        requested_minutes: duration,
                        earliest,
                    });
                }
            }
        }
    }

    output
}

//! Invariant: within a job, `successor.start >= predecessor.end` for every
//! pair the dependency resolver treats as a barrier (spec §8).

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use printsched_core::{Job, PartAssignment, ProductionStage, SchedulerConfig, StageInstance};
use printsched_planner::{plan, Calendar, PlannerInput};
use uuid::Uuid;

fn calendar() -> Calendar {
    let shifts: Vec<printsched_core::Shift> = (0..=6)
        .map(|d| printsched_core::Shift {
            day_of_week: d,
            shift_start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            shift_end: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
            is_working_day: true,
        })
        .collect();
    Calendar::new(&shifts, &[], &[], chrono_tz::UTC, 60)
}

fn at(h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, h, min, 0).unwrap()
}

#[test]
fn cover_and_text_on_distinct_resources_run_truly_concurrently() {
    let r_cov = ProductionStage::new(Uuid::new_v4(), "R_cov");
    let r_text = ProductionStage::new(Uuid::new_v4(), "R_text");
    let job = Job::new(Uuid::new_v4(), "WO-1").with_proof_approved_at(at(8, 0));
    let cover = StageInstance::new(Uuid::new_v4(), job.id, r_cov.id)
        .stage_order(2)
        .estimated_minutes(60)
        .part_assignment(PartAssignment::Cover);
    let text = StageInstance::new(Uuid::new_v4(), job.id, r_text.id)
        .stage_order(2)
        .estimated_minutes(90)
        .part_assignment(PartAssignment::Text);

    let calendar = calendar();
    let config = SchedulerConfig::default();
    let input = PlannerInput {
        jobs: &[job],
        stages: &[cover.clone(), text.clone()],
        production_stages: &[r_cov, r_text],
        calendar: &calendar,
        config: &config,
        pin_to_base: false,
        base_start: at(0, 0),
        only_job_ids: None,
        division: None,
    };
    let output = plan(&input);
    let cover_update = output.updates.iter().find(|u| u.stage_id == cover.id).unwrap();
    let text_update = output.updates.iter().find(|u| u.stage_id == text.id).unwrap();
    assert_eq!(cover_update.start, text_update.start);
}

#[test]
fn same_dependency_group_serializes_an_otherwise_parallel_pair() {
    let r_cov = ProductionStage::new(Uuid::new_v4(), "R_cov");
    let r_text = ProductionStage::new(Uuid::new_v4(), "R_text");
    let job = Job::new(Uuid::new_v4(), "WO-1").with_proof_approved_at(at(8, 0));
    let cover = StageInstance::new(Uuid::new_v4(), job.id, r_cov.id)
        .stage_order(2)
        .estimated_minutes(60)
        .part_assignment(PartAssignment::Cover)
        .dependency_group("G");
    let text = StageInstance::new(Uuid::new_v4(), job.id, r_text.id)
        .stage_order(2)
        .estimated_minutes(90)
        .part_assignment(PartAssignment::Text)
        .dependency_group("G");

    let calendar = calendar();
    let config = SchedulerConfig::default();
    let input = PlannerInput {
        jobs: &[job],
        stages: &[cover.clone(), text.clone()],
        production_stages: &[r_cov, r_text],
        calendar: &calendar,
        config: &config,
        pin_to_base: false,
        base_start: at(0, 0),
        only_job_ids: None,
        division: None,
    };
    let output = plan(&input);
    let cover_update = output.updates.iter().find(|u| u.stage_id == cover.id).unwrap();
    let text_update = output.updates.iter().find(|u| u.stage_id == text.id).unwrap();
    assert!(cover_update.start >= text_update.end || text_update.start >= cover_update.end);
}

#[test]
fn unassigned_part_chains_strictly_sequentially() {
    let resource = ProductionStage::new(Uuid::new_v4(), "Single-resource");
    let job = Job::new(Uuid::new_v4(), "WO-1").with_proof_approved_at(at(8, 0));
    let first = StageInstance::new(Uuid::new_v4(), job.id, resource.id)
        .stage_order(1)
        .estimated_minutes(30);
    let second = StageInstance::new(Uuid::new_v4(), job.id, resource.id)
        .stage_order(2)
        .estimated_minutes(30);

    let calendar = calendar();
    let config = SchedulerConfig::default();
    let input = PlannerInput {
        jobs: &[job],
        stages: &[first.clone(), second.clone()],
        production_stages: &[resource],
        calendar: &calendar,
        config: &config,
        pin_to_base: false,
        base_start: at(0, 0),
        only_job_ids: None,
        division: None,
    };
    let output = plan(&input);
    let first_update = output.updates.iter().find(|u| u.stage_id == first.id).unwrap();
    let second_update = output.updates.iter().find(|u| u.stage_id == second.id).unwrap();
    assert!(second_update.start >= first_update.end);
}

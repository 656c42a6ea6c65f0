//! # printsched-core
//!
//! Domain model, configuration, and error taxonomy for the print-production
//! scheduler.
//!
//! This crate provides:
//! - Domain types: `Job`, `StageInstance`, `ProductionStage`, `Shift`,
//!   `Break`, `Holiday`
//! - The scheduling output types: `PlacementUpdate`, `ScheduleStatus`
//! - Non-fatal planning findings (`PlannerIssue`) and fatal run errors
//!   (`SchedulerError`)
//! - `SchedulerConfig`, the single place the local timezone and
//!   non-schedulable stage names are configured
//!
//! ## Example
//!
//! ```rust
//! use printsched_core::{Job, StageInstance, PartAssignment};
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! let job = Job::new(Uuid::new_v4(), "WO-1001")
//!     .with_proof_approved_at(Utc::now());
//! assert!(job.is_eligible());
//!
//! let stage = StageInstance::new(Uuid::new_v4(), job.id, Uuid::new_v4())
//!     .stage_order(1)
//!     .part_assignment(PartAssignment::Cover);
//! assert_eq!(stage.part_assignment, Some(PartAssignment::Cover));
//! ```

mod config;
mod error;

pub use config::SchedulerConfig;
pub use error::{PlannerIssue, SchedulerError};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Stage order used when a stage instance carries none (spec §4.4 edge case).
pub const DEFAULT_STAGE_ORDER: i32 = 9999;

/// Names whose case-insensitive substring match marks a production stage as
/// informational only; the planner never places work on it (spec §3, §4.4).
pub const NON_SCHEDULABLE_NAME_FRAGMENTS: [&str; 3] = ["proof", "dtp", "batch allocation"];

// ============================================================================
// Job
// ============================================================================

/// A print work-order, identified by a stable id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub wo_no: String,
    pub customer_name: String,
    pub quantity: i64,
    pub due_date: Option<NaiveDate>,
    /// Jobs without an approved proof are silently dropped by the planner.
    pub proof_approved_at: Option<DateTime<Utc>>,
    /// Optional division label; a run may restrict planning to one division.
    pub division: Option<String>,
}

impl Job {
    pub fn new(id: Uuid, wo_no: impl Into<String>) -> Self {
        Self {
            id,
            wo_no: wo_no.into(),
            customer_name: String::new(),
            quantity: 0,
            due_date: None,
            proof_approved_at: None,
            division: None,
        }
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn with_proof_approved_at(mut self, at: DateTime<Utc>) -> Self {
        self.proof_approved_at = Some(at);
        self
    }

    pub fn with_customer(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = customer_name.into();
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// A job is eligible for scheduling only once its proof is approved.
    pub fn is_eligible(&self) -> bool {
        self.proof_approved_at.is_some()
    }

    /// FIFO sort key: approval time ascending, ties broken by id (spec §3).
    pub fn fifo_key(&self) -> (DateTime<Utc>, Uuid) {
        (
            self.proof_approved_at.unwrap_or(DateTime::<Utc>::MAX_UTC),
            self.id,
        )
    }
}

// ============================================================================
// Production Stage (Resource)
// ============================================================================

/// A named machine or workcenter, modeled as a single-capacity queue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductionStage {
    pub id: Uuid,
    pub name: String,
}

impl ProductionStage {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// True for stages the planner must treat as informational only.
    pub fn is_non_schedulable(&self) -> bool {
        is_non_schedulable_name(&self.name)
    }
}

/// Case-insensitive substring match against the non-schedulable fragment list.
pub fn is_non_schedulable_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    NON_SCHEDULABLE_NAME_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
}

// ============================================================================
// Stage Instance
// ============================================================================

/// Part of a job a stage instance works on; determines parallel-vs-sequential
/// behavior among same-job stages (spec §4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartAssignment {
    Cover,
    Text,
    Both,
}

impl PartAssignment {
    /// Parses case-insensitively; `None`, empty, and unrecognized strings are
    /// all "unassigned" per spec §4.2's normalization rule.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.to_lowercase().as_str() {
            "cover" => Some(Self::Cover),
            "text" => Some(Self::Text),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Lifecycle status of a stage instance. The planner only ever considers
/// `Pending` and `Active` stages (spec §3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Scheduled,
    Unscheduled,
    Other,
}

impl StageStatus {
    pub fn is_plannable(self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }
}

/// Status written back onto a stage once the applier commits a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Proposed,
}

/// One execution of a production step within a job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StageInstance {
    pub id: Uuid,
    pub job_id: Uuid,
    pub production_stage_id: Uuid,
    pub stage_order: Option<i32>,
    pub status: StageStatus,
    pub estimated_minutes: i64,
    pub setup_minutes: i64,
    pub part_assignment: Option<PartAssignment>,
    pub dependency_group: Option<String>,

    // Scheduling output, written by the applier.
    pub scheduled_start_at: Option<DateTime<Utc>>,
    pub scheduled_end_at: Option<DateTime<Utc>>,
    pub scheduled_minutes: Option<i64>,
    pub schedule_status: Option<ScheduleStatus>,
}

impl StageInstance {
    pub fn new(id: Uuid, job_id: Uuid, production_stage_id: Uuid) -> Self {
        Self {
            id,
            job_id,
            production_stage_id,
            stage_order: None,
            status: StageStatus::Pending,
            estimated_minutes: 0,
            setup_minutes: 0,
            part_assignment: None,
            dependency_group: None,
            scheduled_start_at: None,
            scheduled_end_at: None,
            scheduled_minutes: None,
            schedule_status: None,
        }
    }

    pub fn stage_order(mut self, order: i32) -> Self {
        self.stage_order = Some(order);
        self
    }

    pub fn estimated_minutes(mut self, minutes: i64) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    pub fn setup_minutes(mut self, minutes: i64) -> Self {
        self.setup_minutes = minutes;
        self
    }

    pub fn part_assignment(mut self, part: PartAssignment) -> Self {
        self.part_assignment = Some(part);
        self
    }

    pub fn dependency_group(mut self, group: impl Into<String>) -> Self {
        self.dependency_group = Some(group.into());
        self
    }

    /// `stage_order`, defaulting unset values to the back of the queue.
    pub fn effective_order(&self) -> i32 {
        self.stage_order.unwrap_or(DEFAULT_STAGE_ORDER)
    }

    /// `estimated_minutes + setup_minutes`, both clamped to non-negative
    /// (spec §4.4 edge cases) and rounded (arithmetic is already integer
    /// minutes, so rounding is a no-op; clamping is not).
    pub fn duration_minutes(&self) -> i64 {
        self.estimated_minutes.max(0) + self.setup_minutes.max(0)
    }

    pub fn is_unset(&self) -> bool {
        self.scheduled_start_at.is_none()
    }
}

// ============================================================================
// Calendar primitives
// ============================================================================

/// A working-hours window on one weekday. Multiple shifts for the same
/// weekday are unioned by the calendar (spec §4.1).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shift {
    /// 0 = Sunday .. 6 = Saturday, matching `chrono::Weekday::num_days_from_sunday`.
    pub day_of_week: u8,
    pub shift_start: chrono::NaiveTime,
    pub shift_end: chrono::NaiveTime,
    pub is_working_day: bool,
}

/// A daily break applied to every working shift that covers it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Break {
    pub start: chrono::NaiveTime,
    pub minutes: i64,
}

/// An entire calendar day excluded from scheduling.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

// ============================================================================
// Scheduling output
// ============================================================================

/// One placement produced by the planner: `(stage_id, start, end, minutes)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementUpdate {
    pub stage_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub minutes: i64,
}

/// Free-form attribute bag, kept for forward compatibility with upstream job
/// workflows that attach custom fields the planner doesn't interpret.
pub type Attributes = HashMap<String, String>;

use thiserror::Error;
use uuid::Uuid;

/// A fatal error that aborts a run before (or instead of) planning/applying.
/// Maps 1:1 onto the taxonomy in spec §7; `printsched-server` is responsible
/// for turning these into HTTP status codes.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Malformed flags: bad UUID, bad date, unknown flag value. 4xx.
    #[error("invalid input: {0}")]
    InputInvalid(String),

    /// Upstream snapshot read failed. 5xx, no writes performed.
    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    /// The nuclear wipe failed before planning began. Run aborts.
    #[error("nuclear wipe failed: {0}")]
    NuclearWipeFailed(String),
}

/// A non-fatal finding collected while planning or applying a single stage.
/// The run continues; these accumulate into the response (spec §7).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerIssue {
    /// `Calendar::place_duration` could not fit the stage's duration inside
    /// the configured horizon.
    #[error(
        "stage {stage_id} in job {job_id} could not be placed within the horizon \
         ({requested_minutes} minutes requested starting {earliest})"
    )]
    HorizonExhausted {
        stage_id: Uuid,
        job_id: Uuid,
        requested_minutes: i64,
        earliest: chrono::DateTime<chrono::Utc>,
    },

    /// A `dependency_group` or predecessor reference pointed at a stage
    /// instance absent from the job. Treated as no barrier.
    #[error(
        "stage {stage_id} in job {job_id} references predecessor '{reference}' \
         which is absent from the job; no barrier applied"
    )]
    PredecessorMissing {
        stage_id: Uuid,
        job_id: Uuid,
        reference: String,
    },

    /// A row-level write failed while applying the plan.
    #[error("failed to write stage {stage_id}: {reason}")]
    WriteFailed { stage_id: Uuid, reason: String },
}

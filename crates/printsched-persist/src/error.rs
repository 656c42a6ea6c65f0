use thiserror::Error;

/// Failures the snapshot source or plan writer can raise. Distinct from
/// `printsched_core::SchedulerError` because these originate at the I/O
/// boundary, not inside the pure planning pass.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("failed to write stage {stage_id}: {reason}")]
    WriteFailed { stage_id: uuid::Uuid, reason: String },

    #[error("nuclear wipe failed: {0}")]
    NuclearWipeFailed(String),
}

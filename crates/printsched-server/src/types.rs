//! Request/response JSON shapes for the run entrypoint (spec §6).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Body accepted by `POST /runs`. Field names and defaults match spec §6's
/// option table exactly.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    #[serde(default = "default_true")]
    pub commit: bool,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub only_if_unset: bool,
    #[serde(default)]
    pub nuclear: bool,
    #[serde(default)]
    pub wipe_all: bool,
    /// Local calendar date (`YYYY-MM-DD`); baseline for nuclear runs.
    #[serde(default)]
    pub start_from: Option<NaiveDate>,
    /// UUID strings; empty strings are filtered out before parsing.
    #[serde(default)]
    pub only_job_ids: Vec<String>,
    #[serde(default)]
    pub division: Option<String>,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            commit: true,
            proposed: false,
            only_if_unset: false,
            nuclear: false,
            wipe_all: false,
            start_from: None,
            only_job_ids: Vec::new(),
            division: None,
        }
    }
}

/// The fixed payload a cron-style trigger sends (spec §6).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronTrigger {
    pub commit: bool,
    pub only_if_unset: bool,
    pub source: String,
}

impl Default for CronTrigger {
    fn default() -> Self {
        Self {
            commit: true,
            only_if_unset: true,
            source: "cron_auto".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AppliedCounts {
    pub updated: usize,
}

/// `POST /runs` success body: `{ok, scheduled, applied: {updated}, baseStart}`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub ok: bool,
    pub scheduled: usize,
    pub applied: AppliedCounts,
    pub base_start: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

/// `{ok: false, error: <message>}` for both 4xx and 5xx failures.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

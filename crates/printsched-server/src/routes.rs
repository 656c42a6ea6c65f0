//! `POST /runs` and `POST /runs/cron` (spec §6).

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{AppliedCounts, CronTrigger, RunRequest, RunResponse};
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, LocalResult, TimeZone, Utc};
use printsched_persist::{run, RunOptions};
use std::collections::HashSet;
use uuid::Uuid;

pub async fn run_handler(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    execute(state, request).await
}

pub async fn cron_handler(State(state): State<AppState>) -> Result<Json<RunResponse>, ApiError> {
    let trigger = CronTrigger::default();
    tracing::info!(source = %trigger.source, "cron trigger fired");
    let request = RunRequest {
        commit: trigger.commit,
        only_if_unset: trigger.only_if_unset,
        ..RunRequest::default()
    };
    execute(state, request).await
}

async fn execute(state: AppState, request: RunRequest) -> Result<Json<RunResponse>, ApiError> {
    let options = build_run_options(&state, &request)?;
    let store = state.store.clone();
    let config = state.config.clone();

    let report = tokio::task::spawn_blocking(move || {
        let wipe_fn = |cutoff: Option<DateTime<Utc>>| store.wipe(cutoff);
        run(&*store, &*store, &config, Some(&wipe_fn), &options)
    })
    .await
    .map_err(|e| ApiError::SnapshotUnavailable(e.to_string()))??;

    Ok(Json(RunResponse {
        ok: true,
        scheduled: report.apply.written,
        applied: AppliedCounts { updated: report.apply.written },
        base_start: report.base_start.to_rfc3339(),
        issues: report.issues.iter().map(ToString::to_string).collect(),
    }))
}

fn build_run_options(state: &AppState, request: &RunRequest) -> Result<RunOptions, ApiError> {
    let mut only_job_ids = HashSet::new();
    for raw in &request.only_job_ids {
        if raw.trim().is_empty() {
            continue;
        }
        let id = Uuid::parse_str(raw).map_err(|_| ApiError::InputInvalid(format!("invalid job id: {raw}")))?;
        only_job_ids.insert(id);
    }

    let start_from = request
        .start_from
        .map(|date| {
            resolve_local_midnight(state, date)
                .ok_or_else(|| ApiError::InputInvalid(format!("invalid startFrom date: {date}")))
        })
        .transpose()?;

    Ok(RunOptions {
        commit: request.commit,
        as_proposed: request.proposed,
        only_if_unset: request.only_if_unset,
        nuclear: request.nuclear,
        wipe_all: request.wipe_all,
        start_from,
        only_job_ids: if only_job_ids.is_empty() { None } else { Some(only_job_ids) },
        division: request.division.clone(),
    })
}

fn resolve_local_midnight(state: &AppState, date: chrono::NaiveDate) -> Option<chrono::DateTime<Utc>> {
    let tz: chrono_tz::Tz = state.config.local_timezone.parse().ok()?;
    let naive = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

//! printsched CLI - offline runs against a JSON snapshot file.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use printsched_core::SchedulerConfig;
use printsched_persist::{run, InMemoryStore, RunOptions, Snapshot};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "printsched")]
#[command(author, version, about = "Print-production scheduler", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan and optionally apply against a JSON snapshot file.
    Run {
        /// Path to a JSON-encoded `printsched_persist::Snapshot`.
        snapshot: PathBuf,

        /// Path to a TOML `SchedulerConfig`; defaults embedded if omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Persist updates (omit for a dry run).
        #[arg(long)]
        commit: bool,

        /// Mark written rows `schedule_status="proposed"`.
        #[arg(long)]
        proposed: bool,

        /// Skip rows whose `scheduled_start_at` is already set.
        #[arg(long)]
        only_if_unset: bool,

        /// Wipe prior scheduling output before planning.
        #[arg(long)]
        nuclear: bool,

        /// With `--nuclear`, wipe unconditionally rather than only from `start-from`.
        #[arg(long)]
        wipe_all: bool,

        /// Baseline local date (`YYYY-MM-DD`) for nuclear runs.
        #[arg(long)]
        start_from: Option<NaiveDate>,

        /// Restrict planning to these job ids (comma-separated UUIDs).
        #[arg(long, value_delimiter = ',')]
        only_job_ids: Vec<String>,

        /// Restrict planning to one division.
        #[arg(long)]
        division: Option<String>,

        /// Write the resulting snapshot (with applied placements) here.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the placements and issues a run would produce, without writing anything.
    Inspect {
        snapshot: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            snapshot,
            config,
            commit,
            proposed,
            only_if_unset,
            nuclear,
            wipe_all,
            start_from,
            only_job_ids,
            division,
            out,
        } => cmd_run(
            &snapshot,
            config.as_deref(),
            commit,
            proposed,
            only_if_unset,
            nuclear,
            wipe_all,
            start_from,
            &only_job_ids,
            division,
            out.as_deref(),
        ),
        Commands::Inspect { snapshot, config } => cmd_inspect(&snapshot, config.as_deref()),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<SchedulerConfig> {
    let Some(path) = path else {
        return Ok(SchedulerConfig::default());
    };
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading config at {}", path.display()))?;
    SchedulerConfig::from_toml(&raw).with_context(|| format!("parsing config at {}", path.display()))
}

fn load_snapshot(path: &std::path::Path) -> Result<Snapshot> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading snapshot at {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot at {}", path.display()))
}

fn store_from_snapshot(snapshot: Snapshot) -> InMemoryStore {
    InMemoryStore::new(
        snapshot.shifts,
        snapshot.breaks,
        snapshot.holidays,
        snapshot.production_stages,
        snapshot.jobs,
        snapshot.stages,
    )
}

fn resolve_local_midnight(config: &SchedulerConfig, date: NaiveDate) -> Result<DateTime<Utc>> {
    let tz: chrono_tz::Tz = config
        .local_timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid local_timezone in config: {}", config.local_timezone))?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .context("building midnight instant")?;
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        chrono::LocalResult::None => bail!("startFrom {date} does not exist in {}", config.local_timezone),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    snapshot_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    commit: bool,
    proposed: bool,
    only_if_unset: bool,
    nuclear: bool,
    wipe_all: bool,
    start_from: Option<NaiveDate>,
    only_job_ids: &[String],
    division: Option<String>,
    out_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let snapshot = load_snapshot(snapshot_path)?;
    let store = store_from_snapshot(snapshot);

    let start_from = start_from.map(|date| resolve_local_midnight(&config, date)).transpose()?;

    let mut ids = HashSet::new();
    for raw in only_job_ids {
        if raw.trim().is_empty() {
            continue;
        }
        ids.insert(Uuid::parse_str(raw).with_context(|| format!("invalid job id: {raw}"))?);
    }

    let options = RunOptions {
        commit,
        as_proposed: proposed,
        only_if_unset,
        nuclear,
        wipe_all,
        start_from,
        only_job_ids: if ids.is_empty() { None } else { Some(ids) },
        division,
    };

    let wipe_fn = |cutoff: Option<DateTime<Utc>>| store.wipe(cutoff);
    let report = run(&store, &store, &config, Some(&wipe_fn), &options).context("run failed")?;

    println!(
        "applied: written={} skipped={} wiped={} issues={}",
        report.apply.written,
        report.apply.skipped_already_set,
        report.wiped,
        report.issues.len()
    );
    for issue in &report.issues {
        eprintln!("issue: {issue}");
    }

    if let Some(out_path) = out_path {
        let stages = store.stage_snapshot();
        let json = serde_json::to_string_pretty(&stages).context("serializing result")?;
        std::fs::write(out_path, json).with_context(|| format!("writing {}", out_path.display()))?;
        println!("wrote {}", out_path.display());
    }

    Ok(())
}

fn cmd_inspect(snapshot_path: &std::path::Path, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let snapshot = load_snapshot(snapshot_path)?;
    let store = store_from_snapshot(snapshot);

    let options = RunOptions {
        commit: false,
        ..RunOptions::default()
    };
    let report = run(&store, &store, &config, None, &options).context("dry run failed")?;

    println!("would write {} stage(s)", report.apply.written);
    for issue in &report.issues {
        println!("issue: {issue}");
    }
    Ok(())
}

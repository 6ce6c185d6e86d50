use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use tracing::debug;
use zonesched_core::{
    prioritize_tasks, validate_request, CandidateSlot, EngineConfig, PoolStats, ScheduleRequest,
    SchedulingEngine,
};

use super::load_config;

/// Request input shared by `plan` and `slots`.
#[derive(Args)]
pub struct RequestArgs {
    /// JSON file holding tasks, zones, commitments and optional profiles
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
    /// First day of the horizon (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Number of days to search
    #[arg(long)]
    pub days: Option<u32>,
    /// Slot length in minutes
    #[arg(long)]
    pub slot_minutes: Option<u32>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// Place tasks in file order instead of by urgency
    #[arg(long)]
    pub keep_order: bool,
}

#[derive(Args)]
pub struct SlotsArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

struct Prepared {
    engine: SchedulingEngine,
    request: ScheduleRequest,
    start: NaiveDate,
}

fn prepare(
    args: &RequestArgs,
    config_path: Option<&Path>,
) -> Result<Prepared, Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let mut engine_config: EngineConfig = config.engine_config();
    if let Some(days) = args.days {
        engine_config.horizon_days = days;
    }
    if let Some(minutes) = args.slot_minutes {
        engine_config.slot_duration = Duration::minutes(i64::from(minutes));
    }

    let content = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("cannot read {}: {e}", args.input.display()))?;
    let request: ScheduleRequest = serde_json::from_str(&content)?;
    validate_request(&request, &engine_config)?;

    let start = args.start.unwrap_or_else(|| Utc::now().date_naive());
    debug!(
        input = %args.input.display(),
        tasks = request.tasks.len(),
        zones = request.zones.len(),
        commitments = request.commitments.len(),
        %start,
        "request loaded"
    );

    Ok(Prepared {
        engine: SchedulingEngine::with_config(engine_config),
        request,
        start,
    })
}

fn describe_slot(slot: &CandidateSlot) -> String {
    let origin = match slot.zone_id() {
        Some(zone) => format!("zone:{zone}"),
        None => "non-zone".to_string(),
    };
    format!(
        "{}-{}  {origin}",
        slot.start.format("%Y-%m-%d %H:%M"),
        slot.end.format("%H:%M")
    )
}

fn describe_stats(stats: &PoolStats) -> String {
    let fallback = stats.fallback.map_or("none", |reason| reason.label());
    format!(
        "zone slots: {}, non-zone slots: {}, fallback: {fallback}",
        stats.zone_slots, stats.non_zone_slots
    )
}

pub fn run_plan(
    args: PlanArgs,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Prepared {
        engine,
        mut request,
        start,
    } = prepare(&args.request, config_path)?;

    if !args.keep_order {
        request.tasks = prioritize_tasks(&request.tasks, Utc::now());
    }

    let outcome = engine.schedule(&request, start);

    if args.request.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "placed {} of {} tasks ({})",
        outcome.placements.len(),
        request.tasks.len(),
        describe_stats(&outcome.pool_stats)
    );
    for placement in &outcome.placements {
        let task = request.tasks.iter().find(|t| t.id == placement.task_id);
        println!(
            "  {}  {}  score {}",
            describe_slot(&placement.slot),
            task.map_or(placement.task_id.as_str(), |t| t.label()),
            placement.score
        );
    }
    if !outcome.unplaced.is_empty() {
        println!("unplaced: {}", outcome.unplaced.join(", "));
    }
    Ok(())
}

pub fn run_slots(
    args: SlotsArgs,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Prepared {
        engine,
        request,
        start,
    } = prepare(&args.request, config_path)?;

    let pool = engine.candidate_pool(&request, start);

    if args.request.json {
        println!("{}", serde_json::to_string_pretty(&pool)?);
        return Ok(());
    }

    println!("{} candidate slots ({})", pool.len(), describe_stats(&pool.stats));
    for slot in &pool.slots {
        println!("  {}", describe_slot(slot));
    }
    Ok(())
}

//! Simulation orchestration: builds the four-stage pipeline, generates and
//! shuffles the vehicle population, and drives one task per vehicle through
//! every stage in order.

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::log::{EventLog, EventSink, StdoutSink};
use crate::stage::Stage;
use crate::vehicle::{Category, Vehicle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::task::JoinSet;
use tracing::info;

/// Label for the concurrency discipline used by [`run_simulation`].
pub const STRATEGY: &str = "guarded counters + semaphore slot pools";

/// Aggregate result of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    /// Vehicles driven through the full pipeline.
    pub total_vehicles: usize,

    /// Wall-clock time from first spawn to last completion.
    pub elapsed: Duration,

    /// Concurrency discipline that produced this result.
    pub strategy: String,
}

/// Build the unshuffled vehicle population from per-category counts.
///
/// Ids are sequential starting at 1; the category A block comes first,
/// then B, then C.
pub fn build_population(cfg: &SimConfig) -> Vec<Vehicle> {
    let counts = [
        (Category::A, cfg.vehicles_a),
        (Category::B, cfg.vehicles_b),
        (Category::C, cfg.vehicles_c),
    ];

    let mut vehicles = Vec::with_capacity(cfg.total_vehicles());
    let mut id = 1u32;
    for (category, count) in counts {
        for _ in 0..count {
            vehicles.push(Vehicle::new(id, category));
            id += 1;
        }
    }
    vehicles
}

/// Resolve the effective seed: an explicit non-zero seed is used as-is,
/// zero derives one from the current time.
pub fn effective_seed(cfg: &SimConfig) -> u64 {
    if cfg.seed != 0 {
        return cfg.seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

/// Population in final arrival order for the supplied master RNG.
pub fn shuffled_population(cfg: &SimConfig, rng: &mut StdRng) -> Vec<Vehicle> {
    let mut vehicles = build_population(cfg);
    vehicles.shuffle(rng);
    vehicles
}

/// Run the four-stage workshop simulation to completion, with event lines
/// going to stdout when `logs` is enabled.
pub async fn run_simulation(cfg: SimConfig, logs: bool) -> Result<SimStats> {
    run_simulation_with_sink(cfg, logs, Arc::new(StdoutSink)).await
}

/// Same as [`run_simulation`] but with a caller-supplied event sink.
pub async fn run_simulation_with_sink(
    cfg: SimConfig,
    logs: bool,
    sink: Arc<dyn EventSink>,
) -> Result<SimStats> {
    let seed = effective_seed(&cfg);
    let mut rng = StdRng::seed_from_u64(seed);
    let log = Arc::new(EventLog::with_sink(logs, sink));

    let stages: Vec<Arc<Stage>> = cfg
        .stage_specs()
        .into_iter()
        .map(|spec| Stage::new(spec, cfg.clone(), Arc::clone(&log)))
        .collect();

    let vehicles = shuffled_population(&cfg, &mut rng);
    let total = vehicles.len();
    info!(total, seed, strategy = STRATEGY, "starting workshop simulation");

    let start = Instant::now();
    let mut tasks = JoinSet::new();
    for vehicle in vehicles {
        let stages = stages.clone();
        // Single-owner randomness per task keeps the run reproducible
        // without synchronizing on a shared generator.
        let task_seed: u64 = rng.gen();
        tasks.spawn(async move {
            let mut rng = StdRng::seed_from_u64(task_seed);
            for stage in &stages {
                let pass = stage.enter(vehicle).await?;
                stage.work(&vehicle, &mut rng).await;
                pass.release();
            }
            Ok::<(), SimError>(())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        // A panicked or failed vehicle task is fatal to the whole run.
        joined??;
    }

    let stats = SimStats {
        total_vehicles: total,
        elapsed: start.elapsed(),
        strategy: STRATEGY.to_string(),
    };
    info!(
        total = stats.total_vehicles,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "simulation complete"
    );
    Ok(stats)
}

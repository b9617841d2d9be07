//! Workshop Core - four-stage vehicle workshop pipeline simulation
//!
//! Simulates vehicles flowing through a fixed pipeline of workshop stages
//! (arrival, mechanic, cleaning, delivery). Each stage has a bounded number
//! of concurrent service slots and a bounded waiting room; one concurrent
//! task per vehicle traverses the stages in order.
//!
//! - [`Stage`]: admission/service unit with semaphore-backed slot pools
//! - [`run_simulation`]: orchestrator taking a [`SimConfig`] and returning [`SimStats`]
//! - [`EventLog`]: thread-safe ENTRA/SALE event sink

pub mod config;
pub mod duration;
pub mod error;
pub mod fakes;
pub mod log;
pub mod simulation;
pub mod stage;
pub mod telemetry;
pub mod vehicle;

// Re-export key types
pub use config::{SimConfig, StageSpec};
pub use error::{Result, SimError};
pub use log::{EventLog, EventSink, StdoutSink, Transition};
pub use simulation::{
    build_population, effective_seed, run_simulation, run_simulation_with_sink,
    shuffled_population, SimStats, STRATEGY,
};
pub use stage::{Stage, StageId, StageMetrics, StagePass};
pub use telemetry::init_tracing;
pub use vehicle::{Category, Incident, Vehicle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

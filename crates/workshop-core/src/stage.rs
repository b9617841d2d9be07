//! Admission and service control for one workshop stage.
//!
//! A stage admits at most `capacity` vehicles concurrently and bounds its
//! waiting room to `max_queue` vehicles. Admission is a two-gate protocol:
//! a waiting-room slot must be held before the vehicle may wait for one of
//! the capacity slots, and the waiting-room slot is only given back once a
//! capacity slot is acquired. Vehicles beyond the waiting-room bound wait
//! outside it, uncounted — `max_queue` bounds the counted population, not
//! every vehicle effectively waiting for a slot.

use crate::config::{SimConfig, StageSpec};
use crate::duration;
use crate::error::{Result, SimError};
use crate::log::{EventLog, Transition};
use crate::vehicle::Vehicle;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// Pipeline position of a stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Arrival,
    Mechanic,
    Cleaning,
    Delivery,
}

impl StageId {
    /// The four stages in pipeline order.
    pub const PIPELINE: [StageId; 4] = [
        StageId::Arrival,
        StageId::Mechanic,
        StageId::Cleaning,
        StageId::Delivery,
    ];

    /// Name used in event lines.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Arrival => "Arrival",
            StageId::Mechanic => "Mechanic",
            StageId::Cleaning => "Cleaning",
            StageId::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
struct Counters {
    queued: usize,
    peak_queued: usize,
    in_service: usize,
    peak_in_service: usize,
}

/// Point-in-time snapshot of a stage's occupancy counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageMetrics {
    /// Vehicles currently counted as waiting.
    pub queued: usize,

    /// Highest waiting count observed so far.
    pub peak_queued: usize,

    /// Vehicles currently holding a capacity slot.
    pub in_service: usize,

    /// Highest concurrent occupancy observed so far.
    pub peak_in_service: usize,
}

/// One workshop stage: a bounded pool of capacity slots plus a bounded
/// waiting room.
///
/// Both gates are counting semaphores, so waiters park until signalled
/// instead of polling. The occupancy counters sit behind one mutex that is
/// never held across an await point.
pub struct Stage {
    id: StageId,
    capacity: usize,
    max_queue: usize,
    queue_slots: Arc<Semaphore>,
    service_slots: Arc<Semaphore>,
    counters: Mutex<Counters>,
    cfg: SimConfig,
    log: Arc<EventLog>,
}

impl Stage {
    /// Build a stage from its descriptor.
    pub fn new(spec: StageSpec, cfg: SimConfig, log: Arc<EventLog>) -> Arc<Self> {
        debug!(stage = %spec.id, capacity = spec.capacity, max_queue = spec.max_queue, "stage ready");
        Arc::new(Self {
            id: spec.id,
            capacity: spec.capacity,
            max_queue: spec.max_queue,
            queue_slots: Arc::new(Semaphore::new(spec.max_queue)),
            service_slots: Arc::new(Semaphore::new(spec.capacity)),
            counters: Mutex::new(Counters::default()),
            cfg,
            log,
        })
    }

    /// Pipeline position of this stage.
    pub fn id(&self) -> StageId {
        self.id
    }

    /// Configured concurrent occupancy bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured waiting-room bound.
    pub fn max_queue(&self) -> usize {
        self.max_queue
    }

    /// Snapshot of the occupancy counters.
    pub fn metrics(&self) -> StageMetrics {
        let counters = self.counters.lock().unwrap();
        StageMetrics {
            queued: counters.queued,
            peak_queued: counters.peak_queued,
            in_service: counters.in_service,
            peak_in_service: counters.peak_in_service,
        }
    }

    /// Admit a vehicle into the stage.
    ///
    /// Waits for a waiting-room slot, then for a capacity slot. The vehicle
    /// counts toward the waiting-room bound from the moment it holds the
    /// first gate until the capacity slot is acquired. Logs the `ENTRA`
    /// event once admitted and returns a [`StagePass`] whose drop logs
    /// `SALE` and frees the slot.
    pub async fn enter(self: &Arc<Self>, vehicle: Vehicle) -> Result<StagePass> {
        let queue_slot = self
            .queue_slots
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SimError::StageClosed { stage: self.id })?;

        {
            let mut counters = self.counters.lock().unwrap();
            counters.queued += 1;
            counters.peak_queued = counters.peak_queued.max(counters.queued);
        }

        let slot = self
            .service_slots
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SimError::StageClosed { stage: self.id })?;

        {
            let mut counters = self.counters.lock().unwrap();
            counters.queued -= 1;
            counters.in_service += 1;
            counters.peak_in_service = counters.peak_in_service.max(counters.in_service);
        }
        drop(queue_slot);

        self.log.record(&vehicle, self.id, Transition::Enter);

        Ok(StagePass {
            stage: Arc::clone(self),
            vehicle,
            _slot: slot,
        })
    }

    /// Simulated service: suspend for the vehicle's jittered duration.
    ///
    /// Runs while the caller already holds a capacity slot from
    /// [`Stage::enter`]; no concurrency control inside.
    pub async fn work<R: Rng>(&self, vehicle: &Vehicle, rng: &mut R) {
        let base = duration::base_duration(&self.cfg, vehicle.category);
        tokio::time::sleep(duration::jittered(base, self.cfg.jitter_ms, rng)).await;
    }
}

/// Capacity-slot pass returned by [`Stage::enter`].
///
/// Dropping the pass logs the `SALE` event and returns the slot, so release
/// happens exactly once on every exit path through a stage visit.
pub struct StagePass {
    stage: Arc<Stage>,
    vehicle: Vehicle,
    // Dropped after the Drop body runs, freeing the slot last.
    _slot: OwnedSemaphorePermit,
}

impl StagePass {
    /// Leave the stage explicitly.
    pub fn release(self) {}
}

impl Drop for StagePass {
    fn drop(&mut self) {
        self.stage
            .log
            .record(&self.vehicle, self.stage.id, Transition::Exit);
        let mut counters = self.stage.counters.lock().unwrap();
        counters.in_service -= 1;
    }
}

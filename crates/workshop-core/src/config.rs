//! Simulation configuration and the ordered stage descriptor list.

use crate::stage::StageId;
use crate::vehicle::Category;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable simulation configuration. Read-only after construction.
///
/// Durations are expressed in milliseconds so a configuration can be read
/// from plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Concurrent bays shared by the arrival, cleaning and delivery stages.
    pub bays: usize,

    /// Concurrent mechanics (capacity of the mechanic stage).
    pub mechanics: usize,

    /// Waiting-room bound for the arrival stage.
    pub max_queue_arrival: usize,

    /// Waiting-room bound for the mechanic stage.
    pub max_queue_mechanic: usize,

    /// Waiting-room bound for the cleaning stage.
    pub max_queue_cleaning: usize,

    /// Waiting-room bound for the delivery stage.
    pub max_queue_delivery: usize,

    /// Vehicles to generate per category.
    pub vehicles_a: usize,
    pub vehicles_b: usize,
    pub vehicles_c: usize,

    /// Symmetric jitter applied to base service durations, in milliseconds.
    pub jitter_ms: u64,

    /// Random seed; 0 derives one from the current time.
    pub seed: u64,

    /// Base service durations per category, in milliseconds.
    pub base_a_ms: u64,
    pub base_b_ms: u64,
    pub base_c_ms: u64,
}

impl SimConfig {
    /// Base service duration for a category.
    pub fn base_duration(&self, category: Category) -> Duration {
        let millis = match category {
            Category::A => self.base_a_ms,
            Category::B => self.base_b_ms,
            Category::C => self.base_c_ms,
        };
        Duration::from_millis(millis)
    }

    /// Ordered descriptors for the four-stage pipeline.
    ///
    /// Stage count and order are configuration data here, not structure;
    /// the orchestrator builds one stage per descriptor, in order.
    pub fn stage_specs(&self) -> Vec<StageSpec> {
        vec![
            StageSpec {
                id: StageId::Arrival,
                capacity: self.bays,
                max_queue: self.max_queue_arrival,
            },
            StageSpec {
                id: StageId::Mechanic,
                capacity: self.mechanics,
                max_queue: self.max_queue_mechanic,
            },
            StageSpec {
                id: StageId::Cleaning,
                capacity: self.bays,
                max_queue: self.max_queue_cleaning,
            },
            StageSpec {
                id: StageId::Delivery,
                capacity: self.bays,
                max_queue: self.max_queue_delivery,
            },
        ]
    }

    /// Total vehicle population across all categories.
    pub fn total_vehicles(&self) -> usize {
        self.vehicles_a + self.vehicles_b + self.vehicles_c
    }
}

impl Default for SimConfig {
    /// Baseline workload: 5 bays, 3 mechanics, queues of 10, 10 vehicles
    /// per category, 500 ms jitter, 5 s / 3 s / 1 s base durations.
    fn default() -> Self {
        Self {
            bays: 5,
            mechanics: 3,
            max_queue_arrival: 10,
            max_queue_mechanic: 10,
            max_queue_cleaning: 10,
            max_queue_delivery: 10,
            vehicles_a: 10,
            vehicles_b: 10,
            vehicles_c: 10,
            jitter_ms: 500,
            seed: 0,
            base_a_ms: 5_000,
            base_b_ms: 3_000,
            base_c_ms: 1_000,
        }
    }
}

/// Capacity and waiting-room bound for one pipeline stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageSpec {
    /// Pipeline position of the stage.
    pub id: StageId,

    /// Maximum concurrent occupants.
    pub capacity: usize,

    /// Maximum vehicles counted as waiting.
    pub max_queue: usize,
}

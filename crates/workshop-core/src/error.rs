//! Error types for simulation operations

use crate::stage::StageId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// A stage's admission semaphore was closed while a vehicle waited on it.
    /// Nothing in this crate closes stage semaphores, so this only surfaces
    /// if an embedder shuts a stage down out from under running tasks.
    #[error("stage {stage} stopped admitting vehicles")]
    StageClosed { stage: StageId },

    #[error("vehicle task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

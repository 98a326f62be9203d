//! Single-flight guard for content generation.
//!
//! One permit, shared by every path that can start a generation. The permit is
//! held by a guard and returned on drop, so completion, error and panic all
//! release it.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Clone)]
pub struct GenerationGate {
    permits: Arc<Semaphore>,
}

/// Proof that the caller owns the in-flight slot. Dropping it frees the slot.
#[must_use = "the generation slot is released as soon as the guard is dropped"]
pub struct GenerationGuard {
    _permit: OwnedSemaphorePermit,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Claims the slot, or `None` if a generation is already running.
    /// Never waits: an overlapping trigger is refused, not queued.
    pub fn try_begin(&self) -> Option<GenerationGuard> {
        self.permits
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| GenerationGuard { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.permits.available_permits() == 0
    }
}

impl Default for GenerationGate {
    fn default() -> Self {
        Self::new()
    }
}

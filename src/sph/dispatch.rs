use super::error::{Result, SphError};

/// How the density and force passes of a tick are evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Plain loops over particle indices on the calling thread.
    Serial,
    /// Data parallel map over the engine's worker pool with a barrier after each pass.
    Parallel,
}

/// Particle counts up to this are processed serially. Below it pool overhead dominates.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Used if the available hardware parallelism can't be queried.
pub const FALLBACK_WORKER_COUNT: usize = 4;

pub fn choose_strategy(num_particles: usize) -> ExecutionStrategy {
    if num_particles <= PARALLEL_THRESHOLD {
        ExecutionStrategy::Serial
    } else {
        ExecutionStrategy::Parallel
    }
}

pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_WORKER_COUNT)
}

pub(super) fn build_worker_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    tracing::debug!(num_threads, "building worker pool");
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("sph-worker-{}", i))
        .build()
        .map_err(|e| SphError::ThreadPool(e.to_string()))
}

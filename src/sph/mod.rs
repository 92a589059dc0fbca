pub use self::config::SphConfig;
pub use self::dispatch::{choose_strategy, worker_count, ExecutionStrategy, PARALLEL_THRESHOLD};
pub use self::engine::SphEngine;
pub use self::error::{Result, SphError};
pub use self::particle::Particle;
pub use self::smoothing_kernel::*;

mod config;
mod dispatch;
mod engine;
mod error;
mod particle;
pub mod scene;
pub mod smoothing_kernel;
pub mod spatial_grid;

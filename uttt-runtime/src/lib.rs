//! uttt-runtime: batched guided self-play across worker threads.
//!
//! One dispatcher hands tasks to N workers; each worker plays whole games,
//! parking its evaluation requests in a per-worker slot; one predictor
//! collects parked requests into batches, evaluates them, and scatters the
//! results back. All coordination is atomics plus sleeps, no locks.

pub mod config;
pub mod dispatcher;
pub mod predictor;
pub mod scheduler;
pub mod slot;
pub mod task;
pub mod worker;

pub use config::{load_config, ConfigError, RuntimeConfig};
pub use scheduler::{run_scheduler, SchedulerReport};
pub use task::Task;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}

#[cfg(test)]
mod runtime_tests;

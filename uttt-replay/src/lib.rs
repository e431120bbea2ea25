//! uttt-replay: per-decision evaluation records and their NDJSON writer.
//!
//! Every decision a self-play driver takes is persisted as one JSON line:
//! the searched state, its root statistics, and the statistics of every
//! evaluated child action. Downstream training consumes these files.

pub mod record;
pub mod writer;

pub use record::{
    GuidedActionRecord, GuidedDecisionRecord, RolloutActionRecord, RolloutDecisionRecord,
};
pub use writer::{EvaluationWriter, ReplayError};

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

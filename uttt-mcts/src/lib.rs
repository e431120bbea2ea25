//! uttt-mcts: tree search for Ultimate Tic-Tac-Toe self-play.
//!
//! Two algorithms over one shared tree structure:
//! - `rollout::RolloutMcts` — UCT selection + uniform random playouts
//! - `guided::GuidedMcts` — PUCT selection + an external evaluator
//!
//! The tree owns one `GameState` snapshot per node and supports move-to-move
//! reuse: `Tree::synchronize` re-roots onto the child matching the executed
//! move, so accumulated statistics carry forward.

pub mod encode;
pub mod eval;
pub mod guided;
pub mod policy;
pub mod rollout;
pub mod tree;

pub use encode::{encode_state, EncodedState, ENCODED_LEN, POLICY_LEN};
pub use eval::{BatchEvaluator, Evaluator, UniformEvaluator};
pub use policy::{PolicyError, SelectionPolicy};

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
mod guided_tests;
#[cfg(test)]
mod rollout_tests;
#[cfg(test)]
mod tree_tests;

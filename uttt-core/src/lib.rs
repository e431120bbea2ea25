//! uttt-core: Ultimate Tic-Tac-Toe rules, state representation, and state codec.

pub mod action;
pub mod codec;
pub mod engine;
pub mod state;

pub use action::{Action, ActionError};
pub use codec::{parse_state, to_digits, StateParseError};
pub use engine::{apply_action, legal_actions, ApplyError};
pub use state::{
    GameState, CELLS, CONSTRAINT_INDEX, DRAW_VALUE, NEXT_SYMBOL_INDEX, O_VALUE, RESULT_INDEX,
    STATE_SIZE, SUBGAMES, UNCONSTRAINED_VALUE, X_VALUE,
};

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

//! Moves: a (symbol, cell index) pair.

use std::fmt;

use thiserror::Error;

use crate::state::{CELLS, O_VALUE, X_VALUE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("invalid symbol tag {0} (expected {X_VALUE} or {O_VALUE})")]
    InvalidSymbol(u8),
    #[error("cell index {0} out of range 0..{CELLS}")]
    IndexOutOfRange(u8),
}

/// One move: which symbol is placed into which of the 81 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub symbol: u8,
    pub index: u8,
}

impl Action {
    /// Validating constructor for externally supplied moves.
    pub fn new(symbol: u8, index: u8) -> Result<Self, ActionError> {
        if symbol != X_VALUE && symbol != O_VALUE {
            return Err(ActionError::InvalidSymbol(symbol));
        }
        if index as usize >= CELLS {
            return Err(ActionError::IndexOutOfRange(index));
        }
        Ok(Self { symbol, index })
    }

    pub(crate) fn new_unchecked(symbol: u8, index: u8) -> Self {
        debug_assert!(symbol == X_VALUE || symbol == O_VALUE);
        debug_assert!((index as usize) < CELLS);
        Self { symbol, index }
    }

    pub fn is_symbol_x(&self) -> bool {
        self.symbol == X_VALUE
    }

    pub fn is_symbol_o(&self) -> bool {
        self.symbol == O_VALUE
    }

    /// Subgame this move lands in.
    pub fn subgame(&self) -> u8 {
        self.index / 9
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = if self.is_symbol_x() { "X" } else { "O" };
        write!(f, "Action(symbol={}, index={})", symbol, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_symbol_and_index() {
        assert_eq!(Action::new(0, 5), Err(ActionError::InvalidSymbol(0)));
        assert_eq!(Action::new(3, 5), Err(ActionError::InvalidSymbol(3)));
        assert_eq!(Action::new(X_VALUE, 81), Err(ActionError::IndexOutOfRange(81)));
        let a = Action::new(O_VALUE, 80).unwrap();
        assert!(a.is_symbol_o());
        assert_eq!(a.subgame(), 8);
    }
}

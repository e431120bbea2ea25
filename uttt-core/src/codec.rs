//! 93-digit encoding-string codec.
//!
//! One ASCII digit per state cell; the character value equals the cell's
//! small-integer tag. This is the wire form used in task descriptors.

use thiserror::Error;

use crate::state::{
    GameState, CELLS, CONSTRAINT_INDEX, DRAW_VALUE, NEXT_SYMBOL_INDEX, O_VALUE, RESULT_INDEX,
    STATE_SIZE, UNCONSTRAINED_VALUE, X_VALUE,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateParseError {
    #[error("encoded state must be {STATE_SIZE} characters, got {0}")]
    BadLength(usize),
    #[error("non-digit character {0:?} at position {1}")]
    NotADigit(char, usize),
    #[error("cell {index} holds invalid tag {value}")]
    BadCellValue { index: usize, value: u8 },
}

/// Parse a 93-digit encoding string into a state, fail-fast on any
/// out-of-range cell tag.
pub fn parse_state(encoded: &str) -> Result<GameState, StateParseError> {
    if encoded.chars().count() != STATE_SIZE {
        return Err(StateParseError::BadLength(encoded.chars().count()));
    }
    let mut cells = [0u8; STATE_SIZE];
    for (i, ch) in encoded.chars().enumerate() {
        let value = ch
            .to_digit(10)
            .ok_or(StateParseError::NotADigit(ch, i))? as u8;
        let valid = match i {
            0..=80 => value <= O_VALUE,
            NEXT_SYMBOL_INDEX => value == X_VALUE || value == O_VALUE,
            CONSTRAINT_INDEX => value <= UNCONSTRAINED_VALUE,
            RESULT_INDEX => value <= DRAW_VALUE,
            // 81..90: subgame results
            _ => value <= DRAW_VALUE,
        };
        if !valid {
            return Err(StateParseError::BadCellValue { index: i, value });
        }
        cells[i] = value;
    }
    Ok(GameState::from_cells(cells))
}

/// Render a state as its 93-digit encoding string.
pub fn to_digits(state: &GameState) -> String {
    state
        .cells()
        .iter()
        .map(|&c| char::from(b'0' + c))
        .collect()
}

//! Rules engine: state transitions and legal-move enumeration.
//!
//! This module is the single place that mutates `GameState` via rules.

use thiserror::Error;

use crate::action::Action;
use crate::state::{
    GameState, CELLS, CONSTRAINT_INDEX, DRAW_VALUE, NEXT_SYMBOL_INDEX, O_VALUE, RESULT_INDEX,
    SUBGAMES, UNCONSTRAINED_VALUE, X_VALUE,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("action {action} is not the next mover's")]
    WrongSymbol { action: Action },
    #[error("action {action} targets an occupied cell")]
    CellOccupied { action: Action },
    #[error("action {action} violates the current constraint")]
    WrongSubgame { action: Action },
    #[error("game is already decided")]
    GameOver,
}

/// Apply an externally supplied action after full legality validation.
pub fn apply_action(state: &GameState, action: Action) -> Result<GameState, ApplyError> {
    if state.is_terminal() {
        return Err(ApplyError::GameOver);
    }
    if action.symbol != state.next_symbol() {
        return Err(ApplyError::WrongSymbol { action });
    }
    let subgame = action.subgame();
    let allowed = if state.is_constrained() {
        subgame == state.constraint()
    } else {
        state.subgame_result(subgame as usize) == 0
    };
    if !allowed {
        return Err(ApplyError::WrongSubgame { action });
    }
    if state.cells()[action.index as usize] != 0 {
        return Err(ApplyError::CellOccupied { action });
    }
    Ok(play(state, action))
}

/// Apply a known-legal action (one produced by `legal_actions` on `state`).
///
/// Writes the stone, re-evaluates the affected subgame and (if its result
/// changed) the meta-board, flips the mover, and sets the next constraint.
pub fn play(state: &GameState, action: Action) -> GameState {
    let mut next = *state;
    let cells = next.cells_mut();
    cells[action.index as usize] = action.symbol;
    update_results(cells, action.symbol, action.index as usize);
    toggle_next_symbol(cells);
    set_next_constraint(cells, action.index as usize);
    next
}

/// All legal actions in `state`; empty when the game is decided.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let mut indexes = Vec::with_capacity(CELLS);
    legal_indexes_into(state, &mut indexes);
    let symbol = state.next_symbol();
    indexes
        .into_iter()
        .map(|i| Action::new_unchecked(symbol, i))
        .collect()
}

/// Collect legal cell indices into `out` (cleared first).
///
/// Constrained: the empty cells of the one designated subgame. Unconstrained:
/// the empty cells of every undecided subgame.
pub fn legal_indexes_into(state: &GameState, out: &mut Vec<u8>) {
    out.clear();
    if state.is_terminal() {
        return;
    }
    let cells = state.cells();
    if state.is_constrained() {
        let offset = state.constraint() as usize * SUBGAMES;
        for j in 0..SUBGAMES {
            if cells[offset + j] == 0 {
                out.push((offset + j) as u8);
            }
        }
    } else {
        for subgame in 0..SUBGAMES {
            if cells[CELLS + subgame] == 0 {
                let offset = subgame * SUBGAMES;
                for j in 0..SUBGAMES {
                    if cells[offset + j] == 0 {
                        out.push((offset + j) as u8);
                    }
                }
            }
        }
    }
}

/// Three-in-a-row test over one 9-cell board (a subgame or the meta-board).
///
/// The 8 line patterns, factored by the cell they pivot on: the 4 lines
/// through the center, the 2 remaining through the top-left corner, and the
/// 2 remaining through the bottom-right corner.
fn is_winning(board: &[u8], symbol: u8) -> bool {
    (symbol == board[4]
        && ((symbol == board[0] && symbol == board[8])
            || (symbol == board[2] && symbol == board[6])
            || (symbol == board[1] && symbol == board[7])
            || (symbol == board[3] && symbol == board[5])))
        || (symbol == board[0]
            && ((symbol == board[1] && symbol == board[2])
                || (symbol == board[3] && symbol == board[6])))
        || (symbol == board[8]
            && ((symbol == board[2] && symbol == board[5])
                || (symbol == board[6] && symbol == board[7])))
}

/// No empty cell left. On the meta-board a decided subgame (win or draw) is
/// a non-zero tag, so this doubles as the "every subgame decided" test.
fn is_full(board: &[u8]) -> bool {
    board.iter().all(|&c| c != 0)
}

fn update_results(cells: &mut [u8], symbol: u8, index: usize) {
    let subgame = index / SUBGAMES;
    let offset = subgame * SUBGAMES;
    let subgame_board = &cells[offset..offset + SUBGAMES];
    let decided = if is_winning(subgame_board, symbol) {
        cells[CELLS + subgame] = symbol;
        true
    } else if is_full(subgame_board) {
        cells[CELLS + subgame] = DRAW_VALUE;
        true
    } else {
        false
    };
    // The meta-board can only change when a subgame result just did.
    if decided {
        let meta = &cells[CELLS..CELLS + SUBGAMES];
        if is_winning(meta, symbol) {
            cells[RESULT_INDEX] = symbol;
        } else if is_full(meta) {
            cells[RESULT_INDEX] = DRAW_VALUE;
        }
    }
}

fn toggle_next_symbol(cells: &mut [u8]) {
    cells[NEXT_SYMBOL_INDEX] = if cells[NEXT_SYMBOL_INDEX] == X_VALUE {
        O_VALUE
    } else {
        X_VALUE
    };
}

fn set_next_constraint(cells: &mut [u8], index: usize) {
    let next_subgame = index % SUBGAMES;
    cells[CONSTRAINT_INDEX] = if cells[CELLS + next_subgame] != 0 {
        UNCONSTRAINED_VALUE
    } else {
        next_subgame as u8
    };
}

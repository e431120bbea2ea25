//! Canonical game-state record: 93 small-integer cells.
//!
//! Layout (cell indices):
//! - `0..81`  — the 81 subgame cells, subgame-major: cell `i` lives in
//!   subgame `i / 9` at local position `i % 9`.
//! - `81..90` — the 9 subgame results (the meta-board).
//! - `90` — next mover symbol, `91` — constraint, `92` — overall result.

use std::fmt;

/// Total number of cells in the state record.
pub const STATE_SIZE: usize = 93;

/// Number of playable board cells.
pub const CELLS: usize = 81;

/// Number of subgames (and meta-board cells).
pub const SUBGAMES: usize = 9;

/// Index of the next-mover symbol cell.
pub const NEXT_SYMBOL_INDEX: usize = 90;
/// Index of the constraint cell.
pub const CONSTRAINT_INDEX: usize = 91;
/// Index of the overall-result cell.
pub const RESULT_INDEX: usize = 92;

/// Cell tag for an X stone / X result.
pub const X_VALUE: u8 = 1;
/// Cell tag for an O stone / O result.
pub const O_VALUE: u8 = 2;
/// Result tag for a drawn subgame or game.
pub const DRAW_VALUE: u8 = 3;
/// Constraint tag meaning "any undecided subgame".
pub const UNCONSTRAINED_VALUE: u8 = 9;

/// Ultimate Tic-Tac-Toe state as a plain value type.
///
/// Equality is exact cell-by-cell comparison of all 93 values; that is the
/// contract tree synchronization relies on.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    cells: [u8; STATE_SIZE],
}

impl GameState {
    /// Fresh game: empty board, X to move, unconstrained.
    pub fn new() -> Self {
        let mut cells = [0u8; STATE_SIZE];
        cells[NEXT_SYMBOL_INDEX] = X_VALUE;
        cells[CONSTRAINT_INDEX] = UNCONSTRAINED_VALUE;
        Self { cells }
    }

    pub(crate) fn from_cells(cells: [u8; STATE_SIZE]) -> Self {
        Self { cells }
    }

    /// Raw view of all 93 cells.
    pub fn cells(&self) -> &[u8; STATE_SIZE] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8; STATE_SIZE] {
        &mut self.cells
    }

    /// Symbol of the player to move (`X_VALUE` or `O_VALUE`).
    pub fn next_symbol(&self) -> u8 {
        self.cells[NEXT_SYMBOL_INDEX]
    }

    /// Constraint cell: a subgame index in `0..9`, or `UNCONSTRAINED_VALUE`.
    pub fn constraint(&self) -> u8 {
        self.cells[CONSTRAINT_INDEX]
    }

    /// Overall result tag: 0 (ongoing), X, O, or draw.
    pub fn result(&self) -> u8 {
        self.cells[RESULT_INDEX]
    }

    /// Result tag of one subgame.
    pub fn subgame_result(&self, subgame: usize) -> u8 {
        debug_assert!(subgame < SUBGAMES);
        self.cells[CELLS + subgame]
    }

    pub fn is_constrained(&self) -> bool {
        self.constraint() < SUBGAMES as u8
    }

    pub fn is_terminal(&self) -> bool {
        self.result() != 0
    }

    pub fn is_result_x(&self) -> bool {
        self.result() == X_VALUE
    }

    pub fn is_result_o(&self) -> bool {
        self.result() == O_VALUE
    }

    pub fn is_result_draw(&self) -> bool {
        self.result() == DRAW_VALUE
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn tag_str(tag: u8) -> &'static str {
    match tag {
        0 => "-",
        X_VALUE => "X",
        O_VALUE => "O",
        DRAW_VALUE => "=",
        _ => "?",
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameState(\"{}\")", crate::codec::to_digits(self))
    }
}

impl fmt::Display for GameState {
    /// Human-readable board. Legal cells are marked with a dot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board: Vec<&str> = self.cells[..CELLS].iter().map(|&c| tag_str(c)).collect();
        let mut meta: Vec<&str> = (0..SUBGAMES)
            .map(|s| tag_str(self.subgame_result(s)))
            .collect();
        if !self.is_terminal() {
            for action in crate::engine::legal_actions(self) {
                board[action.index as usize] = "•";
            }
            if self.is_constrained() {
                meta[self.constraint() as usize] = "•";
            } else {
                for m in meta.iter_mut() {
                    if *m == "-" {
                        *m = "•";
                    }
                }
            }
        }

        writeln!(f, "subgames:")?;
        for band in 0..3 {
            for row in 0..3 {
                let mut line = String::from(" ");
                for sub in 0..3 {
                    // subgame-major layout: subgame (band*3+sub), local row `row`
                    let offset = (band * 3 + sub) * SUBGAMES + row * 3;
                    for c in 0..3 {
                        line.push(' ');
                        line.push_str(board[offset + c]);
                    }
                    if sub < 2 {
                        line.push_str(" │");
                    }
                }
                writeln!(f, "{line}")?;
            }
            if band < 2 {
                writeln!(f, "  ─────────────────────")?;
            }
        }
        if !self.is_terminal() {
            writeln!(f, "next_symbol: {}", tag_str(self.next_symbol()))?;
            if self.is_constrained() {
                writeln!(f, "constraint: {}", self.constraint())?;
            } else {
                writeln!(f, "constraint: None")?;
            }
        }
        writeln!(f, "supergame:")?;
        for row in 0..3 {
            writeln!(f, "  {} {} {}", meta[row * 3], meta[row * 3 + 1], meta[row * 3 + 2])?;
        }
        let result = match self.result() {
            X_VALUE => "X_WON",
            O_VALUE => "O_WON",
            DRAW_VALUE => "DRAW",
            _ => "None",
        };
        write!(f, "result: {result}")
    }
}

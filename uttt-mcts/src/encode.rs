//! Fixed tensor encoding of a game state for evaluator input.
//!
//! The layout is four 9x9 planes flattened plane-major:
//! - plane 0: stones of the side to move
//! - plane 1: stones of the opponent
//! - plane 2: constant +1 when X moves, -1 when O moves
//! - plane 3: legal-move mask
//!
//! Cell indexes are subgame-major while the planes are row-major over the
//! full 9x9 board, so the two lookup tables below translate between them.
//! Policy heads share the same row-major layout: the logit for cell `i`
//! lives at `policy_index(i)`.

use uttt_core::{engine, GameState, O_VALUE, X_VALUE};

pub const BOARD_SIDE: usize = 9;
pub const PLANES: usize = 4;
pub const ENCODED_LEN: usize = PLANES * BOARD_SIDE * BOARD_SIDE;
pub const POLICY_LEN: usize = BOARD_SIDE * BOARD_SIDE;

pub type EncodedState = [i8; ENCODED_LEN];
pub type PolicyLogits = [f32; POLICY_LEN];

/// Board row for each subgame-major cell index.
pub const ROW_INDEX: [usize; 81] = [
    0, 0, 0, 1, 1, 1, 2, 2, 2, //
    0, 0, 0, 1, 1, 1, 2, 2, 2, //
    0, 0, 0, 1, 1, 1, 2, 2, 2, //
    3, 3, 3, 4, 4, 4, 5, 5, 5, //
    3, 3, 3, 4, 4, 4, 5, 5, 5, //
    3, 3, 3, 4, 4, 4, 5, 5, 5, //
    6, 6, 6, 7, 7, 7, 8, 8, 8, //
    6, 6, 6, 7, 7, 7, 8, 8, 8, //
    6, 6, 6, 7, 7, 7, 8, 8, 8,
];

/// Board column for each subgame-major cell index.
pub const COL_INDEX: [usize; 81] = [
    0, 1, 2, 0, 1, 2, 0, 1, 2, //
    3, 4, 5, 3, 4, 5, 3, 4, 5, //
    6, 7, 8, 6, 7, 8, 6, 7, 8, //
    0, 1, 2, 0, 1, 2, 0, 1, 2, //
    3, 4, 5, 3, 4, 5, 3, 4, 5, //
    6, 7, 8, 6, 7, 8, 6, 7, 8, //
    0, 1, 2, 0, 1, 2, 0, 1, 2, //
    3, 4, 5, 3, 4, 5, 3, 4, 5, //
    6, 7, 8, 6, 7, 8, 6, 7, 8,
];

/// Flat policy-logit index for a subgame-major cell index.
#[inline]
pub fn policy_index(cell: usize) -> usize {
    ROW_INDEX[cell] * BOARD_SIDE + COL_INDEX[cell]
}

/// Encode `state` from the mover's perspective.
pub fn encode_state(state: &GameState) -> EncodedState {
    let mut encoded = [0i8; ENCODED_LEN];
    // plane offsets, swapped so the mover always occupies plane 0
    let (x_plane, o_plane, mover_fill) = if state.next_symbol() == X_VALUE {
        (0usize, POLICY_LEN, 1i8)
    } else {
        (POLICY_LEN, 0usize, -1i8)
    };
    let cells = state.cells();
    for cell in 0..81 {
        let plane = match cells[cell] {
            v if v == X_VALUE => x_plane,
            v if v == O_VALUE => o_plane,
            _ => continue,
        };
        encoded[plane + policy_index(cell)] = 1;
    }
    for slot in &mut encoded[2 * POLICY_LEN..3 * POLICY_LEN] {
        *slot = mover_fill;
    }
    let mut legal = Vec::new();
    engine::legal_indexes_into(state, &mut legal);
    for &cell in &legal {
        encoded[3 * POLICY_LEN + policy_index(cell as usize)] = 1;
    }
    encoded
}

use std::path::PathBuf;

use uttt_core::GameState;

/// One unit of self-play work: play a full game out from `state` and write
/// every decision to `output_path`.
#[derive(Debug, Clone)]
pub struct Task {
    pub state: GameState,
    pub simulations: u32,
    pub exploration: f64,
    pub seed: u64,
    pub output_path: PathBuf,
}

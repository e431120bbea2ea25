//! Serializable views of a finished search.
//!
//! States travel as their 93-digit string form so records stay greppable
//! and independent of any in-memory layout.

use serde::{Deserialize, Serialize};
use uttt_core::to_digits;
use uttt_mcts::{guided, rollout};

/// One evaluated child of a rollout search root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolloutActionRecord {
    pub symbol: u8,
    pub index: u8,
    pub visits: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

/// One decision from a random-rollout self-play game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolloutDecisionRecord {
    pub state: String,
    pub visits: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub actions: Vec<RolloutActionRecord>,
}

impl RolloutDecisionRecord {
    pub fn new(root: &rollout::EvaluatedState, actions: &[rollout::EvaluatedAction]) -> Self {
        Self {
            state: to_digits(&root.state),
            visits: root.visits,
            wins: root.wins,
            draws: root.draws,
            losses: root.losses,
            actions: actions
                .iter()
                .map(|a| RolloutActionRecord {
                    symbol: a.action.symbol,
                    index: a.action.index,
                    visits: a.visits,
                    wins: a.wins,
                    draws: a.draws,
                    losses: a.losses,
                })
                .collect(),
        }
    }
}

/// One evaluated child of a guided search root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuidedActionRecord {
    pub symbol: u8,
    pub index: u8,
    pub visits: u32,
    pub value_mean: f64,
}

/// One decision from an evaluator-guided self-play game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuidedDecisionRecord {
    pub state: String,
    pub visits: u32,
    pub value_mean: f64,
    pub actions: Vec<GuidedActionRecord>,
}

impl GuidedDecisionRecord {
    pub fn new(root: &guided::EvaluatedState, actions: &[guided::EvaluatedAction]) -> Self {
        Self {
            state: to_digits(&root.state),
            visits: root.visits,
            value_mean: root.value_mean,
            actions: actions
                .iter()
                .map(|a| GuidedActionRecord {
                    symbol: a.action.symbol,
                    index: a.action.index,
                    visits: a.visits,
                    value_mean: a.value_mean,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uttt_core::{parse_state, GameState};
    use uttt_mcts::rollout::RolloutMcts;

    #[test]
    fn rollout_record_round_trips_through_json() {
        let mut mcts = RolloutMcts::new(GameState::new(), 16, 2.0, 1);
        mcts.run();
        let record = RolloutDecisionRecord::new(&mcts.evaluated_state(), &mcts.evaluated_actions());
        assert_eq!(record.state.len(), 93);
        assert!(parse_state(&record.state).is_ok());
        let json = serde_json::to_string(&record).unwrap();
        let back: RolloutDecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

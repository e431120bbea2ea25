//! UCT search with uniform random playouts.
//!
//! Leaves are expanded on their second visit, not their first, so a single
//! playout never allocates children it may not need. Outcomes are tallied
//! per symbol at every node; perspective is resolved only when results are
//! read out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uttt_core::{engine, Action, GameState, O_VALUE, X_VALUE};

use crate::policy::{self, SelectionPolicy};
use crate::tree::Tree;

#[derive(Debug, Default, Clone, Copy)]
pub struct RolloutStats {
    pub visits: u32,
    pub wins_x: u32,
    pub wins_o: u32,
    pub draws: u32,
}

/// Root summary with wins/losses resolved to the side to move in `state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedState {
    pub state: GameState,
    pub visits: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

/// Per-child summary with wins/losses resolved to the action's own symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedAction {
    pub action: Action,
    pub visits: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

pub struct RolloutMcts {
    tree: Tree<RolloutStats>,
    simulations: u32,
    exploration: f64,
    rng: ChaCha8Rng,
    playout_buf: Vec<u8>,
}

impl RolloutMcts {
    pub fn new(state: GameState, simulations: u32, exploration: f64, seed: u64) -> Self {
        Self {
            tree: Tree::new(state),
            simulations,
            exploration,
            rng: ChaCha8Rng::seed_from_u64(seed),
            playout_buf: Vec::with_capacity(81),
        }
    }

    /// Run simulations until the root has accumulated the configured visit
    /// count. After `synchronize` the promoted subtree's visits count toward
    /// the target, so only the difference is simulated.
    pub fn run(&mut self) {
        let remaining = self.simulations.saturating_sub(self.tree.root.stats.visits);
        for _ in 0..remaining {
            self.simulate();
        }
    }

    fn simulate(&mut self) {
        let path = self.select_leaf();
        let leaf_state = {
            let mut node = &self.tree.root;
            for &i in &path {
                node = &node.children().expect("selected path is expanded")[i];
            }
            node.state
        };
        let outcome = self.playout(&leaf_state);
        self.backprop(&path, outcome);
    }

    /// Descend by UCT from the root until an unvisited or terminal node,
    /// expanding once-visited leaves on the way down. Returns the child
    /// indexes of the traversed edges; an empty path selects the root.
    fn select_leaf(&mut self) -> Vec<usize> {
        let exploration = self.exploration;
        let rng = &mut self.rng;
        let mut path = Vec::new();
        let mut node = &mut self.tree.root;
        while node.stats.visits != 0 && !node.is_terminal() {
            if node.stats.visits == 1 {
                node.expand();
            }
            let parent_visits = node.stats.visits;
            let children = node.children_mut().expect("visited non-terminal is expanded");
            let mut top: Vec<usize> = Vec::new();
            let mut top_score = f64::NEG_INFINITY;
            for (i, child) in children.iter().enumerate() {
                let score = uct(&child.stats, child.action, parent_visits, exploration);
                if score > top_score {
                    top.clear();
                    top.push(i);
                    top_score = score;
                } else if score == top_score {
                    top.push(i);
                }
            }
            let chosen = if top.len() == 1 {
                top[0]
            } else {
                top[rng.gen_range(0..top.len())]
            };
            path.push(chosen);
            node = &mut children[chosen];
        }
        path
    }

    /// Play uniformly random moves to the end of the game; returns the
    /// result tag.
    fn playout(&mut self, state: &GameState) -> u8 {
        let mut state = *state;
        while !state.is_terminal() {
            engine::legal_indexes_into(&state, &mut self.playout_buf);
            let index = self.playout_buf[self.rng.gen_range(0..self.playout_buf.len())];
            let action = Action {
                symbol: state.next_symbol(),
                index,
            };
            state = engine::play(&state, action);
        }
        state.result()
    }

    fn backprop(&mut self, path: &[usize], outcome: u8) {
        let mut node = &mut self.tree.root;
        tally(&mut node.stats, outcome);
        for &i in path {
            node = &mut node.children_mut().expect("selected path is expanded")[i];
            tally(&mut node.stats, outcome);
        }
    }

    /// Root statistics from the perspective of the side to move there.
    pub fn evaluated_state(&self) -> EvaluatedState {
        let root = &self.tree.root;
        let (wins, losses) = if root.state.next_symbol() == X_VALUE {
            (root.stats.wins_x, root.stats.wins_o)
        } else {
            (root.stats.wins_o, root.stats.wins_x)
        };
        EvaluatedState {
            state: root.state,
            visits: root.stats.visits,
            wins,
            draws: root.stats.draws,
            losses,
        }
    }

    /// Per-child statistics at the root.
    ///
    /// # Panics
    ///
    /// Panics on an unexpanded or terminal root; callers read evaluations
    /// only after `run` on a live position.
    pub fn evaluated_actions(&self) -> Vec<EvaluatedAction> {
        assert!(
            !self.tree.root.is_terminal(),
            "no evaluated actions at a terminal root"
        );
        let children = self
            .tree
            .root
            .children()
            .expect("root must be expanded before reading evaluated actions");
        children
            .iter()
            .map(|child| {
                let action = child.action.expect("child nodes carry their action");
                let (wins, losses) = if action.symbol == X_VALUE {
                    (child.stats.wins_x, child.stats.wins_o)
                } else {
                    (child.stats.wins_o, child.stats.wins_x)
                };
                EvaluatedAction {
                    action,
                    visits: child.stats.visits,
                    wins,
                    draws: child.stats.draws,
                    losses,
                }
            })
            .collect()
    }

    /// Choose the move to execute from the root's evaluated children.
    pub fn select_action(&mut self, policy: SelectionPolicy) -> Action {
        let evaluated = self.evaluated_actions();
        let visits: Vec<u32> = evaluated.iter().map(|e| e.visits).collect();
        let chosen = policy::select_index(&visits, policy, &mut self.rng);
        evaluated[chosen].action
    }

    /// Re-root onto `state`, keeping the matching subtree's statistics.
    pub fn synchronize(&mut self, state: &GameState) {
        self.tree.synchronize(state);
    }

    pub fn root_state(&self) -> &GameState {
        &self.tree.root.state
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

/// Exploitation from the acting symbol's perspective plus the UCT bonus.
/// Unvisited children score infinite so each is tried once.
fn uct(stats: &RolloutStats, action: Option<Action>, parent_visits: u32, exploration: f64) -> f64 {
    if stats.visits == 0 {
        return f64::INFINITY;
    }
    let action = action.expect("non-root nodes carry their action");
    let (wins, losses) = if action.symbol == X_VALUE {
        (stats.wins_x, stats.wins_o)
    } else {
        (stats.wins_o, stats.wins_x)
    };
    let exploitation = (f64::from(wins) - f64::from(losses)) / f64::from(stats.visits);
    let bonus = exploration * (f64::from(parent_visits).ln() / f64::from(stats.visits)).sqrt();
    exploitation + bonus
}

fn tally(stats: &mut RolloutStats, outcome: u8) {
    stats.visits += 1;
    match outcome {
        v if v == X_VALUE => stats.wins_x += 1,
        v if v == O_VALUE => stats.wins_o += 1,
        _ => stats.draws += 1,
    }
}

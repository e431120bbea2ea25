//! PUCT search guided by an external evaluator.
//!
//! Unlike the rollout variant, leaves are expanded immediately and their
//! value comes from the evaluator instead of a playout. Values live in
//! [-1, 1] from the perspective of the side to move at each node, so the
//! backed-up value flips sign at every ply.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uttt_core::{Action, GameState};

use crate::encode::{encode_state, policy_index, POLICY_LEN};
use crate::eval::Evaluator;
use crate::policy::{self, SelectionPolicy};
use crate::tree::{Node, Tree};

#[derive(Debug, Default, Clone, Copy)]
pub struct GuidedStats {
    pub visits: u32,
    /// Softmax probability the evaluator assigned to the action that
    /// produced this node, among its siblings.
    pub prior: f64,
    pub value_sum: f64,
    pub value_mean: f64,
}

/// Root summary; `value_mean` is from the perspective of the side to move.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedState {
    pub state: GameState,
    pub visits: u32,
    pub value_mean: f64,
}

/// Per-child summary; `value_mean` is negated into the acting side's
/// perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedAction {
    pub action: Action,
    pub visits: u32,
    pub value_mean: f64,
}

pub struct GuidedMcts<E> {
    tree: Tree<GuidedStats>,
    simulations: u32,
    exploration: f64,
    evaluator: E,
    rng: ChaCha8Rng,
}

impl<E: Evaluator> GuidedMcts<E> {
    pub fn new(
        state: GameState,
        simulations: u32,
        exploration: f64,
        evaluator: E,
        seed: u64,
    ) -> Self {
        Self {
            tree: Tree::new(state),
            simulations,
            exploration,
            evaluator,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Run simulations until the root reaches the configured visit count;
    /// visits inherited through `synchronize` count toward the target.
    pub fn run(&mut self) {
        let remaining = self.simulations.saturating_sub(self.tree.root.stats.visits);
        for _ in 0..remaining {
            self.simulate();
        }
    }

    fn simulate(&mut self) {
        let path = self.select_leaf();
        let value = {
            let mut node = &mut self.tree.root;
            for &i in &path {
                node = &mut node.children_mut().expect("selected path is expanded")[i];
            }
            node.expand();
            evaluate_leaf(node, &mut self.evaluator)
        };
        self.backprop(&path, value);
    }

    /// Descend by PUCT until a node with no children (unexpanded or
    /// terminal). Returns the traversed child indexes.
    fn select_leaf(&mut self) -> Vec<usize> {
        let exploration = self.exploration;
        let rng = &mut self.rng;
        let mut path = Vec::new();
        let mut node = &self.tree.root;
        while let Some(children) = node.children() {
            let sqrt_parent = f64::from(node.stats.visits).sqrt();
            let mut top: Vec<usize> = Vec::new();
            let mut top_score = f64::NEG_INFINITY;
            for (i, child) in children.iter().enumerate() {
                let score = puct(&child.stats, sqrt_parent, exploration);
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
            node = &children[chosen];
        }
        path
    }

    /// Credit `value` up the selected path with alternating sign: the leaf
    /// sees it as-is, its parent negated, and so on to the root.
    fn backprop(&mut self, path: &[usize], value: f64) {
        let mut sign = if path.len() % 2 == 0 { 1.0 } else { -1.0 };
        let mut node = &mut self.tree.root;
        credit(&mut node.stats, sign * value);
        for &i in path {
            sign = -sign;
            node = &mut node.children_mut().expect("selected path is expanded")[i];
            credit(&mut node.stats, sign * value);
        }
    }

    pub fn evaluated_state(&self) -> EvaluatedState {
        let root = &self.tree.root;
        EvaluatedState {
            state: root.state,
            visits: root.stats.visits,
            value_mean: root.stats.value_mean,
        }
    }

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
            .map(|child| EvaluatedAction {
                action: child.action.expect("child nodes carry their action"),
                visits: child.stats.visits,
                value_mean: -child.stats.value_mean,
            })
            .collect()
    }

    pub fn select_action(&mut self, policy: SelectionPolicy) -> Action {
        let evaluated = self.evaluated_actions();
        let visits: Vec<u32> = evaluated.iter().map(|e| e.visits).collect();
        let chosen = policy::select_index(&visits, policy, &mut self.rng);
        evaluated[chosen].action
    }

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

/// Negamax Q plus the prior-weighted exploration bonus. The 0.01 prior
/// floor keeps moves the evaluator dislikes reachable.
fn puct(stats: &GuidedStats, sqrt_parent: f64, exploration: f64) -> f64 {
    let q = -stats.value_mean;
    let u = exploration * stats.prior.max(0.01) * sqrt_parent / f64::from(stats.visits + 1);
    q + u
}

fn credit(stats: &mut GuidedStats, signed_value: f64) {
    stats.visits += 1;
    stats.value_sum += signed_value;
    stats.value_mean = stats.value_sum / f64::from(stats.visits);
}

/// Value of a freshly selected leaf from its mover's perspective.
///
/// Terminal nodes need no evaluator: the game just ended, so the side to
/// move has either lost or drawn. Otherwise the evaluator runs once and its
/// policy logits, masked to the legal children and softmaxed, become the
/// children's priors.
fn evaluate_leaf<E: Evaluator>(node: &mut Node<GuidedStats>, evaluator: &mut E) -> f64 {
    if node.is_terminal() {
        return if node.state.is_result_draw() { 0.0 } else { -1.0 };
    }
    let encoded = encode_state(&node.state);
    let (logits, value) = evaluator.evaluate(&encoded);
    let children = node
        .children_mut()
        .expect("non-terminal leaf is expanded before evaluation");
    let mut child_logits: Vec<f64> = Vec::with_capacity(children.len());
    for child in children.iter() {
        let action = child.action.expect("child nodes carry their action");
        debug_assert!((action.index as usize) < POLICY_LEN);
        child_logits.push(f64::from(logits[policy_index(action.index as usize)]));
    }
    softmax_in_place(&mut child_logits);
    for (child, &prior) in children.iter_mut().zip(child_logits.iter()) {
        child.stats.prior = prior;
    }
    f64::from(value)
}

/// Numerically stable softmax over the (non-empty) slice.
fn softmax_in_place(logits: &mut [f64]) {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in logits.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in logits.iter_mut() {
        *v /= sum;
    }
}

use uttt_core::{engine, parse_state, GameState, X_VALUE};

use crate::eval::{Evaluator, UniformEvaluator};
use crate::guided::GuidedMcts;
use crate::policy::SelectionPolicy;

#[test]
fn run_accumulates_the_configured_visit_budget() {
    let mut mcts = GuidedMcts::new(GameState::new(), 32, 2.0, UniformEvaluator, 42);
    mcts.run();
    assert_eq!(mcts.evaluated_state().visits, 32);
    let actions = mcts.evaluated_actions();
    assert_eq!(actions.len(), 81);
    // the first simulation expands the root and stops there
    let child_visits: u32 = actions.iter().map(|a| a.visits).sum();
    assert_eq!(child_visits, 31);
}

#[test]
fn identical_seeds_reproduce_the_search_exactly() {
    let mut a = GuidedMcts::new(GameState::new(), 48, 2.0, UniformEvaluator, 99);
    let mut b = GuidedMcts::new(GameState::new(), 48, 2.0, UniformEvaluator, 99);
    a.run();
    b.run();
    assert_eq!(a.evaluated_state(), b.evaluated_state());
    assert_eq!(a.evaluated_actions(), b.evaluated_actions());
}

#[test]
fn immediate_win_dominates_the_search() {
    // X to move, constrained to subgame 2; cell 20 completes the top meta
    // row. The winning child's backed-up value is a certain loss for the
    // opponent, so its Q term pins selection onto it.
    let digits = format!(
        "{}{}{}{}{}{}",
        "111000000",
        "111000000",
        "110000000",
        "0".repeat(54),
        "110000000",
        "120",
    );
    let state = parse_state(&digits).unwrap();
    let mut mcts = GuidedMcts::new(state, 100, 2.0, UniformEvaluator, 5);
    mcts.run();
    let actions = mcts.evaluated_actions();
    assert_eq!(actions.len(), 7);
    let winning = actions.iter().find(|a| a.action.index == 20).unwrap();
    // value_mean is reported from the acting side's perspective
    assert!((winning.value_mean - 1.0).abs() < 1e-9);
    let selected = mcts.select_action(SelectionPolicy::Best);
    assert_eq!(selected.symbol, X_VALUE);
    assert_eq!(selected.index, 20);
}

#[test]
fn priors_at_the_root_form_a_distribution() {
    struct BiasedEvaluator;
    impl Evaluator for BiasedEvaluator {
        fn evaluate(
            &mut self,
            _input: &crate::encode::EncodedState,
        ) -> (crate::encode::PolicyLogits, f32) {
            let mut logits = [0.0f32; crate::encode::POLICY_LEN];
            // strongly favor the board's top-left corner (cell 0)
            logits[0] = 8.0;
            (logits, 0.0)
        }
    }
    let mut mcts = GuidedMcts::new(GameState::new(), 64, 2.0, BiasedEvaluator, 17);
    mcts.run();
    let actions = mcts.evaluated_actions();
    let favored = actions.iter().find(|a| a.action.index == 0).unwrap();
    let most_visited = actions.iter().map(|a| a.visits).max().unwrap();
    assert_eq!(favored.visits, most_visited);
}

#[test]
fn synchronize_keeps_statistics_and_run_tops_up() {
    let mut mcts = GuidedMcts::new(GameState::new(), 40, 2.0, UniformEvaluator, 11);
    mcts.run();
    let action = mcts.select_action(SelectionPolicy::Best);
    let inherited = mcts
        .evaluated_actions()
        .iter()
        .find(|a| a.action == action)
        .unwrap()
        .visits;
    let next = engine::play(&GameState::new(), action);
    mcts.synchronize(&next);
    assert_eq!(*mcts.root_state(), next);
    assert_eq!(mcts.evaluated_state().visits, inherited);
    mcts.run();
    assert_eq!(mcts.evaluated_state().visits, 40);
}

#[test]
#[should_panic(expected = "expanded")]
fn evaluated_actions_require_a_searched_root() {
    let mcts = GuidedMcts::new(GameState::new(), 100, 2.0, UniformEvaluator, 1);
    let _ = mcts.evaluated_actions();
}

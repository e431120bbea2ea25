use uttt_core::{engine, parse_state, GameState};

use crate::policy::SelectionPolicy;
use crate::rollout::RolloutMcts;

#[test]
fn run_accumulates_the_configured_visit_budget() {
    let mut mcts = RolloutMcts::new(GameState::new(), 32, 2.0, 42);
    mcts.run();
    let root = mcts.evaluated_state();
    assert_eq!(root.visits, 32);
    assert_eq!(root.wins + root.draws + root.losses, 32);
    let actions = mcts.evaluated_actions();
    assert_eq!(actions.len(), 81);
    // the very first simulation stops at the unexpanded root
    let child_visits: u32 = actions.iter().map(|a| a.visits).sum();
    assert_eq!(child_visits, 31);
}

#[test]
fn unvisited_children_are_tried_before_any_revisit() {
    // 81 legal root moves; after 82 simulations (one stays at the root)
    // every child has been visited at least once, because unvisited
    // children score infinite.
    let mut mcts = RolloutMcts::new(GameState::new(), 82, 2.0, 3);
    mcts.run();
    assert!(mcts.evaluated_actions().iter().all(|a| a.visits >= 1));
}

#[test]
fn identical_seeds_reproduce_the_search_exactly() {
    let mut a = RolloutMcts::new(GameState::new(), 48, 2.0, 1234);
    let mut b = RolloutMcts::new(GameState::new(), 48, 2.0, 1234);
    a.run();
    b.run();
    assert_eq!(a.evaluated_state(), b.evaluated_state());
    assert_eq!(a.evaluated_actions(), b.evaluated_actions());
}

#[test]
fn winning_move_statistics_are_pure_wins() {
    // X to move, constrained to subgame 2, where cell 20 completes both
    // the subgame and the top meta row. Every simulation through that
    // child ends the game immediately as an X win.
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
    let mut mcts = RolloutMcts::new(state, 64, 2.0, 9);
    mcts.run();
    let actions = mcts.evaluated_actions();
    assert_eq!(actions.len(), 7);
    let winning = actions
        .iter()
        .find(|a| a.action.index == 20)
        .expect("cell 20 is legal");
    assert!(winning.visits > 0);
    assert_eq!(winning.wins, winning.visits);
    assert_eq!(winning.losses, 0);
    assert_eq!(winning.draws, 0);
}

#[test]
fn select_action_returns_a_legal_move() {
    let mut mcts = RolloutMcts::new(GameState::new(), 24, 2.0, 7);
    mcts.run();
    for policy in [
        SelectionPolicy::Best,
        SelectionPolicy::Sample,
        SelectionPolicy::Random,
    ] {
        let action = mcts.select_action(policy);
        assert!(engine::legal_actions(&GameState::new()).contains(&action));
    }
}

#[test]
fn synchronize_keeps_statistics_and_run_tops_up() {
    let mut mcts = RolloutMcts::new(GameState::new(), 40, 2.0, 11);
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
fn tree_reporting_reflects_growth() {
    let mut mcts = RolloutMcts::new(GameState::new(), 200, 2.0, 13);
    assert_eq!(mcts.size(), 1);
    assert_eq!(mcts.height(), 0);
    mcts.run();
    // 82 nodes after the root expansion, more once children re-visited
    assert!(mcts.size() > 82);
    assert!(mcts.height() >= 2);
}

#[test]
#[should_panic(expected = "expanded")]
fn evaluated_actions_require_a_searched_root() {
    let mcts = RolloutMcts::new(GameState::new(), 100, 2.0, 1);
    let _ = mcts.evaluated_actions();
}

#[test]
#[should_panic(expected = "terminal")]
fn evaluated_actions_reject_a_finished_game() {
    let digits = format!(
        "{}{}{}{}{}{}",
        "111000000",
        "111000000",
        "111000000",
        "0".repeat(54),
        "111000000",
        "191",
    );
    let state = parse_state(&digits).unwrap();
    let mcts = RolloutMcts::new(state, 10, 2.0, 1);
    let _ = mcts.evaluated_actions();
}

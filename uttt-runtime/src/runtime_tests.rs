use std::fs;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use uttt_core::GameState;
use uttt_mcts::encode::{ENCODED_LEN, POLICY_LEN};
use uttt_mcts::eval::Evaluator;
use uttt_mcts::UniformEvaluator;
use uttt_replay::GuidedDecisionRecord;

use crate::config::RuntimeConfig;
use crate::predictor::{run_predictor, scan_requested};
use crate::scheduler::run_scheduler;
use crate::slot::{EvalSlot, SlotEvaluator};
use crate::task::Task;

#[test]
fn slot_handshake_hands_ownership_back_and_forth() {
    let slot = EvalSlot::new();
    assert!(!slot.is_requested());

    let input = [3i8; ENCODED_LEN];
    slot.submit(&input);
    assert!(slot.is_requested());
    assert_eq!(slot.input(), input);

    let policy = [0.5f32; POLICY_LEN];
    slot.fulfill(&policy, -0.25);
    assert!(!slot.is_requested());
    let (got_policy, got_value) = slot.response();
    assert_eq!(got_policy, policy);
    assert_eq!(got_value, -0.25);
}

#[test]
fn slot_evaluator_blocks_until_the_predictor_answers() {
    let slot = EvalSlot::new();
    thread::scope(|scope| {
        scope.spawn(|| {
            // predictor stand-in: wait for the request, answer it
            while !slot.is_requested() {
                thread::sleep(Duration::from_millis(1));
            }
            let _ = slot.input();
            slot.fulfill(&[1.0; POLICY_LEN], 0.75);
        });
        let mut evaluator = SlotEvaluator::new(&slot, Duration::from_millis(1));
        let (policy, value) = evaluator.evaluate(&[0; ENCODED_LEN]);
        assert_eq!(policy[0], 1.0);
        assert_eq!(value, 0.75);
    });
}

#[test]
fn scan_respects_batch_limit_and_rotation() {
    let slots: Vec<EvalSlot> = (0..4).map(|_| EvalSlot::new()).collect();
    let input = [0i8; ENCODED_LEN];
    for slot in &slots {
        slot.submit(&input);
    }
    let mut selected = Vec::new();
    scan_requested(&slots, 0, 2, &mut selected);
    assert_eq!(selected, vec![0, 1]);
    // continuing from after the last served worker reaches the others
    scan_requested(&slots, 2, 2, &mut selected);
    assert_eq!(selected, vec![2, 3]);
    // fulfilled slots disappear from the scan
    slots[0].fulfill(&[0.0; POLICY_LEN], 0.0);
    slots[2].fulfill(&[0.0; POLICY_LEN], 0.0);
    scan_requested(&slots, 0, 4, &mut selected);
    assert_eq!(selected, vec![1, 3]);
}

#[test]
fn four_pending_workers_with_batch_two_are_served_in_two_batches() {
    let slots: Vec<EvalSlot> = (0..4).map(|_| EvalSlot::new()).collect();
    let input = [0i8; ENCODED_LEN];
    for slot in &slots {
        slot.submit(&input);
    }
    let live_workers = AtomicUsize::new(4);
    let closing = AtomicBool::new(true); // drain mode: serve then return
    let stats = run_predictor(
        UniformEvaluator,
        &slots,
        &live_workers,
        &closing,
        2,
        Duration::from_millis(1),
    );
    assert_eq!(stats.batches, 2);
    assert_eq!(stats.evaluations, 4);
    assert!(slots.iter().all(|s| !s.is_requested()));
}

#[test]
fn scheduler_runs_all_tasks_and_writes_their_records() {
    let dir = tempfile::tempdir().unwrap();
    let tasks: Vec<Task> = (0..3)
        .map(|i| Task {
            state: GameState::new(),
            simulations: 8,
            exploration: 2.0,
            seed: 1000 + i,
            output_path: dir.path().join(format!("game-{i}.ndjson")),
        })
        .collect();
    let config = RuntimeConfig {
        num_workers: 2,
        max_batch_size: 2,
        dispatch_poll_ms: 1,
        task_wait_ms: 1,
        prediction_wait_ms: 1,
        predictor_poll_ms: 1,
    };
    let report = run_scheduler(UniformEvaluator, &tasks, &config);
    assert_eq!(report.completed, 3);
    assert_eq!(report.failed, 0);
    assert!(report.batches > 0);
    assert!(report.evaluations > 0);

    for task in &tasks {
        let text = fs::read_to_string(&task.output_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(!lines.is_empty());
        for line in &lines {
            let record: GuidedDecisionRecord = serde_json::from_str(line).unwrap();
            assert_eq!(record.visits, 8);
            assert!(!record.actions.is_empty());
        }
        // the last recorded decision is one move from the end of a game
        let last: GuidedDecisionRecord = serde_json::from_str(lines.last().unwrap()).unwrap();
        assert!(uttt_core::parse_state(&last.state).is_ok());
    }
}

#[test]
fn failed_tasks_are_counted_without_stopping_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = vec![
        Task {
            state: GameState::new(),
            simulations: 8,
            exploration: 2.0,
            seed: 1,
            output_path: dir.path().join("missing-dir").join("game.ndjson"),
        },
        Task {
            state: GameState::new(),
            simulations: 8,
            exploration: 2.0,
            seed: 2,
            output_path: dir.path().join("game.ndjson"),
        },
    ];
    let config = RuntimeConfig {
        num_workers: 1,
        max_batch_size: 1,
        dispatch_poll_ms: 1,
        task_wait_ms: 1,
        prediction_wait_ms: 1,
        predictor_poll_ms: 1,
    };
    let report = run_scheduler(UniformEvaluator, &tasks, &config);
    assert_eq!(report.completed, 1);
    assert_eq!(report.failed, 1);
    assert!(dir.path().join("game.ndjson").exists());
}

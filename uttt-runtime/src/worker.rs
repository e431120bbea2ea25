//! Self-play worker loop.

use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;
use std::time::Duration;

use uttt_core::engine;
use uttt_mcts::guided::GuidedMcts;
use uttt_mcts::SelectionPolicy;
use uttt_replay::{EvaluationWriter, GuidedDecisionRecord, ReplayError};

use crate::dispatcher::{CLOSING, WAITING};
use crate::slot::{EvalSlot, SlotEvaluator};
use crate::task::Task;

/// What a worker accomplished before it was closed. Tasks that fail on
/// I/O are counted and skipped; the worker itself never gives up, because
/// the dispatcher's accounting assumes workers stay alive until told to
/// close.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkerReport {
    pub completed: usize,
    pub failed: usize,
}

/// Poll for assignments and play each assigned task to completion.
/// Returns when the dispatcher stores `CLOSING`.
pub fn run_worker(
    tasks: &[Task],
    assignment: &AtomicI64,
    slot: &EvalSlot,
    task_wait: Duration,
    prediction_wait: Duration,
) -> WorkerReport {
    let mut report = WorkerReport::default();
    loop {
        while assignment.load(Ordering::Acquire) == WAITING {
            thread::sleep(task_wait);
        }
        let assigned = assignment.load(Ordering::Acquire);
        if assigned == CLOSING {
            return report;
        }
        let task = &tasks[assigned as usize];
        match play_task(task, SlotEvaluator::new(slot, prediction_wait)) {
            Ok(()) => report.completed += 1,
            Err(_) => report.failed += 1,
        }
        assignment.store(WAITING, Ordering::Release);
    }
}

/// Play one full game, recording every decision. The executed move is
/// sampled by visit count so repeated tasks from the same opening still
/// produce varied games.
fn play_task(task: &Task, evaluator: SlotEvaluator<'_>) -> Result<(), ReplayError> {
    let mut writer = EvaluationWriter::create(&task.output_path)?;
    let mut state = task.state;
    let mut mcts = GuidedMcts::new(
        state,
        task.simulations,
        task.exploration,
        evaluator,
        task.seed,
    );
    while !state.is_terminal() {
        mcts.run();
        let record = GuidedDecisionRecord::new(&mcts.evaluated_state(), &mcts.evaluated_actions());
        writer.write_record(&record)?;
        let action = mcts.select_action(SelectionPolicy::Sample);
        state = engine::play(&state, action);
        mcts.synchronize(&state);
    }
    writer.flush()
}

//! Thread wiring for one batched self-play run.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize};
use std::thread;
use std::time::Duration;

use uttt_mcts::eval::BatchEvaluator;

use crate::config::RuntimeConfig;
use crate::dispatcher::{run_dispatcher, WAITING};
use crate::predictor::run_predictor;
use crate::slot::EvalSlot;
use crate::task::Task;
use crate::worker::run_worker;

#[derive(Debug, Default, Clone, Copy)]
pub struct SchedulerReport {
    pub completed: usize,
    pub failed: usize,
    pub batches: u64,
    pub evaluations: u64,
}

/// Run every task to completion across `config.num_workers` worker
/// threads, one dispatcher, and one predictor driving `evaluator`.
/// Returns once all threads have shut down cleanly.
pub fn run_scheduler<E: BatchEvaluator + Send>(
    evaluator: E,
    tasks: &[Task],
    config: &RuntimeConfig,
) -> SchedulerReport {
    let num_workers = config.num_workers;
    let assignments: Vec<AtomicI64> = (0..num_workers).map(|_| AtomicI64::new(WAITING)).collect();
    let slots: Vec<EvalSlot> = (0..num_workers).map(|_| EvalSlot::new()).collect();
    let live_workers = AtomicUsize::new(num_workers);
    let predictor_closing = AtomicBool::new(false);

    let dispatch_poll = Duration::from_millis(config.dispatch_poll_ms);
    let task_wait = Duration::from_millis(config.task_wait_ms);
    let prediction_wait = Duration::from_millis(config.prediction_wait_ms);
    let predictor_poll = Duration::from_millis(config.predictor_poll_ms);

    thread::scope(|scope| {
        let dispatcher = scope.spawn(|| {
            run_dispatcher(
                tasks.len(),
                &assignments,
                &live_workers,
                &predictor_closing,
                dispatch_poll,
            )
        });
        let workers: Vec<_> = (0..num_workers)
            .map(|id| {
                let assignment = &assignments[id];
                let slot = &slots[id];
                scope.spawn(move || run_worker(tasks, assignment, slot, task_wait, prediction_wait))
            })
            .collect();
        let predictor = scope.spawn(|| {
            run_predictor(
                evaluator,
                &slots,
                &live_workers,
                &predictor_closing,
                config.max_batch_size,
                predictor_poll,
            )
        });

        let mut report = SchedulerReport::default();
        for worker in workers {
            let worker_report = worker.join().expect("worker thread panicked");
            report.completed += worker_report.completed;
            report.failed += worker_report.failed;
        }
        dispatcher.join().expect("dispatcher thread panicked");
        let stats = predictor.join().expect("predictor thread panicked");
        report.batches = stats.batches;
        report.evaluations = stats.evaluations;
        report
    })
}

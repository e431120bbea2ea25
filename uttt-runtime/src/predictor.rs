//! Batch predictor loop.
//!
//! Scans the worker slots round-robin, gathers pending requests into a
//! batch, evaluates, and scatters results back. A batch fires when it is
//! full, when every live worker is represented, or (during shutdown) as
//! soon as it is non-empty, so no request is ever stranded.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use uttt_mcts::encode::{EncodedState, PolicyLogits, POLICY_LEN};
use uttt_mcts::eval::BatchEvaluator;

use crate::slot::EvalSlot;

#[derive(Debug, Default, Clone, Copy)]
pub struct PredictorStats {
    pub batches: u64,
    pub evaluations: u64,
}

/// Collect up to `max_batch` requested slot indexes into `selected`,
/// scanning from `shift` so no worker is starved by its position.
pub fn scan_requested(
    slots: &[EvalSlot],
    shift: usize,
    max_batch: usize,
    selected: &mut Vec<usize>,
) {
    selected.clear();
    for i in 0..slots.len() {
        let id = (i + shift) % slots.len();
        if slots[id].is_requested() {
            selected.push(id);
            if selected.len() == max_batch {
                break;
            }
        }
    }
}

/// Serve evaluation requests until the dispatcher signals closing and no
/// request remains pending. The closing flag is read before each scan, so
/// a request published before the signal is always seen and served.
pub fn run_predictor<E: BatchEvaluator>(
    mut evaluator: E,
    slots: &[EvalSlot],
    live_workers: &AtomicUsize,
    closing: &AtomicBool,
    max_batch: usize,
    poll: Duration,
) -> PredictorStats {
    let mut stats = PredictorStats::default();
    let mut shift = 0usize;
    let mut selected: Vec<usize> = Vec::with_capacity(max_batch);
    let mut inputs: Vec<EncodedState> = Vec::with_capacity(max_batch);
    let mut policies: Vec<PolicyLogits> = vec![[0.0; POLICY_LEN]; max_batch];
    let mut values: Vec<f32> = vec![0.0; max_batch];
    loop {
        let closing_now = closing.load(Ordering::Acquire);
        scan_requested(slots, shift, max_batch, &mut selected);
        let n = selected.len();
        if n > 0
            && (n == max_batch || n == live_workers.load(Ordering::Acquire) || closing_now)
        {
            inputs.clear();
            inputs.extend(selected.iter().map(|&id| slots[id].input()));
            evaluator.evaluate_batch(&inputs, &mut policies[..n], &mut values[..n]);
            // scatter, then clear each flag; the flag store is what makes
            // the result visible to the waiting worker
            for (i, &id) in selected.iter().enumerate() {
                slots[id].fulfill(&policies[i], values[i]);
            }
            stats.batches += 1;
            stats.evaluations += n as u64;
            shift = (selected[n - 1] + 1) % slots.len();
            continue;
        }
        if closing_now && n == 0 {
            return stats;
        }
        thread::sleep(poll);
    }
}

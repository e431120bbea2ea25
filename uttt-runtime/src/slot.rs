//! Per-worker evaluation slot: a one-element mailbox between a worker and
//! the predictor.
//!
//! Ownership of the payload follows the `requested` flag. While the flag is
//! false the worker owns the payload exclusively; storing true (Release)
//! hands it to the predictor, which reads the input, writes the outputs,
//! and hands it back by storing false (Release). Each side confirms
//! ownership with an Acquire load before touching the payload, so the flag
//! orders every payload access. The flag must only ever be cleared by the
//! predictor and only ever be set by the owning worker.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use uttt_mcts::encode::{EncodedState, PolicyLogits, ENCODED_LEN, POLICY_LEN};
use uttt_mcts::eval::Evaluator;

struct SlotData {
    input: EncodedState,
    policy: PolicyLogits,
    value: f32,
}

pub struct EvalSlot {
    requested: AtomicBool,
    data: UnsafeCell<SlotData>,
}

// Payload access is serialized by the `requested` flag protocol above.
unsafe impl Sync for EvalSlot {}

impl EvalSlot {
    pub fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            data: UnsafeCell::new(SlotData {
                input: [0; ENCODED_LEN],
                policy: [0.0; POLICY_LEN],
                value: 0.0,
            }),
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Worker side: publish an input and hand the slot to the predictor.
    /// Must only be called while the flag is false, by the slot's worker.
    pub fn submit(&self, input: &EncodedState) {
        debug_assert!(!self.is_requested());
        unsafe {
            (*self.data.get()).input = *input;
        }
        self.requested.store(true, Ordering::Release);
    }

    /// Worker side: read the outputs after the predictor cleared the flag.
    pub fn response(&self) -> (PolicyLogits, f32) {
        debug_assert!(!self.is_requested());
        unsafe {
            let data = &*self.data.get();
            (data.policy, data.value)
        }
    }

    /// Predictor side: copy out the pending input. Must only be called
    /// while the flag is true.
    pub fn input(&self) -> EncodedState {
        debug_assert!(self.is_requested());
        unsafe { (*self.data.get()).input }
    }

    /// Predictor side: write the outputs, then return the slot to the
    /// worker. The flag store is last so the worker never observes a
    /// half-written result.
    pub fn fulfill(&self, policy: &PolicyLogits, value: f32) {
        debug_assert!(self.is_requested());
        unsafe {
            let data = &mut *self.data.get();
            data.policy = *policy;
            data.value = value;
        }
        self.requested.store(false, Ordering::Release);
    }
}

impl Default for EvalSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The worker-facing half of a slot, shaped as a search evaluator: submit,
/// sleep until the predictor answers, read back.
pub struct SlotEvaluator<'a> {
    slot: &'a EvalSlot,
    wait: Duration,
}

impl<'a> SlotEvaluator<'a> {
    pub fn new(slot: &'a EvalSlot, wait: Duration) -> Self {
        Self { slot, wait }
    }
}

impl Evaluator for SlotEvaluator<'_> {
    fn evaluate(&mut self, input: &EncodedState) -> (PolicyLogits, f32) {
        self.slot.submit(input);
        while self.slot.is_requested() {
            thread::sleep(self.wait);
        }
        self.slot.response()
    }
}

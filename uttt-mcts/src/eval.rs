//! Evaluator boundary for guided search.
//!
//! The search never knows what produces its policy/value estimates; anything
//! that maps an encoded state to 81 policy logits and a scalar value in
//! [-1, 1] (from the mover's perspective) plugs in here.

use crate::encode::{EncodedState, PolicyLogits, POLICY_LEN};

/// Synchronous single-state evaluation, as seen from inside one search.
pub trait Evaluator {
    fn evaluate(&mut self, input: &EncodedState) -> (PolicyLogits, f32);
}

/// Batched evaluation across many concurrent searches. Output slices are
/// indexed like `inputs`; entries beyond `inputs.len()` are left untouched.
pub trait BatchEvaluator {
    fn evaluate_batch(
        &mut self,
        inputs: &[EncodedState],
        policies: &mut [PolicyLogits],
        values: &mut [f32],
    );
}

/// Zero logits (uniform priors after softmax) and a neutral value. Useful
/// as a baseline and for exercising guided search without a model.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformEvaluator;

impl Evaluator for UniformEvaluator {
    fn evaluate(&mut self, _input: &EncodedState) -> (PolicyLogits, f32) {
        ([0.0; POLICY_LEN], 0.0)
    }
}

impl BatchEvaluator for UniformEvaluator {
    fn evaluate_batch(
        &mut self,
        inputs: &[EncodedState],
        policies: &mut [PolicyLogits],
        values: &mut [f32],
    ) {
        for i in 0..inputs.len() {
            policies[i] = [0.0; POLICY_LEN];
            values[i] = 0.0;
        }
    }
}

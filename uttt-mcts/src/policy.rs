//! Post-search action selection over a root's evaluated children.

use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown selection policy {0:?}")]
    Unknown(String),
}

/// How an executed move is chosen from visit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Argmax visit count, ties broken uniformly at random.
    Best,
    /// Visit-count-weighted random draw (keeps exploration in recorded
    /// training data).
    Sample,
    /// Uniform random over the candidates.
    Random,
}

impl FromStr for SelectionPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" => Ok(Self::Best),
            "sample" => Ok(Self::Sample),
            "random" => Ok(Self::Random),
            other => Err(PolicyError::Unknown(other.to_string())),
        }
    }
}

/// Pick a candidate index from `visits` under `policy`.
///
/// # Panics
///
/// Panics when `visits` is empty, or when `Sample` is asked to draw from
/// all-zero counts. Both indicate a calling-code bug: selection runs only
/// after a search produced evaluated children.
pub fn select_index(visits: &[u32], policy: SelectionPolicy, rng: &mut impl Rng) -> usize {
    assert!(!visits.is_empty(), "no candidates to select from");
    match policy {
        SelectionPolicy::Best => {
            let mut best: Vec<usize> = Vec::with_capacity(visits.len());
            let mut best_count = 0u32;
            for (i, &n) in visits.iter().enumerate() {
                if n > best_count {
                    best.clear();
                    best.push(i);
                    best_count = n;
                } else if n == best_count {
                    best.push(i);
                }
            }
            if best.len() == 1 {
                best[0]
            } else {
                best[rng.gen_range(0..best.len())]
            }
        }
        SelectionPolicy::Sample => {
            let total: u32 = visits.iter().sum();
            assert!(total > 0, "cannot sample from zero total visits");
            let threshold = rng.gen_range(1..=total);
            let mut cumulative = 0u32;
            for (i, &n) in visits.iter().enumerate() {
                cumulative += n;
                if threshold <= cumulative {
                    return i;
                }
            }
            unreachable!("threshold is bounded by the total visit count")
        }
        SelectionPolicy::Random => rng.gen_range(0..visits.len()),
    }
}

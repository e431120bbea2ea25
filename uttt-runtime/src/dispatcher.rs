//! Task dispatch over per-worker assignment cells.
//!
//! Each worker owns one `AtomicI64`: a non-negative value is a task index,
//! `WAITING` means idle and claimable, `CLOSING` tells the worker to exit.
//! Only the dispatcher moves a cell away from `WAITING`, and only the
//! worker moves it back, so no compare-and-swap is needed.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

pub const WAITING: i64 = -1;
pub const CLOSING: i64 = -2;

/// Hand out `num_tasks` task indexes, then shut everything down: close
/// each worker as it goes idle, and signal the predictor once no live
/// workers remain.
pub fn run_dispatcher(
    num_tasks: usize,
    assignments: &[AtomicI64],
    live_workers: &AtomicUsize,
    predictor_closing: &AtomicBool,
    poll: Duration,
) {
    let mut next_task = 0usize;
    'dispatch: while next_task < num_tasks {
        for assignment in assignments {
            if assignment.load(Ordering::Acquire) == WAITING {
                assignment.store(next_task as i64, Ordering::Release);
                next_task += 1;
                if next_task >= num_tasks {
                    break 'dispatch;
                }
            }
        }
        thread::sleep(poll);
    }
    while live_workers.load(Ordering::Acquire) > 0 {
        for assignment in assignments {
            if assignment.load(Ordering::Acquire) == WAITING {
                assignment.store(CLOSING, Ordering::Release);
                live_workers.fetch_sub(1, Ordering::AcqRel);
            }
        }
        thread::sleep(poll);
    }
    predictor_closing.store(true, Ordering::Release);
}

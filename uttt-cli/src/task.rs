//! Task-list parsing for `uttt generate`.
//!
//! One task per line, whitespace separated:
//!
//! ```text
//! <93-digit state> <simulations> <exploration> <seed> <output-path>
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use uttt_core::{parse_state, StateParseError};
use uttt_runtime::Task;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to read task list: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: missing field {field}")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: invalid state: {source}")]
    InvalidState {
        line: usize,
        source: StateParseError,
    },
    #[error("line {line}: invalid {field}: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Parse one task line. `line` is 1-based and only used for error context.
pub fn parse_task_line(text: &str, line: usize) -> Result<Task, TaskError> {
    let mut fields = text.split_whitespace();
    let mut next = |field: &'static str| {
        fields
            .next()
            .ok_or(TaskError::MissingField { line, field })
    };

    let state_text = next("state")?;
    let state = parse_state(state_text)
        .map_err(|source| TaskError::InvalidState { line, source })?;
    let simulations = parse_number(next("simulations")?, "simulations", line)?;
    let exploration = parse_number(next("exploration")?, "exploration", line)?;
    let seed = parse_number(next("seed")?, "seed", line)?;
    let output_path = PathBuf::from(next("output-path")?);

    Ok(Task {
        state,
        simulations,
        exploration,
        seed,
        output_path,
    })
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<T, TaskError> {
    value.parse().map_err(|_| TaskError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Load a task-list file, skipping blank lines.
pub fn load_tasks(path: impl AsRef<Path>) -> Result<Vec<Task>, TaskError> {
    let text = std::fs::read_to_string(path)?;
    let mut tasks = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        tasks.push(parse_task_line(line, i + 1)?);
    }
    Ok(tasks)
}

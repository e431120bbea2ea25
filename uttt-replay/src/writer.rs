use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer for decision records. One file per task;
/// opening truncates, so a re-run replaces stale output.
pub struct EvaluationWriter {
    w: BufWriter<File>,
}

impl EvaluationWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let f = File::create(path)?;
        Ok(Self {
            w: BufWriter::new(f),
        })
    }

    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<(), ReplayError> {
        let mut buf = serde_json::to_vec(record)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.w.flush()?;
        Ok(())
    }
}

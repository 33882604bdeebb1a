//! # Domain Entities
//!
//! The "Nouns" of the exporter: a unit of work (`ExportTask`), the data read
//! for one table (`TableData`), and the outcome of each task (`TaskResult`).
//!
//! We use `serde` so results can be written straight into the JSON run report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One table to export and the file it is written to.
///
/// Created by the orchestrator, one per table, and dropped when the batch
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTask {
    pub table: String,
    /// `<folder>/<table>.csv`
    pub output_file: PathBuf,
}

impl ExportTask {
    pub fn new(table: &str, folder: &Path) -> Self {
        Self {
            table: table.to_string(),
            output_file: output_file_for(folder, table),
        }
    }
}

/// Whether `table` can be used as-is as a file name inside the export folder.
///
/// Quoted identifiers may contain path separators or be `..`; such names would
/// escape the folder, so they are never written.
pub fn is_safe_file_stem(table: &str) -> bool {
    !table.is_empty()
        && table != "."
        && table != ".."
        && !table.contains(['/', '\\', '\0'])
}

/// Where the export of `table` lands inside `folder`.
pub fn output_file_for(folder: &Path, table: &str) -> PathBuf {
    folder.join(format!("{}.csv", table))
}

/// The full result set of a `SELECT *`, held in memory before writing.
///
/// Every cell is already rendered as text; `NULL` becomes an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    /// Column names in result order. These become the CSV header.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lifecycle of an export task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Succeeded,
    Failed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "PENDING"),
            TaskStatus::Succeeded => write!(f, "SUCCEEDED"),
            TaskStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Captures the outcome of an individual export task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Table name.
    pub table: String,
    /// Outcome status.
    pub status: TaskStatus,
    /// Data rows written (header excluded).
    pub rows: u64,
    /// Bytes written to the output file.
    pub bytes: u64,
    /// Wall-clock time taken for execution in seconds.
    pub duration: f64,
    /// Detailed error message if the task failed.
    pub error: Option<String>,
}

impl TaskResult {
    /// A task that has been queued but has not reported back.
    pub fn pending(table: String) -> Self {
        Self {
            table,
            status: TaskStatus::Pending,
            rows: 0,
            bytes: 0,
            duration: 0.0,
            error: None,
        }
    }

    /// Creates a successful TaskResult.
    pub fn success(table: String, rows: u64, bytes: u64, duration: f64) -> Self {
        Self {
            table,
            status: TaskStatus::Succeeded,
            rows,
            bytes,
            duration,
            error: None,
        }
    }

    /// Creates a failed TaskResult with an error message.
    pub fn failure(table: String, duration: f64, error: String) -> Self {
        Self {
            table,
            status: TaskStatus::Failed,
            rows: 0,
            bytes: 0,
            duration,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

/// Aggregated outcome of one orchestrated batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One entry per task, in launch order.
    pub results: Vec<TaskResult>,
    /// Wall-clock time from first launch to the last join, in seconds.
    pub duration: f64,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn total_rows(&self) -> u64 {
        self.results.iter().map(|r| r.rows).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.results.iter().map(|r| r.bytes).sum()
    }
}

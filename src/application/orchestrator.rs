// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! # Export Orchestrator
//!
//! Fans a list of tables out to a bounded pool of worker threads and waits for
//! all of them. Tasks travel to workers over a `crossbeam_channel` queue and
//! each worker sends its `TaskResult` back over a second channel. The call
//! returns only after every worker has been joined, in launch order.
//!
//! With at least as many workers as tables this is one worker per table.

use crate::application::table_exporter::TableExporter;
use crate::domain::entities::{BatchReport, ExportTask, TaskResult, TaskStatus};
use crossbeam_channel::unbounded;
use log::{error, info, warn};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

pub struct ExportOrchestrator {
    exporter: Arc<TableExporter>,
    max_workers: usize,
}

impl ExportOrchestrator {
    pub fn new(exporter: Arc<TableExporter>, max_workers: usize) -> Self {
        Self {
            exporter,
            max_workers: std::cmp::max(1, max_workers),
        }
    }

    /// Returns `true` once every table has been attempted, whatever the
    /// individual outcomes; `false` only when there was nothing to export.
    pub fn export_all(&self, tables: &[String], folder: &Path) -> bool {
        self.run_batch(tables, folder).is_some()
    }

    /// Runs the batch and returns per-task results, or `None` for an empty
    /// table list (in which case nothing is touched).
    pub fn run_batch(&self, tables: &[String], folder: &Path) -> Option<BatchReport> {
        if tables.is_empty() {
            info!("No tables found to export!");
            return None;
        }

        let start_time = Instant::now();
        let tasks = plan_tasks(tables, folder);
        let worker_count = std::cmp::min(self.max_workers, tasks.len());
        info!(
            "Exporting {} tables with {} workers",
            tasks.len(),
            worker_count
        );

        let (task_tx, task_rx) = unbounded::<(usize, ExportTask)>();
        let (result_tx, result_rx) = unbounded::<(usize, TaskResult)>();

        // Everything is queued before the first worker starts.
        for (idx, task) in tasks.iter().cloned().enumerate() {
            if task_tx.send((idx, task)).is_err() {
                break;
            }
        }
        drop(task_tx);

        let mut handles = Vec::with_capacity(worker_count);
        for i in 0..worker_count {
            let rx_worker = task_rx.clone();
            let tx_worker = result_tx.clone();
            let exporter = Arc::clone(&self.exporter);

            let spawned = thread::Builder::new()
                .name(format!("export-worker-{}", i))
                .spawn(move || {
                    while let Ok((idx, task)) = rx_worker.recv() {
                        let result = run_isolated(&exporter, &task);
                        if tx_worker.send((idx, result)).is_err() {
                            break;
                        }
                    }
                });
            match spawned {
                Ok(h) => handles.push(h),
                Err(e) => error!("Failed to start export worker {}: {}", i, e),
            }
        }
        drop(result_tx);

        // Join barrier.
        for (i, h) in handles.into_iter().enumerate() {
            if h.join().is_err() {
                error!("Export worker {} terminated abnormally", i);
            }
        }

        let mut results: Vec<TaskResult> = tasks
            .iter()
            .map(|t| TaskResult::pending(t.table.clone()))
            .collect();
        for (idx, result) in result_rx.iter() {
            results[idx] = result;
        }
        for r in results.iter_mut().filter(|r| r.status == TaskStatus::Pending) {
            warn!("No result reported for {}", r.table);
            *r = TaskResult::failure(r.table.clone(), 0.0, "task did not run".to_string());
        }

        let report = BatchReport {
            results,
            duration: start_time.elapsed().as_secs_f64(),
        };
        info!(
            "Export batch finished in {:.2}s: {}/{} tables succeeded",
            report.duration,
            report.succeeded(),
            report.results.len()
        );
        Some(report)
    }
}

/// One task per distinct table, in first-seen order.
fn plan_tasks(tables: &[String], folder: &Path) -> Vec<ExportTask> {
    let mut seen = HashSet::new();
    tables
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .map(|t| ExportTask::new(t, folder))
        .collect()
}

/// A panic inside one export becomes that task's failure and the worker
/// moves on to the next task.
fn run_isolated(exporter: &TableExporter, task: &ExportTask) -> TaskResult {
    match panic::catch_unwind(AssertUnwindSafe(|| exporter.run_task(task))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("error exporting for: {}", task.table);
            error!("export task panicked: {}", reason);
            TaskResult::failure(task.table.clone(), 0.0, format!("panicked: {}", reason))
        }
    }
}

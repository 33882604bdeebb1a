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


//! # Table Exporter
//!
//! Reads one table in full through the `ExtractionPort` and writes it as a
//! comma-separated file with a header row to `<folder>/<table>.csv`.
//!
//! `run_task` is the per-task failure boundary: whatever goes wrong is logged
//! and turned into a failed `TaskResult`, never returned as an error to the
//! worker that called it.

use crate::domain::entities::{
    is_safe_file_stem, output_file_for, ExportTask, TableData, TaskResult,
};
use crate::domain::errors::{ExportError, Result};
use crate::ports::extraction_port::ExtractionPort;
use csv::{QuoteStyle, WriterBuilder};
use log::{error, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub struct TableExporter {
    extraction_port: Arc<dyn ExtractionPort>,
}

impl TableExporter {
    pub fn new(extraction_port: Arc<dyn ExtractionPort>) -> Self {
        Self { extraction_port }
    }

    /// Exports `table` to `<folder>/<table>.csv`, overwriting any prior file.
    pub fn export(&self, table: &str, folder: &Path) -> Result<TaskResult> {
        self.export_to(table, &output_file_for(folder, table))
    }

    /// Runs one task to completion. Never fails; see module docs.
    pub fn run_task(&self, task: &ExportTask) -> TaskResult {
        let start_time = Instant::now();
        info!("starting export for: {}", task.table);

        match self.export_to(&task.table, &task.output_file) {
            Ok(res) => {
                info!(
                    "export complete for: {} ({} rows, {} bytes)",
                    task.table, res.rows, res.bytes
                );
                res
            }
            Err(e) => {
                error!("error exporting for: {}", task.table);
                error!("{}", e);
                TaskResult::failure(
                    task.table.clone(),
                    start_time.elapsed().as_secs_f64(),
                    e.to_string(),
                )
            }
        }
    }

    fn export_to(&self, table: &str, output_file: &Path) -> Result<TaskResult> {
        let start_time = Instant::now();
        if !is_safe_file_stem(table) {
            return Err(ExportError::ExtractionError {
                table: table.to_string(),
                reason: "table name cannot be used as a file name".to_string(),
            });
        }

        // The whole result set is in memory before the file is touched, so a
        // failed read leaves no file behind.
        let data = self.extraction_port.read_table(table)?;
        let rows = data.rows.len() as u64;
        let bytes = write_csv(&data, output_file)?;

        Ok(TaskResult::success(
            table.to_string(),
            rows,
            bytes,
            start_time.elapsed().as_secs_f64(),
        ))
    }
}

/// Writes header plus rows to `path` (truncating) and returns the file size.
fn write_csv(data: &TableData, path: &Path) -> Result<u64> {
    let file = File::create(path)?;
    let mut wtr = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .from_writer(BufWriter::with_capacity(128 * 1024, file));

    wtr.write_record(&data.columns)?;
    for row in &data.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    drop(wtr);

    Ok(std::fs::metadata(path)?.len())
}

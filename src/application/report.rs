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


//! JSON summary of a run, written next to (never inside) the export folder.

use crate::domain::entities::BatchReport;
use crate::domain::errors::{ExportError, Result};
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};

pub fn write_report(
    report: &BatchReport,
    output_root: &Path,
    folder_name: &str,
    validated: bool,
) -> Result<PathBuf> {
    let duration_secs = report.duration;
    let summary = json!({
        "summary": {
            "folder": folder_name,
            "total_tasks": report.results.len(),
            "success": report.succeeded(),
            "failed": report.failed(),
            "total_rows": report.total_rows(),
            "total_bytes": report.total_bytes(),
            "total_duration_seconds": duration_secs,
            "validated": validated,
        },
        "details": report.results
    });

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let report_path = output_root.join(format!("{}_report_{}.json", folder_name, timestamp));

    let file = File::create(&report_path)?;
    serde_json::to_writer_pretty(file, &summary)
        .map_err(|e| ExportError::ReportError(e.to_string()))?;

    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TaskResult;

    #[test]
    fn test_report_written_outside_export_folder() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("db_SALES")).unwrap();
        let report = BatchReport {
            results: vec![
                TaskResult::success("Customers".into(), 3, 40, 0.5),
                TaskResult::failure("Orders".into(), 0.1, "boom".into()),
            ],
            duration: 0.6,
        };

        let path = write_report(&report, root.path(), "db_SALES", false).unwrap();

        assert_eq!(path.parent().unwrap(), root.path());
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("db_SALES_report_") && name.ends_with(".json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["success"], 1);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["summary"]["validated"], false);
        assert_eq!(value["details"][1]["status"], "FAILED");
        assert_eq!(std::fs::read_dir(root.path().join("db_SALES")).unwrap().count(), 0);
    }
}

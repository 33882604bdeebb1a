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


//! # Process Driver
//!
//! Runs the export as a chain of gates, each a hard stop on failure:
//! output folder creation, table listing, the export batch, then validation.
//! Configuration is checked earlier, when `AppConfig` is loaded.
//!
//! Every outcome is reported through the log; `RunOutcome` exists so callers
//! and tests can tell the gates apart.

use crate::application::orchestrator::ExportOrchestrator;
use crate::application::output_validator;
use crate::application::report;
use crate::application::table_exporter::TableExporter;
use crate::config::AppConfig;
use crate::domain::errors::{ExportError, Result};
use crate::ports::extraction_port::ExtractionPort;
use crate::ports::metadata_port::MetadataPort;
use log::{error, info, warn};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The output folder already existed or could not be created.
    FolderUnavailable,
    /// The catalog listed no base tables (or could not be read).
    NothingToExport,
    /// The batch ran; `validated` tells whether every file is present and non-empty.
    Completed { validated: bool },
}

/// Creates `folder` (not its parents), refusing to reuse an existing one.
pub fn create_output_folder(folder: &Path) -> Result<()> {
    match std::fs::create_dir(folder) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(ExportError::FolderExists(folder.to_path_buf()))
        }
        Err(e) => Err(ExportError::IoError(e)),
    }
}

pub struct ProcessDriver {
    config: AppConfig,
    metadata_port: Arc<dyn MetadataPort>,
    orchestrator: ExportOrchestrator,
}

impl ProcessDriver {
    pub fn new(
        config: AppConfig,
        metadata_port: Arc<dyn MetadataPort>,
        extraction_port: Arc<dyn ExtractionPort>,
        num_workers: usize,
    ) -> Self {
        let exporter = Arc::new(TableExporter::new(extraction_port));
        Self {
            config,
            metadata_port,
            orchestrator: ExportOrchestrator::new(exporter, num_workers),
        }
    }

    pub fn run(&self) -> RunOutcome {
        let folder = self.config.output_folder();
        if let Err(e) = create_output_folder(&folder) {
            error!("{}", e);
            return RunOutcome::FolderUnavailable;
        }
        info!("Exporting into {}", folder.display());

        let tables = match self.metadata_port.list_base_tables() {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to list tables: {}", e);
                Vec::new()
            }
        };
        if tables.is_empty() {
            info!("No tables available to export");
            return RunOutcome::NothingToExport;
        }

        let batch = match self.orchestrator.run_batch(&tables, &folder) {
            Some(b) => b,
            None => return RunOutcome::NothingToExport,
        };

        let validated = output_validator::validate(&tables, &folder);

        if self.config.export.write_report {
            let output_root = Path::new(&self.config.export.output_root);
            match report::write_report(&batch, output_root, &self.config.folder_name(), validated) {
                Ok(path) => info!("Run report written to {}", path.display()),
                Err(e) => warn!("Could not write run report: {}", e),
            }
        }

        if validated {
            info!("process complete!");
        } else {
            warn!("not all data was exported!");
        }
        RunOutcome::Completed { validated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ExportConfig};
    use crate::test_utils::{MockExtractionPort, MockMetadataPort};
    use std::fs;
    use std::sync::atomic::Ordering;

    fn config(root: &Path, write_report: bool) -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                server: "dbhost:1521".to_string(),
                database: "SALES".to_string(),
                ..Default::default()
            },
            export: ExportConfig {
                output_root: root.to_str().unwrap().to_string(),
                write_report,
                ..Default::default()
            },
        }
    }

    fn sales_port() -> MockExtractionPort {
        MockExtractionPort::default()
            .with_table("Customers", &["ID", "NAME"], &[&["1", "Ada"]])
            .with_table("Orders", &["ID", "CUSTOMER_ID"], &[&["10", "1"]])
    }

    #[test]
    fn test_create_output_folder_refuses_existing() {
        let root = tempfile::tempdir().unwrap();
        let folder = config(root.path(), false).output_folder();
        assert_eq!(folder, root.path().join("db_SALES"));

        create_output_folder(&folder).unwrap();
        assert!(folder.is_dir());

        let err = create_output_folder(&folder).unwrap_err();
        assert!(matches!(err, ExportError::FolderExists(ref p) if p == &folder));
    }

    #[test]
    fn test_successful_run() {
        let root = tempfile::tempdir().unwrap();
        let driver = ProcessDriver::new(
            config(root.path(), false),
            Arc::new(MockMetadataPort::with_tables(&["Customers", "Orders"])),
            Arc::new(sales_port()),
            4,
        );

        assert_eq!(driver.run(), RunOutcome::Completed { validated: true });

        let folder = root.path().join("db_SALES");
        assert_eq!(
            fs::read_to_string(folder.join("Customers.csv")).unwrap(),
            "ID,NAME\n1,Ada\n"
        );
        assert!(fs::metadata(folder.join("Orders.csv")).unwrap().len() > 0);
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 2);
    }

    #[test]
    fn test_one_failed_table_fails_validation() {
        let root = tempfile::tempdir().unwrap();
        let driver = ProcessDriver::new(
            config(root.path(), false),
            Arc::new(MockMetadataPort::with_tables(&["Customers", "Orders"])),
            Arc::new(sales_port().failing_on("Orders")),
            4,
        );

        assert_eq!(driver.run(), RunOutcome::Completed { validated: false });

        let folder = root.path().join("db_SALES");
        assert!(fs::metadata(folder.join("Customers.csv")).unwrap().len() > 0);
        assert!(!folder.join("Orders.csv").exists());
    }

    #[test]
    fn test_no_tables_stops_before_export() {
        let root = tempfile::tempdir().unwrap();
        let port = Arc::new(sales_port());
        let driver = ProcessDriver::new(
            config(root.path(), true),
            Arc::new(MockMetadataPort::with_tables(&[])),
            port.clone(),
            4,
        );

        assert_eq!(driver.run(), RunOutcome::NothingToExport);
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read_dir(root.path().join("db_SALES")).unwrap().count(), 0);
        // No report for a run that exported nothing.
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_listing_failure_is_nothing_to_export() {
        let root = tempfile::tempdir().unwrap();
        let driver = ProcessDriver::new(
            config(root.path(), false),
            Arc::new(MockMetadataPort::failing()),
            Arc::new(sales_port()),
            4,
        );

        assert_eq!(driver.run(), RunOutcome::NothingToExport);
    }

    #[test]
    fn test_existing_folder_aborts_before_listing() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("db_SALES")).unwrap();
        fs::write(root.path().join("db_SALES").join("Customers.csv"), "old").unwrap();
        let port = Arc::new(sales_port());
        let driver = ProcessDriver::new(
            config(root.path(), false),
            Arc::new(MockMetadataPort::with_tables(&["Customers"])),
            port.clone(),
            4,
        );

        assert_eq!(driver.run(), RunOutcome::FolderUnavailable);
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            fs::read_to_string(root.path().join("db_SALES").join("Customers.csv")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_report_written_when_enabled() {
        let root = tempfile::tempdir().unwrap();
        let driver = ProcessDriver::new(
            config(root.path(), true),
            Arc::new(MockMetadataPort::with_tables(&["Customers"])),
            Arc::new(sales_port()),
            2,
        );

        assert_eq!(driver.run(), RunOutcome::Completed { validated: true });

        let reports: Vec<_> = fs::read_dir(root.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("db_SALES_report_"))
            .collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(fs::read_dir(root.path().join("db_SALES")).unwrap().count(), 1);
    }
}

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


//! Core error definitions for the table exporter.
//!
//! This module provides a centralized `ExportError` enum and a `Result` type
//! used throughout the application to handle database, CSV, I/O and
//! configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Error types encountered during the export process.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("A folder called '{}' already exists", .0.display())]
    FolderExists(PathBuf),

    #[error("Connection failed: {0}")]
    ConnectionError(String),

    #[error("Metadata discovery failed: {0}")]
    MetadataError(String),

    #[error("Extraction failed for {table}: {reason}")]
    ExtractionError { table: String, reason: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    OracleError(String),

    #[error("Report generation failed: {0}")]
    ReportError(String),
}

impl From<oracle::Error> for ExportError {
    fn from(e: oracle::Error) -> Self {
        ExportError::OracleError(e.to_string())
    }
}

/// A specialized Result type for the table exporter.
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_exists_message() {
        let e = ExportError::FolderExists(PathBuf::from("db_SALES"));
        assert_eq!(e.to_string(), "A folder called 'db_SALES' already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: ExportError = io.into();
        assert!(matches!(e, ExportError::IoError(_)));
        assert!(e.to_string().contains("denied"));
    }
}

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


//! # Output Validator
//!
//! Post-export completeness check: every expected `<table>.csv` must exist and
//! be non-empty. The check is read-only and stops at the first bad file, in
//! the order the tables were given.

use crate::domain::entities::{is_safe_file_stem, output_file_for};
use log::info;
use std::path::Path;

pub fn validate(tables: &[String], folder: &Path) -> bool {
    info!("validating files...");
    for table in tables {
        if !is_safe_file_stem(table) {
            info!("Expected file for table '{}' cannot exist: unusable file name", table);
            return false;
        }
        let file_name = output_file_for(folder, table);
        let size = match std::fs::metadata(&file_name) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                info!("Expected file : {} not found", file_name.display());
                return false;
            }
        };
        if size == 0 {
            info!("Expected file : {} has no data!", file_name.display());
            return false;
        }
    }
    info!("validation complete");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(tables: &[&str]) -> Vec<String> {
        tables.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_all_files_present_and_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Customers.csv"), "ID\n1\n").unwrap();
        fs::write(dir.path().join("Orders.csv"), "ID\n").unwrap();

        assert!(validate(&names(&["Customers", "Orders"]), dir.path()));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Customers.csv"), "ID\n1\n").unwrap();

        assert!(!validate(&names(&["Customers", "Orders"]), dir.path()));
    }

    #[test]
    fn test_empty_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Customers.csv"), "ID\n1\n").unwrap();
        fs::write(dir.path().join("Orders.csv"), "").unwrap();

        assert!(!validate(&names(&["Customers", "Orders"]), dir.path()));
    }

    #[test]
    fn test_directory_with_file_name_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Weird.csv")).unwrap();

        assert!(!validate(&names(&["Weird"]), dir.path()));
    }

    #[test]
    fn test_unsafe_table_name_fails_even_if_target_exists() {
        let root = tempfile::tempdir().unwrap();
        let folder = root.path().join("db_SALES");
        fs::create_dir(&folder).unwrap();
        fs::write(root.path().join("outside.csv"), "ID\n1\n").unwrap();

        assert!(!validate(&names(&["../outside"]), &folder));
    }

    #[test]
    fn test_empty_table_list_is_trivially_valid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate(&[], dir.path()));
    }
}

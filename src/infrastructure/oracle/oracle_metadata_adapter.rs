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


//! Infrastructure adapter for listing base tables from the Oracle catalog.

use crate::domain::errors::{ExportError, Result};
use crate::infrastructure::oracle::connector::OracleConnector;
use crate::ports::metadata_port::MetadataPort;
use log::{debug, info};

// Nested and secondary (domain index) tables are not user data tables.
const SQL_LIST_USER_TABLES: &str = "
    SELECT table_name
    FROM user_tables
    WHERE nested = 'NO' AND secondary = 'N'
    ORDER BY table_name
";
const SQL_LIST_OWNER_TABLES: &str = "
    SELECT table_name
    FROM all_tables
    WHERE owner = :1 AND nested = 'NO' AND secondary = 'N'
    ORDER BY table_name
";

/// Concrete implementation of `MetadataPort` for Oracle databases.
///
/// `schema` is matched exactly against `owner`, in the same form the
/// extraction adapter quotes it with.
///
/// `user_tables`/`all_tables` only hold tables, so views are excluded by
/// construction.
pub struct OracleMetadataAdapter {
    connector: OracleConnector,
    schema: Option<String>,
}

impl OracleMetadataAdapter {
    pub fn new(connector: OracleConnector, schema: Option<String>) -> Self {
        Self { connector, schema }
    }
}

impl MetadataPort for OracleMetadataAdapter {
    fn list_base_tables(&self) -> Result<Vec<String>> {
        let conn = self.connector.connect()?;
        let rows = match &self.schema {
            Some(owner) => {
                debug!("Listing base tables owned by {}", owner);
                conn.query(SQL_LIST_OWNER_TABLES, &[owner])
            }
            None => conn.query(SQL_LIST_USER_TABLES, &[]),
        }
        .map_err(|e| ExportError::MetadataError(e.to_string()))?;

        let mut tables = Vec::new();
        for row_result in rows {
            let row = row_result.map_err(|e| ExportError::MetadataError(e.to_string()))?;
            let name: String = row.get(0).map_err(|e| ExportError::MetadataError(e.to_string()))?;
            tables.push(name);
        }
        info!("Found {} base tables", tables.len());
        Ok(tables)
    }
}

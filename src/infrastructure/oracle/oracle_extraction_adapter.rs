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


//! Infrastructure adapter that reads a whole Oracle table into memory.

use crate::domain::entities::TableData;
use crate::domain::errors::{ExportError, Result};
use crate::infrastructure::oracle::connector::OracleConnector;
use crate::infrastructure::oracle::sql_utils::select_all_sql;
use crate::ports::extraction_port::ExtractionPort;
use base64::{engine::general_purpose, Engine as _};
use log::debug;
use oracle::sql_type::{OracleType, Timestamp};

/// Concrete implementation of `ExtractionPort` for Oracle databases.
///
/// Every `read_table` call opens a fresh connection, runs `SELECT *` and
/// renders each value as text: numbers verbatim, dates and timestamps in
/// `YYYY-MM-DD HH:MM:SS.ffffff` (zoned values get a trailing `+HH:MM`),
/// RAW/BLOB as base64. `NULL` is an empty field.
pub struct OracleExtractionAdapter {
    connector: OracleConnector,
    schema: Option<String>,
    prefetch_rows: u32,
}

impl OracleExtractionAdapter {
    pub fn new(connector: OracleConnector, schema: Option<String>, prefetch_rows: u32) -> Self {
        Self {
            connector,
            schema,
            prefetch_rows,
        }
    }

    /// Formats a single Oracle column value into a String representation.
    fn format_value(row: &oracle::Row, i: usize, otype: &OracleType) -> Result<String> {
        match otype {
            OracleType::Date | OracleType::Timestamp(_) | OracleType::TimestampLTZ(_) => {
                let v: Option<Timestamp> = row.get(i)?;
                Ok(v.map(|ts| Self::format_timestamp(&ts)).unwrap_or_default())
            }
            OracleType::TimestampTZ(_) => {
                let v: Option<Timestamp> = row.get(i)?;
                Ok(v.map(|ts| {
                    format!(
                        "{} {}",
                        Self::format_timestamp(&ts),
                        Self::format_tz_offset(ts.tz_hour_offset(), ts.tz_minute_offset())
                    )
                })
                .unwrap_or_default())
            }
            OracleType::Raw(_) | OracleType::BLOB => {
                let v: Option<Vec<u8>> = row.get(i)?;
                Ok(v.map(|b| general_purpose::STANDARD.encode(b)).unwrap_or_default())
            }
            _ => {
                let v: Option<String> = row.get(i)?;
                Ok(v.unwrap_or_default())
            }
        }
    }

    fn format_timestamp(ts: &Timestamp) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
            ts.year(),
            ts.month(),
            ts.day(),
            ts.hour(),
            ts.minute(),
            ts.second(),
            ts.nanosecond() / 1000
        )
    }

    /// `+HH:MM` / `-HH:MM`. Oracle gives both parts the sign of the offset.
    fn format_tz_offset(hour: i32, minute: i32) -> String {
        let total = hour * 60 + minute;
        let sign = if total < 0 { '-' } else { '+' };
        let total = total.abs();
        format!("{}{:02}:{:02}", sign, total / 60, total % 60)
    }

    fn internal_read(&self, table: &str) -> Result<TableData> {
        let conn = self.connector.connect()?;
        let sql = select_all_sql(self.schema.as_deref(), table);
        debug!("Executing: {}", sql);

        let mut stmt = conn.statement(&sql).prefetch_rows(self.prefetch_rows).build()?;
        let rows = stmt.query(&[])?;

        let col_infos = rows.column_info();
        let col_types: Vec<OracleType> =
            col_infos.iter().map(|c| c.oracle_type().clone()).collect();
        let columns: Vec<String> = col_infos.iter().map(|c| c.name().to_string()).collect();

        let mut data = TableData {
            columns,
            rows: Vec::new(),
        };
        for row_res in rows {
            let row = row_res?;
            let mut record = Vec::with_capacity(col_types.len());
            for (i, otype) in col_types.iter().enumerate() {
                record.push(Self::format_value(&row, i, otype)?);
            }
            data.rows.push(record);
        }
        Ok(data)
    }
}

impl ExtractionPort for OracleExtractionAdapter {
    fn read_table(&self, table: &str) -> Result<TableData> {
        self.internal_read(table).map_err(|e| match e {
            // Keep connection failures distinguishable in the logs.
            conn_err @ ExportError::ConnectionError(_) => conn_err,
            other => ExportError::ExtractionError {
                table: table.to_string(),
                reason: other.to_string(),
            },
        })
    }
}

//! In-memory port implementations shared by unit tests.

use crate::domain::entities::TableData;
use crate::domain::errors::{ExportError, Result};
use crate::ports::extraction_port::ExtractionPort;
use crate::ports::metadata_port::MetadataPort;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockMetadataPort {
    pub tables: Vec<String>,
    pub fail: bool,
}

impl MockMetadataPort {
    pub fn with_tables(tables: &[&str]) -> Self {
        Self {
            tables: tables.iter().map(|t| t.to_string()).collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            tables: vec![],
            fail: true,
        }
    }
}

impl MetadataPort for MockMetadataPort {
    fn list_base_tables(&self) -> Result<Vec<String>> {
        if self.fail {
            return Err(ExportError::ConnectionError("DB Down".to_string()));
        }
        Ok(self.tables.clone())
    }
}

/// Serves canned rows per table; listed tables fail, unknown tables error.
#[derive(Default)]
pub struct MockExtractionPort {
    pub data: HashMap<String, TableData>,
    pub failing: HashSet<String>,
    pub panicking: HashSet<String>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub seen: Mutex<Vec<String>>,
}

impl MockExtractionPort {
    pub fn with_table(mut self, table: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        self.data.insert(
            table.to_string(),
            TableData {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: rows
                    .iter()
                    .map(|r| r.iter().map(|v| v.to_string()).collect())
                    .collect(),
            },
        );
        self
    }

    pub fn failing_on(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }

    pub fn panicking_on(mut self, table: &str) -> Self {
        self.panicking.insert(table.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl ExtractionPort for MockExtractionPort {
    fn read_table(&self, table: &str) -> Result<TableData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(table.to_string());
        }
        if let Some(d) = self.delay {
            std::thread::sleep(d);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(table) {
            panic!("driver crashed while reading {}", table);
        }
        if self.failing.contains(table) {
            return Err(ExportError::ConnectionError(format!(
                "connection dropped while reading {}",
                table
            )));
        }
        self.data
            .get(table)
            .cloned()
            .ok_or_else(|| ExportError::ExtractionError {
                table: table.to_string(),
                reason: "table or view does not exist".to_string(),
            })
    }
}

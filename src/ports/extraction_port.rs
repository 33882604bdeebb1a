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


//! # Extraction Port
//!
//! This Port defines the contract for the "Data Reader".
//!
//! Anything that implements `ExtractionPort` must be able to read the full
//! contents of one table into memory. Writing those rows to disk is the job
//! of the `TableExporter`.

use crate::domain::entities::TableData;
use crate::domain::errors::Result;

/// `ExtractionPort` is shared by every worker thread of a batch.
pub trait ExtractionPort: Send + Sync {
    /// Reads every row of `table` with no filter and no pagination.
    ///
    /// Implementations open their own connection per call so that concurrent
    /// workers never share one.
    fn read_table(&self, table: &str) -> Result<TableData>;
}

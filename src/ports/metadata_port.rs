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


//! # Metadata Port
//!
//! This Port defines what it means to "list tables" in a database. It doesn't
//! care whether the catalog lives in Oracle or in a Mock used by tests; any
//! struct implementing `MetadataPort` can feed the driver.

use crate::domain::errors::Result;

/// Catalog access used once per run, before any export starts.
///
/// `Send + Sync` because the driver holds it behind an `Arc`.
pub trait MetadataPort: Send + Sync {
    /// Returns the names of all base tables (views excluded).
    fn list_base_tables(&self) -> Result<Vec<String>>;
}

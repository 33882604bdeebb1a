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


//! # Runtime Context
//!
//! Sizes the export worker pool. Exports are I/O bound, so the pool defaults
//! to one worker per CPU core; `parallel` or `cpu_percent` narrow it.

use crate::config::AppConfig;
use log::info;

const DEFAULT_CPU_PERCENT: u8 = 100;

/// `RuntimeContext` holds settings that exist for the entire life of a run.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeContext {
    /// The number of tables we can export at once.
    pub num_workers: usize,
}

impl RuntimeContext {
    pub fn init(config: &AppConfig) -> Self {
        let num_workers = Self::worker_count(
            config.export.parallel,
            config.export.cpu_percent,
            num_cpus::get(),
        );
        info!(
            "Initializing worker pool with up to {} threads ({} CPUs available)",
            num_workers,
            num_cpus::get()
        );
        Self { num_workers }
    }

    /// `parallel` if set, else `ceil(cpus * cpu_percent / 100)`. Never below 1.
    fn worker_count(parallel: Option<usize>, cpu_percent: Option<u8>, total_cpus: usize) -> usize {
        let cpu_percent = cpu_percent.unwrap_or(DEFAULT_CPU_PERCENT);
        let num_workers = parallel.unwrap_or_else(|| {
            (total_cpus as f64 * (cpu_percent as f64 / 100.0)).ceil() as usize
        });
        std::cmp::max(1, num_workers)
    }
}

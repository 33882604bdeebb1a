//! Application layer: the export workflow, independent of any database driver.

pub mod driver;
pub mod orchestrator;
pub mod output_validator;
pub mod report;
pub mod runtime;
pub mod table_exporter;

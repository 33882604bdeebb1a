//! Command-line entry point: wires the Oracle adapters into the export driver.

use db_csv_exporter::application::driver::ProcessDriver;
use db_csv_exporter::application::runtime::RuntimeContext;
use db_csv_exporter::config::{AppConfig, CliArgs};
use db_csv_exporter::infrastructure::oracle::connector::OracleConnector;
use db_csv_exporter::infrastructure::oracle::oracle_extraction_adapter::OracleExtractionAdapter;
use db_csv_exporter::infrastructure::oracle::oracle_metadata_adapter::OracleMetadataAdapter;
use clap::Parser;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_PREFETCH_ROWS: u32 = 5000;

fn main() {
    // 1. Initialize Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Parse Arguments and load config
    let args = CliArgs::parse();
    let config = match AppConfig::load(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    // 3. Size the worker pool
    let runtime = RuntimeContext::init(&config);

    // 4. Initialize adapters
    let db = &config.database;
    let connector = OracleConnector::new(
        &db.resolve_username(),
        &db.resolve_password(),
        &db.get_connection_string(),
    )
    .with_call_timeout(config.export.query_timeout_secs.map(Duration::from_secs));

    let metadata_port = Arc::new(OracleMetadataAdapter::new(
        connector.clone(),
        db.schema.clone(),
    ));
    let extraction_port = Arc::new(OracleExtractionAdapter::new(
        connector,
        db.schema.clone(),
        config.export.prefetch_rows.unwrap_or(DEFAULT_PREFETCH_ROWS),
    ));

    // 5. Run
    info!("Starting export of {}", db.database);
    let driver = ProcessDriver::new(
        config,
        metadata_port,
        extraction_port,
        runtime.num_workers,
    );
    let outcome = driver.run();
    info!("Run finished: {:?}", outcome);
}

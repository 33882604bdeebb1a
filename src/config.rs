//! Run configuration: file (YAML or JSON) plus CLI overrides.
//!
//! A loaded `AppConfig` has always passed `validate`, so downstream code never
//! re-checks that the server and database are filled in.

use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Environment variable consulted when no password is configured.
pub const PASSWORD_ENV_VAR: &str = "DB_PASSWORD";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Host, optionally with port (`dbhost:1521`).
    pub server: String,
    /// Database (service) name. Also names the output folder.
    pub database: String,
    /// Catalog owner whose tables are listed. Defaults to the connecting user.
    pub schema: Option<String>,
    /// Empty means OS-authenticated (external) login.
    pub username: Option<String>,
    pub password: Option<String>,
    /// Full connect descriptor, overriding `//server/database`.
    pub connection_string: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory in which `db_<database>` is created.
    pub output_root: String,
    /// Maximum concurrent export workers.
    pub parallel: Option<usize>,
    /// Share of CPU cores to size the pool by when `parallel` is unset.
    pub cpu_percent: Option<u8>,
    pub prefetch_rows: Option<u32>,
    /// Per round-trip database call timeout. Unset means wait forever.
    pub query_timeout_secs: Option<u64>,
    /// Write a JSON run summary next to the export folder.
    pub write_report: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_root: ".".to_string(),
            parallel: None,
            cpu_percent: None,
            prefetch_rows: None,
            query_timeout_secs: None,
            write_report: false,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Database server address, e.g. dbhost:1521
    #[arg(long)]
    pub server: Option<String>,
    /// Database (service) name
    #[arg(long)]
    pub database: Option<String>,
    /// Schema whose base tables are exported
    #[arg(long)]
    pub schema: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,

    /// Directory in which the db_<database> folder is created
    #[arg(short, long)]
    pub output: Option<String>,
    /// Maximum number of tables exported concurrently
    #[arg(long)]
    pub parallel: Option<usize>,
    #[arg(long)]
    pub cpu_percent: Option<u8>,
    /// Abort any single database call that runs longer than this
    #[arg(long)]
    pub query_timeout_secs: Option<u64>,
    /// Write a JSON run report
    #[arg(long)]
    pub report: bool,
}

impl DatabaseConfig {
    /// Returns the connect string, `//server/database` unless overridden.
    pub fn get_connection_string(&self) -> String {
        match &self.connection_string {
            Some(c) if !c.is_empty() => c.clone(),
            _ => format!("//{}/{}", self.server, self.database),
        }
    }

    pub fn resolve_username(&self) -> String {
        self.username.clone().unwrap_or_default()
    }

    /// Config value first, then `DB_PASSWORD`, then empty.
    pub fn resolve_password(&self) -> String {
        self.password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV_VAR).ok())
            .unwrap_or_default()
    }
}

impl AppConfig {
    /// Builds the configuration from a file and/or CLI flags and validates it.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default_from_cli(args),
        };
        config.merge_cli(args);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ExportError::ConfigError(format!("cannot open config file {}: {}", path, e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents).map_err(|e| ExportError::ConfigError(e.to_string()))?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ExportError::ConfigError(e.to_string()))?
        };

        Ok(config)
    }

    fn default_from_cli(args: &CliArgs) -> Self {
        Self {
            database: DatabaseConfig {
                server: args.server.clone().unwrap_or_default(),
                database: args.database.clone().unwrap_or_default(),
                schema: args.schema.clone(),
                username: args.username.clone(),
                password: args.password.clone(),
                connection_string: None,
            },
            export: ExportConfig::default(),
        }
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(s) = &args.server { self.database.server = s.clone(); }
        if let Some(d) = &args.database { self.database.database = d.clone(); }
        if let Some(s) = &args.schema { self.database.schema = Some(s.clone()); }
        if let Some(u) = &args.username { self.database.username = Some(u.clone()); }
        if let Some(p) = &args.password { self.database.password = Some(p.clone()); }
        if let Some(o) = &args.output { self.export.output_root = o.clone(); }
        if let Some(p) = args.parallel { self.export.parallel = Some(p); }
        if let Some(c) = args.cpu_percent { self.export.cpu_percent = Some(c); }
        if let Some(t) = args.query_timeout_secs { self.export.query_timeout_secs = Some(t); }
        if args.report { self.export.write_report = true; }
    }

    /// Oracle folds unquoted names to upper case; the catalog lookup binds the
    /// schema as a value and the export quotes it, so both need that form.
    pub fn normalize(&mut self) {
        self.database.schema = self
            .database
            .schema
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase);
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.server.trim().is_empty() || self.database.database.trim().is_empty() {
            return Err(ExportError::ConfigError(
                "Please specify database name and server!".to_string(),
            ));
        }
        if self.export.parallel == Some(0) {
            return Err(ExportError::ConfigError(
                "parallel must be at least 1".to_string(),
            ));
        }
        if let Some(p) = self.export.cpu_percent {
            if p == 0 || p > 100 {
                return Err(ExportError::ConfigError(format!(
                    "cpu_percent must be between 1 and 100, got {}",
                    p
                )));
            }
        }
        Ok(())
    }

    /// `db_<database>`
    pub fn folder_name(&self) -> String {
        format!("db_{}", self.database.database)
    }

    pub fn output_folder(&self) -> PathBuf {
        PathBuf::from(&self.export.output_root).join(self.folder_name())
    }
}

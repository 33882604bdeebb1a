//! # Database Table CSV Exporter
//!
//! Connects to a database, lists its base tables and exports each one to
//! `db_<database>/<table>.csv`, several tables at a time.
//!
//! The code follows a Ports and Adapters layout: the export workflow in
//! `application` only sees the traits in `ports`; `infrastructure` supplies
//! the Oracle implementations.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;

#[cfg(test)]
mod test_utils;

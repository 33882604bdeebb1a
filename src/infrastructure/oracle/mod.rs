//! Oracle-backed adapters for the metadata and extraction ports.

pub mod connector;
pub mod oracle_extraction_adapter;
pub mod oracle_metadata_adapter;
pub mod sql_utils;

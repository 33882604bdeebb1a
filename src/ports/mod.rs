//! Ports: the traits the application layer depends on.

pub mod extraction_port;
pub mod metadata_port;

//! Domain layer: entities and errors shared by every other layer.

pub mod entities;
pub mod errors;

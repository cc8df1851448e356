//! Local store models and persistence operations.

pub mod abilities;
pub mod evolutions;
pub mod models;
pub mod pokemon;
pub mod types;

//! CLI command implementations.

pub mod config;
pub mod devices;
pub mod run;
pub mod slots;
pub mod topology;

//! Infrastructure implementations.
//!
//! Contains port traits and the adapters the engine ships with.

pub mod clock;
pub mod memory;
pub mod ports;
pub mod settings;
pub mod telemetry;

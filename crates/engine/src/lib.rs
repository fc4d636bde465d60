//! Mesa Engine library.
//!
//! Wires the pure rules core in `mesa-domain` to its collaborators.
//!
//! ## Structure
//!
//! - `use_cases/` - Load, call the rules core, write back
//! - `infrastructure/` - Ports, in-memory adapters, settings, telemetry
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, Repositories, UseCases};
pub use infrastructure::settings::EngineSettings;
pub use infrastructure::telemetry::init_tracing;

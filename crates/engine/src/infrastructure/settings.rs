//! Engine settings loaded from the environment.
//!
//! | Variable                    | Default            |
//! |-----------------------------|--------------------|
//! | `MESA_RNG_SEED`             | unset (entropy)    |
//! | `MESA_PLANNER_MAX_ATTEMPTS` | 100                |
//! | `MESA_LOG_FILTER`           | `mesa_engine=info` |
//!
//! Unparseable values fall back to the default.

use std::path::Path;

use mesa_domain::DEFAULT_MAX_ATTEMPTS;

pub const DEFAULT_LOG_FILTER: &str = "mesa_engine=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Fixed seed for reproducible sessions
    pub rng_seed: Option<u64>,
    /// Rejected draws the random budget strategy tolerates
    pub planner_max_attempts: u32,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rng_seed: None,
            planner_max_attempts: DEFAULT_MAX_ATTEMPTS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineSettings {
    /// Load `.env.local` / `.env` from the working directory, then read the environment.
    pub fn load() -> Self {
        for filename in [".env.local", ".env"] {
            if Path::new(filename).exists() {
                let _ = dotenvy::from_filename(filename);
            }
        }
        Self::from_env()
    }

    /// Read the process environment only.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            rng_seed: parsed(&lookup, "MESA_RNG_SEED"),
            planner_max_attempts: parsed(&lookup, "MESA_PLANNER_MAX_ATTEMPTS")
                .unwrap_or(defaults.planner_max_attempts),
            log_filter: lookup("MESA_LOG_FILTER")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

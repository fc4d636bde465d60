//! Hit point pool with the `0 <= current <= max` invariant
//!
//! `HitPoints` is immutable: damage and healing return a new value, so an
//! out-of-range pool can never be observed.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A character's or creature's hit point pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HitPointsRecord")]
pub struct HitPoints {
    current: i32,
    max: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitPointsRecord {
    current: i32,
    max: i32,
}

impl TryFrom<HitPointsRecord> for HitPoints {
    type Error = DomainError;

    fn try_from(record: HitPointsRecord) -> Result<Self, Self::Error> {
        Self::new(record.current, record.max)
    }
}

impl HitPoints {
    /// Create a pool, rejecting values that break the invariant
    pub fn new(current: i32, max: i32) -> Result<Self, DomainError> {
        if max < 0 || current < 0 || current > max {
            return Err(DomainError::InvalidHitPoints { current, max });
        }
        Ok(Self { current, max })
    }

    /// A pool at full health
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// Build from possibly inconsistent stored data by clamping into range
    pub fn clamped(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// `current' = max(0, current - amount)`
    pub fn apply_damage(self, amount: u32) -> Self {
        let next = (self.current as i64 - amount as i64).max(0);
        Self {
            current: next as i32,
            max: self.max,
        }
    }

    /// `current' = min(max, current + amount)`
    pub fn apply_healing(self, amount: u32) -> Self {
        let next = (self.current as i64 + amount as i64).min(self.max as i64);
        Self {
            current: next as i32,
            max: self.max,
        }
    }

    pub fn is_down(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Capacity left before reaching max
    pub fn missing(&self) -> i32 {
        self.max - self.current
    }
}

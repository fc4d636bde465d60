//! Clock and random implementations.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Uniform PRNG for game dice.
///
/// Seeded from entropy in production; a fixed seed replays the same rolls.
pub struct SystemRandom {
    rng: Mutex<StdRng>,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // StdRng stays valid after a panic elsewhere, so poisoning is recovered
        let mut guard = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn next_unit(&self) -> f64 {
        self.with_rng(|rng| rng.gen::<f64>())
    }

    fn gen_uuid(&self) -> Uuid {
        let bytes: [u8; 16] = self.with_rng(|rng| rng.gen());
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Replays a fixed sequence of unit floats, cycling when exhausted.
/// Ids count up from 1.
#[cfg(test)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: Mutex<usize>,
    ids: Mutex<u128>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: Mutex::new(0),
            ids: Mutex::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        let mut cursor = self.cursor.lock().unwrap();
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value
    }

    fn gen_uuid(&self) -> Uuid {
        let mut ids = self.ids.lock().unwrap();
        *ids += 1;
        Uuid::from_u128(*ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_values_stay_in_range() {
        let random = SystemRandom::seeded(7);
        for _ in 0..1_000 {
            let value = random.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn same_seed_replays_same_sequence() {
        let a = SystemRandom::seeded(42);
        let b = SystemRandom::seeded(42);
        let left: Vec<f64> = (0..10).map(|_| a.next_unit()).collect();
        let right: Vec<f64> = (0..10).map(|_| b.next_unit()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn generated_uuids_are_v4() {
        let random = SystemRandom::seeded(1);
        assert_eq!(random.gen_uuid().get_version_num(), 4);
    }

    #[test]
    fn scripted_random_cycles() {
        let random = ScriptedRandom::new(&[0.1, 0.2]);
        assert_eq!(random.next_unit(), 0.1);
        assert_eq!(random.next_unit(), 0.2);
        assert_eq!(random.next_unit(), 0.1);
        assert_ne!(random.gen_uuid(), random.gen_uuid());
    }

    #[test]
    fn same_seed_replays_same_ids() {
        let a = SystemRandom::seeded(9);
        let b = SystemRandom::seeded(9);
        assert_eq!(a.gen_uuid(), b.gen_uuid());
    }
}

//! Clock and randomness collaborators consumed by the codec.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Wall-clock reading in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u32;
}

/// Source of the `rand` field and of random hash fragments.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);

    fn next_u16(&self) -> u16 {
        let mut buf = [0u8; 2];
        self.fill_bytes(&mut buf);
        u16::from_be_bytes(buf)
    }
}

/// The system clock. Readings outside the `u32` range saturate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u32 {
        let secs = Utc::now().timestamp();
        u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
    }
}

/// A clock stuck at one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn now_secs(&self) -> u32 {
        self.0
    }
}

/// The thread-local CSPRNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::rng().fill_bytes(dest);
    }

    fn next_u16(&self) -> u16 {
        rand::rng().random()
    }
}

/// A deterministic generator for reproducible identifiers.
#[derive(Debug)]
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(dest);
    }
}

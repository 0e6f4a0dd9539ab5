//! Seeded randomness for a session.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use forage_core::RandomSource;

/// Session generator. Every spawn and random move is drawn from it, so a
/// session replays exactly from its seed.
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

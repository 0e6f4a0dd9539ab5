//! Randomness seam for deterministic simulation.
//!
//! The engine never owns a global generator. Operations that need chance
//! (spawning food, dropping a lost item, choosing a random legal move) take a
//! `&mut impl RandomSource`, so tests can use a seeded [`PcgSource`] and the
//! runtime can plug in its own generator.

/// Source of uniformly distributed random numbers.
pub trait RandomSource {
    /// Next uniformly distributed 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((u64::from(self.next_u32()) * len as u64) >> 32) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
///
/// Small and fast with good statistical quality; used by tests and by any
/// driver that does not bring its own generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgSource {
    state: u64,
}

impl PcgSource {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut source = Self { state: 0 };
        source.state = source.state.wrapping_add(seed);
        source.step();
        source
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }
}

impl RandomSource for PcgSource {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

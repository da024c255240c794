use std::hash::{Hash, Hasher};

use rand::Rng;
use rand_xorshift::XorShiftRng;

use rand::SeedableRng;

/// Construct a random number generator seeded by a noise value.
///
/// Good for deterministic generation given a varying source of noise like a
/// world seed string or map position coordinates.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

pub trait RngExt {
    fn one_chance_in(&mut self, n: u32) -> bool;

    /// Uniform yes-or-no.
    fn coin_flip(&mut self) -> bool;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn one_chance_in(&mut self, n: u32) -> bool {
        self.gen_range(0..n) == 0
    }

    fn coin_flip(&mut self) -> bool {
        self.gen::<bool>()
    }
}

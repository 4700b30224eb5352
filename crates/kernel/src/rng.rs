use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Create an RNG seeded from the operating system.
pub fn entropy_rng() -> ChaCha12Rng {
    ChaCha12Rng::from_os_rng()
}

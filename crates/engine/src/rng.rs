//! Deterministic seeded randomness.
//!
//! Every random draw in the simulator comes from a ChaCha8 stream derived
//! from the user's seed string plus a stream label: `"workload"` for the
//! generator, the algorithm name for each engine's policy RNG. Same seed,
//! same label, same stream, so the Random policy's choices are reproducible
//! and independent of workload generation.
//!
//! The seed string is folded to a `u64` with FNV-1a rather than the standard
//! library's hasher, whose output is not guaranteed stable across releases.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Folds a seed string and a stream label into a 64-bit RNG seed.
///
/// Distinct labels over the same seed produce unrelated streams.
pub fn derive_seed(seed: &str, stream: &str) -> u64 {
    let mut state = FNV_OFFSET_BASIS;
    for byte in seed.bytes().chain([b'/']).chain(stream.bytes()) {
        state ^= u64::from(byte);
        state = state.wrapping_mul(FNV_PRIME);
    }
    state
}

/// Constructs the ChaCha8 stream for `(seed, stream)`.
pub fn seeded_rng(seed: &str, stream: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(seed, stream))
}

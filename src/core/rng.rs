//! Injectable randomness for reproducible battles
//!
//! Nothing in the crate creates its own generator. Callers pass `&mut R` where
//! `R: Rng`, and seed a `BattleRng` when they want a replayable outcome.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic generator used by the runner and the tests
pub type BattleRng = ChaCha8Rng;

/// Seeded generator: the same seed replays the same battle
pub fn seeded(seed: u64) -> BattleRng {
    ChaCha8Rng::seed_from_u64(seed)
}

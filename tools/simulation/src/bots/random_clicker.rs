//! Random clicker
//!
//! Clicks a uniformly chosen face-down card with deterministic seeded RNG.
//! Has no memory, so it approximates a distracted human.

use super::{hidden_indices, Player};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::coin::Coin;

pub struct RandomClicker {
    seed: u64,
    pub clicks: usize,
    rng: ChaCha8Rng,
}

impl RandomClicker {
    /// Create a new random clicker with a deterministic seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            clicks: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Player for RandomClicker {
    fn name(&self) -> &'static str {
        "random_clicker"
    }

    fn reset(&mut self) {
        self.clicks = 0;
    }

    fn choose(&mut self, board: &[Coin]) -> Option<usize> {
        let pick = hidden_indices(board).choose(&mut self.rng).copied();
        if pick.is_some() {
            self.clicks += 1;
        }
        pick
    }
}

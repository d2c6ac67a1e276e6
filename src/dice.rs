use rand::{Rng, SeedableRng, rngs::StdRng};

/// anything that can produce die faces. the game only ever talks to this
/// trait so tests can load the dice.
pub trait Roll {
    fn roll(&mut self) -> u8;
}

/// a fair six-sided die backed by its own random generator
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// same seed, same sequence of rolls
    #[allow(dead_code)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Roll for Dice {
    fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

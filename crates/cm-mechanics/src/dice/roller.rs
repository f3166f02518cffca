//! The randomness primitive.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A uniform die roller producing integers in `[1, sides]`.
pub trait DieRoller {
    /// Roll one die with the given number of sides.
    fn roll(&mut self, sides: u32) -> u32;
}

impl DieRoller for StdRng {
    fn roll(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

/// A roller that replays a fixed sequence of values.
///
/// Each value is clamped into the requested die's range. Once the script is
/// used up the roller answers with the die's average, so a short script
/// degrades to predictable rolls instead of panicking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    values: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a roller that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DieRoller for ScriptedRoller {
    fn roll(&mut self, sides: u32) -> u32 {
        let sides = sides.max(1);
        match self.values.pop_front() {
            Some(v) => v.clamp(1, sides),
            None => sides / 2 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let v = rng.roll(6);
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn std_rng_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(a.roll(20), b.roll(20));
        }
    }

    #[test]
    fn scripted_replays_then_averages() {
        let mut r = ScriptedRoller::new([5, 30]);
        assert_eq!(r.remaining(), 2);
        assert_eq!(r.roll(20), 5);
        assert_eq!(r.roll(20), 20);
        assert_eq!(r.roll(8), 5);
        assert_eq!(r.remaining(), 0);
    }
}

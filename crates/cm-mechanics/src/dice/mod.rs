//! Dice types, expressions, and rolling.
//!
//! Every random draw in the engine goes through a [`DieRoller`], which
//! produces a uniform integer in `[1, sides]`. Production code rolls with a
//! seeded `StdRng`; tests and externally animated rolls use a
//! [`ScriptedRoller`].

pub mod roll;
pub mod roller;

pub use roll::RollResult;
pub use roller::{DieRoller, ScriptedRoller};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// The rounded-up average of one roll (`sides / 2 + 1`).
    pub fn average(self) -> u32 {
        self.sides() / 2 + 1
    }

    /// Look up a die by its number of sides.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            _ => None,
        }
    }

    /// Roll this die once. Out-of-range answers from the roller are clamped.
    pub fn roll(self, roller: &mut dyn DieRoller) -> u32 {
        self.clamp_face(roller.roll(self.sides()))
    }

    /// Clamp an externally supplied value into this die's range.
    pub fn clamp_face(self, value: u32) -> u32 {
        value.clamp(1, self.sides())
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A number of identical dice, e.g. `3d4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// How many dice to roll.
    pub count: u32,
    /// Which die.
    pub die: Die,
}

impl DiceExpr {
    /// Create a dice expression.
    pub const fn new(count: u32, die: Die) -> Self {
        Self { count, die }
    }

    /// Roll every die in the expression.
    pub fn roll(&self, roller: &mut dyn DieRoller) -> RollResult {
        let faces = (0..self.count).map(|_| self.die.roll(roller)).collect();
        RollResult { expr: *self, faces }
    }

    /// Roll and add a modifier, never going below 1.
    pub fn roll_damage(&self, modifier: i32, roller: &mut dyn DieRoller) -> u32 {
        let total = self.roll(roller).total() as i32 + modifier;
        total.max(1) as u32
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides_and_average() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D20.sides(), 20);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::D6.average(), 4);
        assert_eq!(Die::D8.average(), 5);
        assert_eq!(Die::D12.average(), 7);
    }

    #[test]
    fn die_from_sides() {
        assert_eq!(Die::from_sides(10), Some(Die::D10));
        assert_eq!(Die::from_sides(7), None);
    }

    #[test]
    fn clamp_face_bounds() {
        assert_eq!(Die::D8.clamp_face(0), 1);
        assert_eq!(Die::D8.clamp_face(9), 8);
        assert_eq!(Die::D8.clamp_face(5), 5);
    }

    struct Fixed(u32);

    impl DieRoller for Fixed {
        fn roll(&mut self, _sides: u32) -> u32 {
            self.0
        }
    }

    #[test]
    fn rolls_stay_on_the_die() {
        assert_eq!(Die::D8.roll(&mut Fixed(0)), 1);
        assert_eq!(Die::D8.roll(&mut Fixed(40)), 8);
        assert_eq!(DiceExpr::new(2, Die::D6).roll(&mut Fixed(0)).total(), 2);
    }

    #[test]
    fn expression_display() {
        assert_eq!(DiceExpr::new(3, Die::D4).to_string(), "3d4");
        assert_eq!(Die::D20.to_string(), "d20");
    }

    #[test]
    fn damage_floors_at_one() {
        let mut roller = ScriptedRoller::new([1]);
        assert_eq!(DiceExpr::new(1, Die::D6).roll_damage(-3, &mut roller), 1);
    }

    #[test]
    fn damage_sums_dice_and_modifier() {
        let mut roller = ScriptedRoller::new([2, 3, 4]);
        assert_eq!(DiceExpr::new(3, Die::D4).roll_damage(2, &mut roller), 11);
    }
}

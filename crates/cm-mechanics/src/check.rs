//! d20 checks against a difficulty class.

use serde::{Deserialize, Serialize};

use crate::dice::{Die, DieRoller};
use crate::stats::{StatKey, format_modifier};

/// How a check came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// Natural 1: fails regardless of the total.
    CriticalFailure,
    /// Total below the DC.
    Failure,
    /// Total met or beat the DC.
    Success,
}

/// A resolved d20 check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoll {
    /// The die face, 1-20.
    pub natural: u32,
    /// Modifier added to the die.
    pub modifier: i32,
    /// `natural + modifier`.
    pub total: i32,
    /// Difficulty class.
    pub dc: i32,
    /// The result.
    pub outcome: CheckOutcome,
}

impl CheckRoll {
    /// Resolve a check from a known die face. The face is clamped to 1-20.
    pub fn resolve(natural: u32, modifier: i32, dc: i32) -> Self {
        let natural = Die::D20.clamp_face(natural);
        let total = natural as i32 + modifier;
        let outcome = if natural == 1 {
            CheckOutcome::CriticalFailure
        } else if total >= dc {
            CheckOutcome::Success
        } else {
            CheckOutcome::Failure
        };
        Self {
            natural,
            modifier,
            total,
            dc,
            outcome,
        }
    }

    /// Roll a d20 and resolve.
    pub fn roll(roller: &mut dyn DieRoller, modifier: i32, dc: i32) -> Self {
        Self::resolve(Die::D20.roll(roller), modifier, dc)
    }

    /// Whether the check succeeded.
    pub fn success(&self) -> bool {
        self.outcome == CheckOutcome::Success
    }

    /// Human-readable breakdown, e.g. `d20 11 + DEX +2 = 13 vs DC 13`.
    pub fn breakdown(&self, stat: StatKey) -> String {
        format!(
            "d20 {} + {} {} = {} vs DC {}",
            self.natural,
            stat,
            format_modifier(self.modifier),
            self.total,
            self.dc
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    #[test]
    fn meets_dc_succeeds() {
        let c = CheckRoll::resolve(11, 2, 13);
        assert!(c.success());
        assert_eq!(c.total, 13);
    }

    #[test]
    fn below_dc_fails() {
        let c = CheckRoll::resolve(10, 2, 13);
        assert_eq!(c.outcome, CheckOutcome::Failure);
    }

    #[test]
    fn natural_one_always_fails() {
        let c = CheckRoll::resolve(1, 30, 5);
        assert_eq!(c.outcome, CheckOutcome::CriticalFailure);
        assert!(!c.success());
    }

    #[test]
    fn supplied_face_is_clamped() {
        assert_eq!(CheckRoll::resolve(0, 0, 10).natural, 1);
        assert_eq!(CheckRoll::resolve(25, 0, 10).natural, 20);
    }

    #[test]
    fn breakdown_format() {
        let c = CheckRoll::resolve(11, 2, 13);
        assert_eq!(c.breakdown(StatKey::Dex), "d20 11 + DEX +2 = 13 vs DC 13");
        let c = CheckRoll::resolve(7, -1, 12);
        assert_eq!(c.breakdown(StatKey::Str), "d20 7 + STR -1 = 6 vs DC 12");
    }

    #[test]
    fn roll_draws_a_d20() {
        let mut r = ScriptedRoller::new([17]);
        let c = CheckRoll::roll(&mut r, 0, 15);
        assert_eq!(c.natural, 17);
        assert!(c.success());
    }
}

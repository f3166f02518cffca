//! Ability scores and stat generation.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, Die, DieRoller};
use crate::error::{MechError, MechResult};
use crate::sheet::ClassName;

/// Lowest score stat generation may produce.
pub const MIN_SCORE: i32 = 3;
/// Highest score stat generation may produce.
pub const MAX_SCORE: i32 = 18;

/// One of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatKey {
    /// Strength.
    Str,
    /// Dexterity.
    Dex,
    /// Constitution.
    Con,
    /// Intelligence.
    Int,
    /// Wisdom.
    Wis,
    /// Charisma.
    Cha,
}

impl StatKey {
    /// All six stats in sheet order.
    pub const ALL: [StatKey; 6] = [
        StatKey::Str,
        StatKey::Dex,
        StatKey::Con,
        StatKey::Int,
        StatKey::Wis,
        StatKey::Cha,
    ];

    /// The three-letter abbreviation.
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Dex => "DEX",
            Self::Con => "CON",
            Self::Int => "INT",
            Self::Wis => "WIS",
            Self::Cha => "CHA",
        }
    }

    /// Parse a stat abbreviation, case-insensitively.
    pub fn parse(s: &str) -> MechResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.abbrev().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MechError::UnknownStat(s.to_string()))
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Render a modifier with an explicit sign, e.g. `+2` or `-1`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

/// The six ability scores of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Stats {
    /// Strength.
    pub str: i32,
    /// Dexterity.
    pub dex: i32,
    /// Constitution.
    pub con: i32,
    /// Intelligence.
    pub int: i32,
    /// Wisdom.
    pub wis: i32,
    /// Charisma.
    pub cha: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl Stats {
    /// Every score set to the same value.
    pub fn uniform(score: i32) -> Self {
        Self {
            str: score,
            dex: score,
            con: score,
            int: score,
            wis: score,
            cha: score,
        }
    }

    /// Read one score.
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Str => self.str,
            StatKey::Dex => self.dex,
            StatKey::Con => self.con,
            StatKey::Int => self.int,
            StatKey::Wis => self.wis,
            StatKey::Cha => self.cha,
        }
    }

    /// Overwrite one score.
    pub fn set(&mut self, key: StatKey, score: i32) {
        let slot = match key {
            StatKey::Str => &mut self.str,
            StatKey::Dex => &mut self.dex,
            StatKey::Con => &mut self.con,
            StatKey::Int => &mut self.int,
            StatKey::Wis => &mut self.wis,
            StatKey::Cha => &mut self.cha,
        };
        *slot = score;
    }

    /// Builder-style [`Stats::set`].
    pub fn with(mut self, key: StatKey, score: i32) -> Self {
        self.set(key, score);
        self
    }

    /// The modifier for one score.
    pub fn modifier(&self, key: StatKey) -> i32 {
        ability_modifier(self.get(key))
    }

    /// Clamp every score into `[MIN_SCORE, MAX_SCORE]`.
    pub fn clamped(mut self) -> Self {
        for key in StatKey::ALL {
            self.set(key, self.get(key).clamp(MIN_SCORE, MAX_SCORE));
        }
        self
    }
}

/// How rolled scores are assigned to stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGenMode {
    /// Best rolls go to the class's priority stats.
    #[default]
    Weighted,
    /// Rolls are shuffled across stats.
    Chaos,
}

impl StatGenMode {
    /// Parse `weighted` or `chaos`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Some(Self::Weighted),
            "chaos" => Some(Self::Chaos),
            _ => None,
        }
    }
}

/// Roll 4d6 and drop the lowest die.
pub fn roll_4d6_drop_lowest(roller: &mut dyn DieRoller) -> i32 {
    DiceExpr::new(4, Die::D6).roll(roller).total_drop_lowest() as i32
}

/// Generate six scores for a class.
///
/// Six 4d6-drop-lowest rolls are sorted high to low. Weighted mode hands
/// them out in the class's priority order; chaos mode shuffles them with a
/// Fisher-Yates pass driven by the roller.
pub fn generate_stats(class: ClassName, mode: StatGenMode, roller: &mut dyn DieRoller) -> Stats {
    let mut rolls: Vec<i32> = (0..6).map(|_| roll_4d6_drop_lowest(roller)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));

    let order: Vec<StatKey> = match mode {
        StatGenMode::Weighted => class.stat_priority().to_vec(),
        StatGenMode::Chaos => {
            let mut keys = StatKey::ALL.to_vec();
            for i in (1..keys.len()).rev() {
                let sides = i as u32 + 1;
                let j = (roller.roll(sides).clamp(1, sides) - 1) as usize;
                keys.swap(i, j);
            }
            keys
        }
    };

    let mut stats = Stats::default();
    for (key, score) in order.into_iter().zip(rolls) {
        stats.set(key, score);
    }
    stats.clamped()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn modifier_floors_toward_negative() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(3), -4);
        assert_eq!(ability_modifier(18), 4);
    }

    #[test]
    fn format_modifier_signs() {
        assert_eq!(format_modifier(2), "+2");
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(-1), "-1");
    }

    #[test]
    fn parse_stat_keys() {
        assert_eq!(StatKey::parse("dex").unwrap(), StatKey::Dex);
        assert_eq!(StatKey::parse(" CHA ").unwrap(), StatKey::Cha);
        assert!(StatKey::parse("luck").is_err());
    }

    #[test]
    fn stat_key_serializes_uppercase() {
        let json = serde_json::to_string(&StatKey::Wis).unwrap();
        assert_eq!(json, "\"WIS\"");
    }

    #[test]
    fn drop_lowest_roll() {
        let mut roller = ScriptedRoller::new([6, 1, 5, 4]);
        assert_eq!(roll_4d6_drop_lowest(&mut roller), 15);
    }

    #[test]
    fn weighted_follows_class_priority() {
        // Six sets of four dice: totals 18, 17, 16, 15, 14, 13 after drop.
        let script = [
            6, 6, 6, 1, 6, 6, 5, 1, 6, 5, 5, 1, 5, 5, 5, 1, 5, 5, 4, 1, 5, 4, 4, 1,
        ];
        let mut roller = ScriptedRoller::new(script);
        let stats = generate_stats(ClassName::Rogue, StatGenMode::Weighted, &mut roller);
        assert_eq!(stats.dex, 18);
        assert_eq!(stats.int, 17);
        assert_eq!(stats.cha, 16);
        assert_eq!(stats.con, 15);
        assert_eq!(stats.wis, 14);
        assert_eq!(stats.str, 13);
    }

    #[test]
    fn generated_scores_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for class in ClassName::ALL {
            for mode in [StatGenMode::Weighted, StatGenMode::Chaos] {
                let stats = generate_stats(*class, mode, &mut rng);
                for key in StatKey::ALL {
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&stats.get(key)));
                }
            }
        }
    }

    struct Fixed(u32);

    impl DieRoller for Fixed {
        fn roll(&mut self, _sides: u32) -> u32 {
            self.0
        }
    }

    #[test]
    fn chaos_survives_out_of_range_rollers() {
        let low = generate_stats(ClassName::Wizard, StatGenMode::Chaos, &mut Fixed(0));
        let high = generate_stats(ClassName::Wizard, StatGenMode::Chaos, &mut Fixed(u32::MAX));
        for key in StatKey::ALL {
            assert_eq!(low.get(key), MIN_SCORE);
            assert_eq!(high.get(key), MAX_SCORE);
        }
    }

    #[test]
    fn chaos_keeps_the_same_multiset() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let weighted = generate_stats(ClassName::Fighter, StatGenMode::Weighted, &mut a);
        let chaos = generate_stats(ClassName::Fighter, StatGenMode::Chaos, &mut b);
        let mut w: Vec<i32> = StatKey::ALL.iter().map(|k| weighted.get(*k)).collect();
        let mut c: Vec<i32> = StatKey::ALL.iter().map(|k| chaos.get(*k)).collect();
        w.sort_unstable();
        c.sort_unstable();
        assert_eq!(w, c);
    }
}

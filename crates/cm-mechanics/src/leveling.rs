//! The experience curve and level-dependent resources.

use tracing::{info, warn};

use crate::sheet::{Character, ClassName};
use crate::stats::StatKey;

/// Highest attainable level.
pub const MAX_LEVEL: u32 = 20;

/// Total xp required for each level, index 0 = level 1.
pub const XP_THRESHOLDS: [u32; MAX_LEVEL as usize] = [
    0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000, 85000, 100000, 120000, 140000,
    165000, 195000, 225000, 265000, 305000, 355000,
];

/// The largest level whose threshold is at or below `xp`.
pub fn level_for_xp(xp: u32) -> u32 {
    XP_THRESHOLDS.iter().take_while(|t| **t <= xp).count() as u32
}

/// Xp needed to reach `level`, or `None` past the cap.
pub fn xp_for_level(level: u32) -> Option<u32> {
    let idx = level.checked_sub(1)? as usize;
    XP_THRESHOLDS.get(idx).copied()
}

/// Spell slots a class has at a level.
pub fn spell_slot_capacity(class: ClassName, level: u32) -> u32 {
    if !class.is_caster() {
        return 0;
    }
    match level {
        0 | 1 => 2,
        2 => 3,
        3 => 4,
        l => (4 + (l - 3) / 2).min(9),
    }
}

fn milestone(class: ClassName, level: u32) -> Option<&'static str> {
    match (class, level) {
        (ClassName::Rogue, 3) => Some("You've learned to find exits in rooms that have none."),
        (ClassName::Wizard, 3) => Some("Your spellbook now has footnotes. Ominous ones."),
        (ClassName::Barbarian, 3) => Some("Your rage has acquired a personality."),
        (ClassName::Fighter, 3) => Some("You've picked a fighting style: 'yes'."),
        (ClassName::Paladin, 3) => Some("Your oath now comes with fine print."),
        (ClassName::Druid, 3) => Some("A squirrel has started taking your orders. Mostly."),
        (_, 5) => Some("Milestone: you now hit twice as hard in your own stories."),
        (_, 10) => Some("Milestone: bards have started getting your name wrong on purpose."),
        (_, 20) => Some("Milestone: there is nothing left to learn. Except humility."),
        _ => None,
    }
}

/// Reconcile level and level-dependent resources with the character's xp.
///
/// Levels are gained one at a time: each grants `max(1, avg(hit die) + CON)`
/// max hp and heals the same amount, and resizes spell slot capacity.
/// Running it twice in a row changes nothing the second time.
pub fn apply_leveling(character: &Character) -> (Character, Vec<String>) {
    let mut next = character.clone();
    let mut logs = Vec::new();
    let target = level_for_xp(next.xp());
    let class = next.class();

    if target < next.level() {
        warn!(
            level = next.level(),
            target, "level above xp curve, lowering to match"
        );
        next.set_level(target);
    }

    while next.level() < target {
        let level = next.level() + 1;
        let gain = (next.hit_die.average() as i32 + next.modifier(StatKey::Con)).max(1) as u32;
        next.hp.resize(next.hp.max() + gain);
        next.spell_slots.resize(spell_slot_capacity(class, level));
        next.set_level(level);
        info!(level, hp_gain = gain, "level up");
        logs.push(format!("Level up! You are now level {level}."));
        if let Some(note) = milestone(class, level) {
            logs.push(note.to_string());
        }
    }

    let capacity = spell_slot_capacity(class, next.level());
    if next.spell_slots.max() != capacity {
        next.spell_slots.resize(capacity);
    }

    (next, logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{ArcId, CampaignState};
    use crate::sheet::{Alignment, Identity, Race, Sex};
    use crate::stats::Stats;

    fn character(class: ClassName, con: i32) -> Character {
        Character::new(
            Identity {
                name: "Vera of Regret".into(),
                sex: Sex::Female,
                race: Race::Elf,
                class,
                alignment: Alignment::Good,
            },
            Stats::default().with(StatKey::Con, con),
            CampaignState::new(ArcId::Treasure),
        )
    }

    #[test]
    fn level_curve() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(299), 1);
        assert_eq!(level_for_xp(300), 2);
        assert_eq!(level_for_xp(2700), 4);
        assert_eq!(level_for_xp(u32::MAX), 20);
        assert_eq!(xp_for_level(4), Some(2700));
        assert_eq!(xp_for_level(21), None);
        assert_eq!(xp_for_level(0), None);
    }

    #[test]
    fn slot_capacity() {
        assert_eq!(spell_slot_capacity(ClassName::Wizard, 1), 2);
        assert_eq!(spell_slot_capacity(ClassName::Wizard, 2), 3);
        assert_eq!(spell_slot_capacity(ClassName::Druid, 3), 4);
        assert_eq!(spell_slot_capacity(ClassName::Druid, 5), 5);
        assert_eq!(spell_slot_capacity(ClassName::Wizard, 20), 9);
        assert_eq!(spell_slot_capacity(ClassName::Paladin, 20), 0);
    }

    #[test]
    fn multi_level_jump_logs_each_level() {
        let mut c = character(ClassName::Fighter, 14);
        c.add_xp(2700);
        let (next, logs) = apply_leveling(&c);
        assert_eq!(next.level(), 4);
        let ups: Vec<&String> = logs.iter().filter(|l| l.starts_with("Level up!")).collect();
        assert_eq!(ups.len(), 3);
        assert_eq!(ups[0], "Level up! You are now level 2.");
        assert_eq!(ups[2], "Level up! You are now level 4.");
        // d10 average 6 + CON 2 = 8 per level.
        assert_eq!(next.hp.max(), 12 + 24);
        assert!(next.hp.is_full());
    }

    #[test]
    fn level_up_heals_by_the_gain_only() {
        let mut c = character(ClassName::Wizard, 10);
        c.hp.adjust(-5);
        c.add_xp(300);
        let (next, _) = apply_leveling(&c);
        // d6 average 4 + CON 0.
        assert_eq!(next.hp.max(), 14);
        assert_eq!(next.hp.current(), 9);
        assert_eq!(next.spell_slots.max(), 3);
        assert_eq!(next.spell_slots.current(), 3);
    }

    #[test]
    fn minimum_gain_is_one() {
        let mut c = character(ClassName::Wizard, 3);
        let before = c.hp.max();
        c.add_xp(300);
        let (next, _) = apply_leveling(&c);
        assert_eq!(next.hp.max(), before + 1);
    }

    #[test]
    fn idempotent() {
        let mut c = character(ClassName::Druid, 12);
        c.add_xp(7000);
        let (once, logs) = apply_leveling(&c);
        assert!(!logs.is_empty());
        let (twice, logs) = apply_leveling(&once);
        assert!(logs.is_empty());
        assert_eq!(once, twice);
    }

    #[test]
    fn no_xp_no_change() {
        let c = character(ClassName::Rogue, 10);
        let (next, logs) = apply_leveling(&c);
        assert!(logs.is_empty());
        assert_eq!(next, c);
    }
}

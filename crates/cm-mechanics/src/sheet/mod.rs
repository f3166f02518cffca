//! The character record.
//!
//! A [`Character`] holds identity, resources, progression, recovery pools,
//! ability scores, story state, and a slot for a combat handed over by the
//! check resolver. Resource pools are [`Track`]s, so their bounds hold by
//! construction.

pub mod track;

pub use track::Track;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::campaign::CampaignState;
use crate::combat::CombatState;
use crate::dice::Die;
use crate::error::{MechError, MechResult};
use crate::leveling::{MAX_LEVEL, level_for_xp, spell_slot_capacity};
use crate::stats::{StatKey, Stats};

/// Starting gold for a new character.
pub const STARTING_GOLD: u32 = 12;
/// Hit dice available to a new character.
pub const STARTING_HIT_DICE: u32 = 6;

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Parse a label, ignoring case and `-`/`_`/space differences.
            pub fn parse(s: &str) -> MechResult<Self> {
                let wanted = normalize_label(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize_label(v.label()) == wanted)
                    .ok_or_else(|| MechError::$err(s.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

named_enum! {
    /// Character sex, used for name tables and the background blurb.
    Sex, UnknownSex {
        /// Male.
        Male => "Male",
        /// Female.
        Female => "Female",
    }
}

named_enum! {
    /// Character race.
    Race, UnknownRace {
        /// Human.
        Human => "Human",
        /// Elf.
        Elf => "Elf",
        /// Dwarf.
        Dwarf => "Dwarf",
        /// Halfling.
        Halfling => "Halfling",
        /// Half-elf.
        HalfElf => "Half-Elf",
        /// Half-orc.
        HalfOrc => "Half-Orc",
        /// Gnome.
        Gnome => "Gnome",
        /// Tiefling.
        Tiefling => "Tiefling",
    }
}

named_enum! {
    /// Character class.
    ClassName, UnknownClass {
        /// Rogue.
        Rogue => "Rogue",
        /// Wizard.
        Wizard => "Wizard",
        /// Barbarian.
        Barbarian => "Barbarian",
        /// Fighter.
        Fighter => "Fighter",
        /// Paladin.
        Paladin => "Paladin",
        /// Druid.
        Druid => "Druid",
    }
}

named_enum! {
    /// Moral alignment.
    Alignment, UnknownAlignment {
        /// Good.
        Good => "Good",
        /// Neutral.
        Neutral => "Neutral",
        /// Evil.
        Evil => "Evil",
    }
}

impl ClassName {
    /// Hit die size for this class.
    pub fn hit_die(self) -> Die {
        match self {
            Self::Wizard => Die::D6,
            Self::Rogue | Self::Druid => Die::D8,
            Self::Fighter | Self::Paladin => Die::D10,
            Self::Barbarian => Die::D12,
        }
    }

    /// Order in which weighted stat generation hands out the best rolls.
    pub fn stat_priority(self) -> [StatKey; 6] {
        use StatKey::*;
        match self {
            Self::Rogue => [Dex, Int, Cha, Con, Wis, Str],
            Self::Wizard => [Int, Wis, Con, Dex, Cha, Str],
            Self::Barbarian | Self::Fighter => [Str, Con, Dex, Wis, Cha, Int],
            Self::Paladin => [Cha, Str, Con, Wis, Dex, Int],
            Self::Druid => [Wis, Con, Int, Dex, Cha, Str],
        }
    }

    /// Whether the class has spell slots.
    pub fn is_caster(self) -> bool {
        matches!(self, Self::Wizard | Self::Druid)
    }
}

/// Who the character is. Fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Character name.
    pub name: String,
    /// Sex.
    pub sex: Sex,
    /// Race.
    pub race: Race,
    /// Class.
    pub class: ClassName,
    /// Alignment.
    pub alignment: Alignment,
}

/// A travelling companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Companion {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    relationship: u8,
}

impl Companion {
    /// Create a companion; relationship is clamped to 0..=100.
    pub fn new(id: impl Into<String>, name: impl Into<String>, relationship: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship: relationship.min(100),
        }
    }

    /// Relationship score, 0-100.
    pub fn relationship(&self) -> u8 {
        self.relationship
    }
}

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Name, sex, race, class, alignment.
    pub identity: Identity,
    level: u32,
    xp: u32,
    /// In-game day, starting at 1.
    pub day: u32,
    /// Hit points.
    pub hp: Track,
    /// Gold pieces.
    pub gold: u32,
    /// Carried items, in acquisition order.
    pub inventory: Vec<String>,
    /// Travelling companions.
    pub companions: Vec<Companion>,
    /// Hit die size, derived from class.
    pub hit_die: Die,
    /// Hit dice available for short rests.
    pub hit_dice: Track,
    /// Spell slots available for spell attacks.
    pub spell_slots: Track,
    /// Ability scores.
    pub stats: Stats,
    /// Character-level story flags.
    pub flags: BTreeMap<String, bool>,
    /// Scene queued to be shown next.
    pub next_scene_id: Option<String>,
    /// The most recently presented scene.
    pub last_scene_id: Option<String>,
    /// Bounded window of recently presented scenes, oldest first.
    pub recent_scene_ids: Vec<String>,
    /// Story state for the active arc.
    pub campaign: CampaignState,
    /// A combat handed over by the check resolver, waiting to be fought.
    pub pending_combat: Option<CombatState>,
}

impl Character {
    /// Build a level-1 character.
    pub fn new(identity: Identity, stats: Stats, campaign: CampaignState) -> Self {
        let class = identity.class;
        let mut max_hp = 10 + stats.modifier(StatKey::Con);
        if class == ClassName::Barbarian {
            max_hp += 4;
        }
        let slots = spell_slot_capacity(class, 1);
        Self {
            identity,
            level: 1,
            xp: 0,
            day: 1,
            hp: Track::new("HP", max_hp.max(1) as u32),
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            companions: Vec::new(),
            hit_die: class.hit_die(),
            hit_dice: Track::new("Hit Dice", STARTING_HIT_DICE),
            spell_slots: Track::new("Spell Slots", slots),
            stats,
            flags: BTreeMap::new(),
            next_scene_id: None,
            last_scene_id: None,
            recent_scene_ids: Vec::new(),
            campaign,
            pending_combat: None,
        }
    }

    /// Character name.
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Character class.
    pub fn class(&self) -> ClassName {
        self.identity.class
    }

    /// Current level (1-20).
    pub fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = level.clamp(1, MAX_LEVEL);
    }

    /// Total experience points.
    pub fn xp(&self) -> u32 {
        self.xp
    }

    /// Grant experience. Leveling is reconciled separately.
    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// The modifier for one ability score.
    pub fn modifier(&self, key: StatKey) -> i32 {
        self.stats.modifier(key)
    }

    /// Whether the character is at 0 hp.
    pub fn is_dead(&self) -> bool {
        self.hp.is_empty()
    }

    /// Change gold by a signed amount, never below zero.
    pub fn adjust_gold(&mut self, delta: i32) {
        self.gold = self.gold.saturating_add_signed(delta);
    }

    /// Append an item to the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Add a companion, replacing any with the same id.
    pub fn add_companion(&mut self, companion: Companion) {
        match self.companions.iter_mut().find(|c| c.id == companion.id) {
            Some(existing) => *existing = companion,
            None => self.companions.push(companion),
        }
    }

    /// Read a character flag; unset flags are false.
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Set a character flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    /// Record a presented scene: last id, bounded recent window, seen set.
    pub fn mark_scene_seen(&mut self, scene_id: &str, window: usize) {
        self.last_scene_id = Some(scene_id.to_string());
        self.recent_scene_ids.push(scene_id.to_string());
        if self.recent_scene_ids.len() > window {
            let excess = self.recent_scene_ids.len() - window;
            self.recent_scene_ids.drain(..excess);
        }
        self.campaign.mark_seen(scene_id);
    }

    /// Check the record's invariants.
    pub fn validate(&self) -> MechResult<()> {
        if !(1..=MAX_LEVEL).contains(&self.level) {
            return Err(MechError::InvalidCharacter(format!(
                "level {} outside 1..={MAX_LEVEL}",
                self.level
            )));
        }
        let expected = level_for_xp(self.xp);
        if self.level != expected {
            return Err(MechError::InvalidCharacter(format!(
                "level {} does not match {} xp (expected {expected})",
                self.level, self.xp
            )));
        }
        let expected_slots = spell_slot_capacity(self.class(), self.level);
        if self.spell_slots.max() != expected_slots {
            return Err(MechError::InvalidCharacter(format!(
                "spell slot capacity {} (expected {expected_slots})",
                self.spell_slots.max()
            )));
        }
        if self.hp.max() == 0 {
            return Err(MechError::InvalidCharacter("max hp is zero".into()));
        }
        if self.hit_die != self.class().hit_die() {
            return Err(MechError::InvalidCharacter(format!(
                "hit die {} does not match class {}",
                self.hit_die,
                self.class()
            )));
        }
        if let Some(c) = self.companions.iter().find(|c| c.relationship > 100) {
            return Err(MechError::InvalidCharacter(format!(
                "companion {} relationship {} above 100",
                c.id, c.relationship
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::ArcId;

    fn identity(class: ClassName) -> Identity {
        Identity {
            name: "Milo Half-Plan".into(),
            sex: Sex::Male,
            race: Race::Halfling,
            class,
            alignment: Alignment::Neutral,
        }
    }

    fn character(class: ClassName, con: i32) -> Character {
        Character::new(
            identity(class),
            Stats::default().with(StatKey::Con, con),
            CampaignState::new(ArcId::Taxman),
        )
    }

    #[test]
    fn starting_values() {
        let c = character(ClassName::Fighter, 14);
        assert_eq!(c.level(), 1);
        assert_eq!(c.day, 1);
        assert_eq!(c.gold, STARTING_GOLD);
        assert_eq!(c.hp.max(), 12);
        assert_eq!(c.hit_die, Die::D10);
        assert_eq!(c.hit_dice.current(), 6);
        assert_eq!(c.spell_slots.max(), 0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn barbarian_bonus_and_caster_slots() {
        assert_eq!(character(ClassName::Barbarian, 10).hp.max(), 14);
        let wizard = character(ClassName::Wizard, 8);
        assert_eq!(wizard.hp.max(), 9);
        assert_eq!(wizard.spell_slots.max(), 2);
        assert_eq!(wizard.hit_die, Die::D6);
    }

    #[test]
    fn max_hp_has_a_floor() {
        let mut id = identity(ClassName::Wizard);
        id.name = "Tess".into();
        let c = Character::new(
            id,
            Stats::default().with(StatKey::Con, -30),
            CampaignState::new(ArcId::Mimic),
        );
        assert_eq!(c.hp.max(), 1);
    }

    #[test]
    fn parse_identity_labels() {
        assert_eq!(Race::parse("half-orc").unwrap(), Race::HalfOrc);
        assert_eq!(Race::parse("HalfElf").unwrap(), Race::HalfElf);
        assert_eq!(ClassName::parse("druid").unwrap(), ClassName::Druid);
        assert!(ClassName::parse("bard").is_err());
        assert_eq!(Race::HalfElf.to_string(), "Half-Elf");
    }

    #[test]
    fn gold_never_negative() {
        let mut c = character(ClassName::Rogue, 10);
        c.adjust_gold(-50);
        assert_eq!(c.gold, 0);
        c.adjust_gold(3);
        assert_eq!(c.gold, 3);
    }

    #[test]
    fn recent_window_is_bounded() {
        let mut c = character(ClassName::Rogue, 10);
        for i in 0..10 {
            c.mark_scene_seen(&format!("s{i}"), 6);
        }
        assert_eq!(c.recent_scene_ids.len(), 6);
        assert_eq!(c.recent_scene_ids[0], "s4");
        assert_eq!(c.last_scene_id.as_deref(), Some("s9"));
        assert_eq!(c.campaign.seen_scene_ids().len(), 10);
    }

    #[test]
    fn companion_relationship_clamped_and_replaced() {
        let mut c = character(ClassName::Druid, 10);
        c.add_companion(Companion::new("chesty", "Chesty", 250));
        assert_eq!(c.companions[0].relationship(), 100);
        c.add_companion(Companion::new("chesty", "Chesty", 55));
        assert_eq!(c.companions.len(), 1);
        assert_eq!(c.companions[0].relationship(), 55);
    }

    #[test]
    fn validate_rejects_level_mismatch() {
        let mut c = character(ClassName::Fighter, 10);
        c.add_xp(5000);
        assert!(c.validate().is_err());
    }
}

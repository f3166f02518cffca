//! Outcome effects and the combat hand-off.
//!
//! A choice's success and failure branches are [`Outcome`]s: narrative text,
//! extra log lines, an ordered list of [`Effect`]s, and an optional
//! [`CombatTrigger`]. Outcomes are plain data, so content packs can be
//! loaded from JSON.

use serde::{Deserialize, Serialize};

use cm_mechanics::{Character, CombatEnding, CombatState, Companion, EnemyKind};

/// A single change applied to the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Grant experience.
    AddXp {
        /// Xp to add.
        amount: u32,
    },
    /// Heal or damage, clamped to `0..=max`.
    AdjustHp {
        /// Signed hp change.
        delta: i32,
    },
    /// Gain or lose gold, never below zero.
    AdjustGold {
        /// Signed gold change.
        delta: i32,
    },
    /// Append an item to the inventory.
    AddItem {
        /// Item name.
        item: String,
    },
    /// Set a character-level flag.
    SetFlag {
        /// Flag key.
        key: String,
    },
    /// Set an arc flag.
    SetArcFlag {
        /// Flag key.
        key: String,
    },
    /// Push arc progress forward.
    AdvanceArc {
        /// Progress to add.
        amount: u32,
    },
    /// Queue a scene to be shown next.
    ForceScene {
        /// Scene id.
        scene_id: String,
    },
    /// Add or replace a companion.
    AddCompanion {
        /// Companion id.
        id: String,
        /// Display name.
        name: String,
        /// Starting relationship, 0-100.
        relationship: u8,
    },
}

impl Effect {
    /// Apply the effect in place.
    pub fn apply(&self, character: &mut Character) {
        match self {
            Self::AddXp { amount } => character.add_xp(*amount),
            Self::AdjustHp { delta } => {
                character.hp.adjust(*delta);
            }
            Self::AdjustGold { delta } => character.adjust_gold(*delta),
            Self::AddItem { item } => character.add_item(item.clone()),
            Self::SetFlag { key } => character.set_flag(key.clone(), true),
            Self::SetArcFlag { key } => character.campaign.set_flag(key.clone(), true),
            Self::AdvanceArc { amount } => character.campaign.advance(*amount),
            Self::ForceScene { scene_id } => character.next_scene_id = Some(scene_id.clone()),
            Self::AddCompanion {
                id,
                name,
                relationship,
            } => character.add_companion(Companion::new(id.clone(), name.clone(), *relationship)),
        }
    }
}

/// A fight that starts when an outcome is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTrigger {
    /// Which enemy to spawn.
    pub enemy: EnemyKind,
    /// Ending when the enemy drops.
    pub on_win: CombatEnding,
    /// Ending when the player drops.
    pub on_lose: CombatEnding,
    /// Ending when the player escapes.
    pub on_flee: CombatEnding,
}

impl CombatTrigger {
    /// Create a trigger.
    pub fn new(
        enemy: EnemyKind,
        on_win: CombatEnding,
        on_lose: CombatEnding,
        on_flee: CombatEnding,
    ) -> Self {
        Self {
            enemy,
            on_win,
            on_lose,
            on_flee,
        }
    }

    /// Spawn the enemy and build the fight.
    pub fn start(&self) -> CombatState {
        CombatState::new(
            self.enemy.spawn(),
            self.on_win.clone(),
            self.on_lose.clone(),
            self.on_flee.clone(),
        )
    }
}

/// One branch of a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Narrative text shown to the player.
    pub text: String,
    /// Extra log lines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<String>,
    /// Effects, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    /// Fight started by this outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat: Option<CombatTrigger>,
}

impl Outcome {
    /// An outcome with text and nothing else.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            logs: Vec::new(),
            effects: Vec::new(),
            combat: None,
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Grant xp.
    pub fn xp(self, amount: u32) -> Self {
        self.with(Effect::AddXp { amount })
    }

    /// Change hp.
    pub fn hp(self, delta: i32) -> Self {
        self.with(Effect::AdjustHp { delta })
    }

    /// Change gold.
    pub fn gold(self, delta: i32) -> Self {
        self.with(Effect::AdjustGold { delta })
    }

    /// Give an item.
    pub fn item(self, item: &str) -> Self {
        self.with(Effect::AddItem {
            item: item.to_string(),
        })
    }

    /// Set a character flag.
    pub fn flag(self, key: &str) -> Self {
        self.with(Effect::SetFlag {
            key: key.to_string(),
        })
    }

    /// Set an arc flag.
    pub fn arc_flag(self, key: &str) -> Self {
        self.with(Effect::SetArcFlag {
            key: key.to_string(),
        })
    }

    /// Advance the arc.
    pub fn advance(self, amount: u32) -> Self {
        self.with(Effect::AdvanceArc { amount })
    }

    /// Queue a follow-up scene.
    pub fn then(self, scene_id: &str) -> Self {
        self.with(Effect::ForceScene {
            scene_id: scene_id.to_string(),
        })
    }

    /// Add a companion.
    pub fn companion(self, id: &str, name: &str, relationship: u8) -> Self {
        self.with(Effect::AddCompanion {
            id: id.to_string(),
            name: name.to_string(),
            relationship,
        })
    }

    /// Add a log line.
    pub fn log(mut self, line: &str) -> Self {
        self.logs.push(line.to_string());
        self
    }

    /// Start a fight.
    pub fn fight(mut self, trigger: CombatTrigger) -> Self {
        self.combat = Some(trigger);
        self
    }

    /// Net hp change from this outcome's effects.
    pub fn hp_delta(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| match e {
                Effect::AdjustHp { delta } => *delta,
                _ => 0,
            })
            .sum()
    }

    /// Scene ids this outcome can queue, including combat endings.
    pub fn forced_scenes(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::ForceScene { scene_id } => Some(scene_id.as_str()),
                _ => None,
            })
            .collect();
        if let Some(trigger) = &self.combat {
            for ending in [&trigger.on_win, &trigger.on_lose, &trigger.on_flee] {
                if let Some(id) = &ending.next_scene_id {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Apply every effect in order and return the next character.
    pub fn apply(&self, character: &Character) -> Character {
        let mut next = character.clone();
        for effect in &self.effects {
            effect.apply(&mut next);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_mechanics::{
        Alignment, ArcId, CampaignState, ClassName, Identity, Race, Sex, Stats,
    };

    fn hero() -> Character {
        Character::new(
            Identity {
                name: "Nyx McSidequest".into(),
                sex: Sex::Female,
                race: Race::Tiefling,
                class: ClassName::Paladin,
                alignment: Alignment::Good,
            },
            Stats::default(),
            CampaignState::new(ArcId::Mimic),
        )
    }

    #[test]
    fn effects_apply_in_order() {
        let outcome = Outcome::new("You find a chest.")
            .xp(3)
            .gold(-20)
            .hp(-2)
            .item("Chest Key")
            .arc_flag("mimic_met")
            .flag("owes_chest")
            .advance(12)
            .then("camp.mimic_followup")
            .companion("comp_chesty", "Chesty", 65);
        let next = outcome.apply(&hero());
        assert_eq!(next.xp(), 3);
        assert_eq!(next.gold, 0);
        assert_eq!(next.hp.current(), 8);
        assert_eq!(next.inventory, vec!["Chest Key".to_string()]);
        assert!(next.campaign.flag("mimic_met"));
        assert!(next.flag("owes_chest"));
        assert_eq!(next.campaign.progress(), 12);
        assert_eq!(next.next_scene_id.as_deref(), Some("camp.mimic_followup"));
        assert_eq!(next.companions[0].relationship(), 65);
    }

    #[test]
    fn hp_delta_sums_adjustments() {
        let outcome = Outcome::new("Ouch.").hp(-2).xp(1).hp(-1);
        assert_eq!(outcome.hp_delta(), -3);
        assert_eq!(Outcome::new("Fine.").hp_delta(), 0);
    }

    #[test]
    fn forced_scenes_include_combat_endings() {
        let trigger = CombatTrigger::new(
            EnemyKind::Thug,
            CombatEnding::new("won").then("tavern.dripping_goblet"),
            CombatEnding::new("lost"),
            CombatEnding::new("fled"),
        );
        let outcome = Outcome::new("Fight!").then("court.day").fight(trigger);
        assert_eq!(outcome.forced_scenes(), vec!["court.day", "tavern.dripping_goblet"]);
    }

    #[test]
    fn effect_json_shape() {
        let json = serde_json::to_string(&Effect::AddXp { amount: 4 }).unwrap();
        assert_eq!(json, r#"{"type":"add_xp","amount":4}"#);
        let back: Effect = serde_json::from_str(r#"{"type":"adjust_gold","delta":-2}"#).unwrap();
        assert_eq!(back, Effect::AdjustGold { delta: -2 });
    }

    #[test]
    fn trigger_starts_a_fresh_fight() {
        let trigger = CombatTrigger::new(
            EnemyKind::Rival,
            CombatEnding::new("won"),
            CombatEnding::new("lost"),
            CombatEnding::new("fled"),
        );
        let combat = trigger.start();
        assert_eq!(combat.round, 1);
        assert_eq!(combat.enemy.name, "Rival Adventurer");
        assert_eq!(combat.enemy.hp, 16);
    }
}

//! Turn-based combat between the player and a single enemy.
//!
//! A [`CombatState`] is **active** until the enemy drops (won), the player
//! drops (lost), or flee progress fills up (fled). Each terminal carries a
//! [`CombatEnding`] authored by whoever started the fight.

pub mod action;

pub use action::{
    ActionReport, AttackKind, PlayerAction, RoundReport, Weapon, attack, cantrip_for, enemy_turn,
    guard, next_intent, run, spell_for, take_turn, weapon_for,
};

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::dice::{DiceExpr, Die};
use crate::leveling::apply_leveling;
use crate::sheet::Character;
use crate::stats::StatKey;

/// Flee progress needed to escape.
pub const FLEE_THRESHOLD: u32 = 100;

/// What the enemy will do on its next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EnemyIntent {
    /// A normal attack.
    Attack {
        /// Flavour name.
        label: String,
        /// Bonus added to the d20.
        to_hit: i32,
        /// Damage on a hit.
        damage: DiceExpr,
        /// Player stat that sets the target number.
        stat: StatKey,
    },
    /// A slower, harder-hitting attack.
    Heavy {
        /// Flavour name.
        label: String,
        /// Bonus added to the d20.
        to_hit: i32,
        /// Damage on a hit.
        damage: DiceExpr,
        /// Player stat that sets the target number.
        stat: StatKey,
    },
    /// Raise AC until the enemy's next turn.
    Defend {
        /// Flavour name.
        label: String,
        /// AC added while defending.
        ac_bonus: i32,
    },
}

impl EnemyIntent {
    /// Build an attack intent.
    pub fn attack(label: &str, to_hit: i32, damage: DiceExpr, stat: StatKey) -> Self {
        Self::Attack {
            label: label.to_string(),
            to_hit,
            damage,
            stat,
        }
    }

    /// Build a heavy attack intent.
    pub fn heavy(label: &str, to_hit: i32, damage: DiceExpr, stat: StatKey) -> Self {
        Self::Heavy {
            label: label.to_string(),
            to_hit,
            damage,
            stat,
        }
    }

    /// Build a defend intent.
    pub fn defend(label: &str, ac_bonus: i32) -> Self {
        Self::Defend {
            label: label.to_string(),
            ac_bonus,
        }
    }

    /// Flavour name of the intent.
    pub fn label(&self) -> &str {
        match self {
            Self::Attack { label, .. } | Self::Heavy { label, .. } | Self::Defend { label, .. } => {
                label
            }
        }
    }

    /// AC bonus granted while this intent is showing.
    pub fn ac_bonus(&self) -> i32 {
        match self {
            Self::Defend { ac_bonus, .. } => *ac_bonus,
            _ => 0,
        }
    }
}

impl std::fmt::Display for EnemyIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack {
                label,
                to_hit,
                damage,
                ..
            }
            | Self::Heavy {
                label,
                to_hit,
                damage,
                ..
            } => write!(f, "{label} (+{to_hit}, {damage})"),
            Self::Defend { label, ac_bonus } => write!(f, "{label} (+{ac_bonus} AC)"),
        }
    }
}

/// Snapshot of the enemy in a fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique id for this spawn.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Starting hit points.
    pub max_hp: u32,
    /// Current hit points.
    pub hp: u32,
    /// Armour class.
    pub ac: i32,
    /// Declared next action.
    pub intent: EnemyIntent,
}

/// The built-in enemy roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Tavern Thug.
    Thug,
    /// Starving Hound.
    Hound,
    /// Rival Adventurer.
    Rival,
    /// Hired Blade.
    HiredBlade,
}

impl EnemyKind {
    /// Create a fresh enemy of this kind at full hp.
    pub fn spawn(self) -> Enemy {
        let (name, hp, ac, intent) = match self {
            Self::Thug => (
                "Tavern Thug",
                14,
                12,
                EnemyIntent::attack("Cheap shot", 3, DiceExpr::new(1, Die::D8), StatKey::Str),
            ),
            Self::Hound => (
                "Starving Hound",
                10,
                12,
                EnemyIntent::attack("Lunge", 2, DiceExpr::new(1, Die::D6), StatKey::Dex),
            ),
            Self::Rival => (
                "Rival Adventurer",
                16,
                13,
                EnemyIntent::heavy("Power strike", 3, DiceExpr::new(1, Die::D10), StatKey::Str),
            ),
            Self::HiredBlade => (
                "Hired Blade",
                15,
                13,
                EnemyIntent::attack("Quick cut", 4, DiceExpr::new(1, Die::D8), StatKey::Dex),
            ),
        };
        Enemy {
            id: format!("e_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            max_hp: hp,
            hp,
            ac,
            intent,
        }
    }
}

/// What happens when a fight ends a particular way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEnding {
    /// Narrative text.
    pub text: String,
    /// Scene to queue next, if any.
    #[serde(default)]
    pub next_scene_id: Option<String>,
    /// Extra log lines.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl CombatEnding {
    /// An ending with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Queue a follow-up scene.
    pub fn then(mut self, scene_id: impl Into<String>) -> Self {
        self.next_scene_id = Some(scene_id.into());
        self
    }

    /// Add a log line.
    pub fn log(mut self, line: impl Into<String>) -> Self {
        self.logs.push(line.into());
        self
    }
}

/// Where a fight stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStatus {
    /// Still going.
    Active,
    /// The enemy dropped.
    Won,
    /// The player dropped.
    Lost,
    /// The player got away.
    Fled,
}

impl CombatStatus {
    /// Whether the fight is over.
    pub fn is_terminal(self) -> bool {
        self != Self::Active
    }
}

/// An ongoing fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// The opponent.
    pub enemy: Enemy,
    /// Round counter, starting at 1.
    pub round: u32,
    /// Progress toward escaping, 0-100.
    pub flee_progress: u32,
    /// Whether the player is guarding against the next enemy action.
    pub guard: bool,
    /// Ending when the enemy drops.
    pub on_win: CombatEnding,
    /// Ending when the player drops.
    pub on_lose: CombatEnding,
    /// Ending when the player escapes.
    pub on_flee: CombatEnding,
}

impl CombatState {
    /// Start a fight at round 1.
    pub fn new(
        enemy: Enemy,
        on_win: CombatEnding,
        on_lose: CombatEnding,
        on_flee: CombatEnding,
    ) -> Self {
        Self {
            enemy,
            round: 1,
            flee_progress: 0,
            guard: false,
            on_win,
            on_lose,
            on_flee,
        }
    }

    /// Terminal check, in order: enemy down, player down, escaped.
    pub fn status(&self, player: &Character) -> CombatStatus {
        if self.enemy.hp == 0 {
            CombatStatus::Won
        } else if player.is_dead() {
            CombatStatus::Lost
        } else if self.flee_progress >= FLEE_THRESHOLD {
            CombatStatus::Fled
        } else {
            CombatStatus::Active
        }
    }

    /// The ending for a terminal status.
    pub fn ending(&self, status: CombatStatus) -> Option<&CombatEnding> {
        match status {
            CombatStatus::Active => None,
            CombatStatus::Won => Some(&self.on_win),
            CombatStatus::Lost => Some(&self.on_lose),
            CombatStatus::Fled => Some(&self.on_flee),
        }
    }
}

/// Xp for defeating an enemy: three per max hp, between 20 and 60.
pub fn win_xp(enemy: &Enemy) -> u32 {
    (enemy.max_hp * 3).clamp(20, 60)
}

/// Xp for escaping: half the win reward, at least 10.
pub fn flee_xp(enemy: &Enemy) -> u32 {
    (win_xp(enemy) / 2).max(10)
}

/// Apply a terminal status: grant xp, queue the follow-up, reconcile level.
///
/// Returns the character unchanged with no lines if the fight is still
/// active.
pub fn conclude(
    character: &Character,
    combat: &CombatState,
    status: CombatStatus,
) -> (Character, Vec<String>) {
    let Some(ending) = combat.ending(status) else {
        return (character.clone(), Vec::new());
    };
    let mut next = character.clone();
    let mut lines = vec![ending.text.clone()];

    let xp = match status {
        CombatStatus::Won => win_xp(&combat.enemy),
        CombatStatus::Fled => flee_xp(&combat.enemy),
        CombatStatus::Lost | CombatStatus::Active => 0,
    };
    if xp > 0 {
        next.add_xp(xp);
        lines.push(format!("+{xp} XP."));
    }
    if let Some(scene) = &ending.next_scene_id {
        next.next_scene_id = Some(scene.clone());
    }
    lines.extend(ending.logs.iter().cloned());
    next.pending_combat = None;

    info!(enemy = %combat.enemy.name, ?status, xp, "combat concluded");

    let (leveled, level_logs) = apply_leveling(&next);
    lines.extend(level_logs);
    (leveled, lines)
}

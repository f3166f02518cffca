//! Player actions, the enemy's reaction, and the class kit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::check::CheckRoll;
use crate::dice::{DiceExpr, Die, DieRoller};
use crate::sheet::{Character, ClassName};
use crate::stats::{StatKey, format_modifier};

use super::{CombatState, CombatStatus, EnemyIntent, FLEE_THRESHOLD};

/// DC for the run check.
pub const RUN_DC: i32 = 13;
/// Flee progress for a successful run check.
pub const RUN_GAIN_SUCCESS: u32 = 40;
/// Flee progress for a failed run check.
pub const RUN_GAIN_FAILURE: u32 = 20;
/// AC bonus while guarding.
pub const GUARD_BONUS: i32 = 3;

/// A weapon, cantrip, or spell: name, attack stat, damage dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weapon {
    /// Display name.
    pub name: &'static str,
    /// Stat used for to-hit and damage.
    pub stat: StatKey,
    /// Damage dice.
    pub damage: DiceExpr,
}

const fn weapon(name: &'static str, stat: StatKey, count: u32, die: Die) -> Weapon {
    Weapon {
        name,
        stat,
        damage: DiceExpr::new(count, die),
    }
}

/// The class's weapon.
pub fn weapon_for(class: ClassName) -> Weapon {
    match class {
        ClassName::Rogue => weapon("Shortsword", StatKey::Dex, 1, Die::D6),
        ClassName::Wizard => weapon("Staff", StatKey::Str, 1, Die::D6),
        ClassName::Barbarian => weapon("Greataxe", StatKey::Str, 1, Die::D12),
        ClassName::Fighter => weapon("Longsword", StatKey::Str, 1, Die::D8),
        ClassName::Paladin => weapon("Mace", StatKey::Str, 1, Die::D8),
        ClassName::Druid => weapon("Club", StatKey::Str, 1, Die::D6),
    }
}

/// The class's at-will cantrip, if any.
pub fn cantrip_for(class: ClassName) -> Option<Weapon> {
    match class {
        ClassName::Wizard => Some(weapon("Firebolt", StatKey::Int, 1, Die::D10)),
        ClassName::Druid => Some(weapon("Thorn Whip", StatKey::Wis, 1, Die::D6)),
        _ => None,
    }
}

/// The class's slot-consuming spell, if any.
pub fn spell_for(class: ClassName) -> Option<Weapon> {
    match class {
        ClassName::Wizard => Some(weapon("Magic Missile", StatKey::Int, 3, Die::D4)),
        ClassName::Druid => Some(weapon("Moonbeam", StatKey::Wis, 2, Die::D6)),
        _ => None,
    }
}

/// Which attack the player makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    /// Class weapon.
    #[default]
    Weapon,
    /// Class cantrip; falls back to the weapon.
    Cantrip,
    /// Class spell, costs a slot; falls back to the weapon.
    Spell,
}

impl AttackKind {
    /// Parse `weapon`, `cantrip`, or `spell`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Some(Self::Weapon),
            "cantrip" => Some(Self::Cantrip),
            "spell" => Some(Self::Spell),
            _ => None,
        }
    }
}

/// A player action for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Attack with the given kind.
    Attack(AttackKind),
    /// Brace for the next enemy action.
    Guard,
    /// Try to get away.
    Run,
}

/// Result of a single action.
#[derive(Debug, Clone)]
pub struct ActionReport {
    /// The character after the action.
    pub character: Character,
    /// The fight after the action.
    pub combat: CombatState,
    /// What happened.
    pub text: String,
    /// False when the action did nothing (no spell slots).
    pub consumed_turn: bool,
}

/// Result of a full round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// The character after the round.
    pub character: Character,
    /// The fight after the round.
    pub combat: CombatState,
    /// Where the fight stands.
    pub status: CombatStatus,
    /// What happened, in order.
    pub lines: Vec<String>,
}

/// Attack the enemy.
///
/// d20 + stat vs AC (plus the defend bonus when the enemy is defending);
/// a natural 1 misses. A spell with no slots left is a no-op.
pub fn attack(
    character: &Character,
    combat: &CombatState,
    kind: AttackKind,
    roller: &mut dyn DieRoller,
) -> ActionReport {
    let mut player = character.clone();
    let mut next = combat.clone();
    let class = player.class();

    let chosen = match kind {
        AttackKind::Weapon => weapon_for(class),
        AttackKind::Cantrip => cantrip_for(class).unwrap_or_else(|| weapon_for(class)),
        AttackKind::Spell => match spell_for(class) {
            Some(spell) => {
                if player.spell_slots.is_empty() {
                    return ActionReport {
                        character: player,
                        combat: next,
                        text: "No spell slots left.".to_string(),
                        consumed_turn: false,
                    };
                }
                player.spell_slots.adjust(-1);
                spell
            }
            None => weapon_for(class),
        },
    };

    let modifier = player.modifier(chosen.stat);
    let ac = next.enemy.ac + next.enemy.intent.ac_bonus();
    let check = CheckRoll::roll(roller, modifier, ac);
    next.guard = false;

    let text = if check.success() {
        let amount = chosen.damage.roll_damage(modifier, roller);
        next.enemy.hp = next.enemy.hp.saturating_sub(amount);
        format!("You use {}. Hit! (-{amount} HP)", chosen.name)
    } else {
        format!("You use {}. Miss.", chosen.name)
    };
    debug!(weapon = chosen.name, natural = check.natural, total = check.total, ac, "player attack");

    ActionReport {
        character: player,
        combat: next,
        text,
        consumed_turn: true,
    }
}

/// Brace: +3 AC against the next enemy action.
pub fn guard(character: &Character, combat: &CombatState) -> ActionReport {
    let mut next = combat.clone();
    next.guard = true;
    ActionReport {
        character: character.clone(),
        combat: next,
        text: "You brace and guard.".to_string(),
        consumed_turn: true,
    }
}

/// Try to get away: d20 + best of DEX/CON vs DC 13.
pub fn run(character: &Character, combat: &CombatState, roller: &mut dyn DieRoller) -> ActionReport {
    let modifier = character
        .modifier(StatKey::Dex)
        .max(character.modifier(StatKey::Con));
    let check = CheckRoll::roll(roller, modifier, RUN_DC);
    let gain = if check.success() {
        RUN_GAIN_SUCCESS
    } else {
        RUN_GAIN_FAILURE
    };

    let mut next = combat.clone();
    next.flee_progress = (next.flee_progress + gain).min(FLEE_THRESHOLD);
    next.guard = false;

    let lead = if check.success() {
        "You make distance."
    } else {
        "You stumble but keep moving."
    };
    let text = format!(
        "{lead} (Run check {} {} = {} vs DC {RUN_DC})",
        check.natural,
        format_modifier(modifier),
        check.total
    );

    ActionReport {
        character: character.clone(),
        combat: next,
        text,
        consumed_turn: true,
    }
}

/// Pick the enemy's next intent from the shared table.
pub fn next_intent(roller: &mut dyn DieRoller) -> EnemyIntent {
    match roller.roll(3) {
        1 => EnemyIntent::attack("Attack", 3, DiceExpr::new(1, Die::D6), StatKey::Str),
        2 => EnemyIntent::heavy("Heavy swing", 1, DiceExpr::new(1, Die::D10), StatKey::Str),
        _ => EnemyIntent::defend("Defend", 2),
    }
}

/// The enemy acts on its declared intent, then declares a new one.
pub fn enemy_turn(
    character: &Character,
    combat: &CombatState,
    roller: &mut dyn DieRoller,
) -> ActionReport {
    let mut player = character.clone();
    let mut next = combat.clone();
    let name = next.enemy.name.clone();

    let text = match &next.enemy.intent {
        EnemyIntent::Defend { .. } => format!("{name} defends."),
        EnemyIntent::Attack {
            label,
            to_hit,
            damage,
            stat,
        }
        | EnemyIntent::Heavy {
            label,
            to_hit,
            damage,
            stat,
        } => {
            let guard = if next.guard { GUARD_BONUS } else { 0 };
            let target = 10 + player.modifier(*stat) + guard;
            let check = CheckRoll::roll(roller, *to_hit, target);
            if check.success() {
                let amount = damage.roll_damage(0, roller);
                player.hp.adjust(-(amount as i32));
                format!("{name} hits ({label}). -{amount} HP")
            } else {
                format!("{name} misses ({label}).")
            }
        }
    };

    next.enemy.intent = next_intent(roller);
    next.guard = false;
    next.round += 1;

    ActionReport {
        character: player,
        combat: next,
        text,
        consumed_turn: true,
    }
}

/// Play one round: the player's action, then the enemy's reaction.
///
/// Stops at the first terminal state, so a dropped enemy never swings back.
pub fn take_turn(
    character: &Character,
    combat: &CombatState,
    action: PlayerAction,
    roller: &mut dyn DieRoller,
) -> RoundReport {
    let status = combat.status(character);
    if status.is_terminal() {
        return RoundReport {
            character: character.clone(),
            combat: combat.clone(),
            status,
            lines: vec!["The fight is already over.".to_string()],
        };
    }

    let report = match action {
        PlayerAction::Attack(kind) => attack(character, combat, kind, roller),
        PlayerAction::Guard => guard(character, combat),
        PlayerAction::Run => run(character, combat, roller),
    };
    let mut lines = vec![report.text];
    let status = report.combat.status(&report.character);
    if !report.consumed_turn || status.is_terminal() {
        return RoundReport {
            character: report.character,
            combat: report.combat,
            status,
            lines,
        };
    }

    let reaction = enemy_turn(&report.character, &report.combat, roller);
    lines.push(reaction.text);
    let status = reaction.combat.status(&reaction.character);
    RoundReport {
        character: reaction.character,
        combat: reaction.combat,
        status,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{ArcId, CampaignState};
    use crate::combat::{CombatEnding, EnemyKind};
    use crate::dice::ScriptedRoller;
    use crate::sheet::{Alignment, Identity, Race, Sex};
    use crate::stats::Stats;

    fn hero(class: ClassName, stats: Stats) -> Character {
        Character::new(
            Identity {
                name: "Astra Underfoot".into(),
                sex: Sex::Female,
                race: Race::Gnome,
                class,
                alignment: Alignment::Neutral,
            },
            stats,
            CampaignState::new(ArcId::Internship),
        )
    }

    fn fight(kind: EnemyKind) -> CombatState {
        CombatState::new(
            kind.spawn(),
            CombatEnding::new("won"),
            CombatEnding::new("lost"),
            CombatEnding::new("fled"),
        )
    }

    #[test]
    fn kit_lookup() {
        assert_eq!(weapon_for(ClassName::Rogue).stat, StatKey::Dex);
        assert_eq!(weapon_for(ClassName::Barbarian).damage, DiceExpr::new(1, Die::D12));
        assert!(cantrip_for(ClassName::Fighter).is_none());
        assert_eq!(spell_for(ClassName::Wizard).map(|s| s.name), Some("Magic Missile"));
        assert_eq!(spell_for(ClassName::Druid).map(|s| s.damage), Some(DiceExpr::new(2, Die::D6)));
    }

    #[test]
    fn weapon_hit_deals_damage() {
        let player = hero(ClassName::Fighter, Stats::uniform(14));
        let combat = fight(EnemyKind::Thug);
        // d20 12 + 2 = 14 vs AC 12, then d8 5 + 2.
        let mut r = ScriptedRoller::new([12, 5]);
        let report = attack(&player, &combat, AttackKind::Weapon, &mut r);
        assert_eq!(report.combat.enemy.hp, 7);
        assert_eq!(report.text, "You use Longsword. Hit! (-7 HP)");
    }

    #[test]
    fn natural_one_misses() {
        let player = hero(ClassName::Fighter, Stats::uniform(30));
        let combat = fight(EnemyKind::Thug);
        let mut r = ScriptedRoller::new([1]);
        let report = attack(&player, &combat, AttackKind::Weapon, &mut r);
        assert_eq!(report.combat.enemy.hp, 14);
        assert!(report.text.ends_with("Miss."));
    }

    #[test]
    fn defending_enemy_is_harder_to_hit() {
        let player = hero(ClassName::Fighter, Stats::uniform(10));
        let mut combat = fight(EnemyKind::Thug);
        combat.enemy.intent = EnemyIntent::defend("Defend", 2);
        let mut r = ScriptedRoller::new([13]);
        let report = attack(&player, &combat, AttackKind::Weapon, &mut r);
        assert_eq!(report.combat.enemy.hp, 14);
    }

    #[test]
    fn spell_consumes_a_slot() {
        let player = hero(ClassName::Wizard, Stats::uniform(10));
        let combat = fight(EnemyKind::Hound);
        let mut r = ScriptedRoller::new([15, 1, 1, 1]);
        let report = attack(&player, &combat, AttackKind::Spell, &mut r);
        assert_eq!(report.character.spell_slots.current(), 1);
        assert_eq!(report.combat.enemy.hp, 7);
    }

    #[test]
    fn spell_without_slots_is_a_noop() {
        let mut player = hero(ClassName::Druid, Stats::uniform(10));
        player.spell_slots.set_current(0);
        let combat = fight(EnemyKind::Hound);
        let mut r = ScriptedRoller::new([20, 20, 20]);
        let round = take_turn(&player, &combat, PlayerAction::Attack(AttackKind::Spell), &mut r);
        assert_eq!(round.lines, vec!["No spell slots left.".to_string()]);
        assert_eq!(round.combat, combat);
        assert_eq!(round.character, player);
        assert_eq!(r.remaining(), 3);
    }

    #[test]
    fn non_caster_cantrip_falls_back_to_weapon() {
        let player = hero(ClassName::Paladin, Stats::uniform(10));
        let combat = fight(EnemyKind::Thug);
        let mut r = ScriptedRoller::new([15, 4]);
        let report = attack(&player, &combat, AttackKind::Cantrip, &mut r);
        assert!(report.text.starts_with("You use Mace."));
    }

    #[test]
    fn guard_raises_enemy_target_number() {
        let player = hero(ClassName::Rogue, Stats::uniform(10));
        let combat = fight(EnemyKind::Thug);
        let guarded = guard(&player, &combat).combat;
        assert!(guarded.guard);
        // 9 + 3 = 12: hits AC 10, misses AC 13.
        let mut r = ScriptedRoller::new([9, 4, 1]);
        let unguarded_hit = enemy_turn(&player, &combat, &mut r);
        assert_eq!(unguarded_hit.character.hp.current(), 6);
        let mut r = ScriptedRoller::new([9, 1]);
        let guarded_miss = enemy_turn(&player, &guarded, &mut r);
        assert_eq!(guarded_miss.character.hp.current(), 10);
        assert!(!guarded_miss.combat.guard);
        assert_eq!(guarded_miss.combat.round, 2);
    }

    #[test]
    fn enemy_natural_one_misses() {
        let player = hero(ClassName::Rogue, Stats::uniform(3));
        let combat = fight(EnemyKind::HiredBlade);
        let mut r = ScriptedRoller::new([1, 3]);
        let report = enemy_turn(&player, &combat, &mut r);
        assert_eq!(report.character.hp.current(), player.hp.current());
        assert_eq!(report.text, "Hired Blade misses (Quick cut).");
    }

    #[test]
    fn defend_intent_deals_no_damage() {
        let player = hero(ClassName::Rogue, Stats::uniform(10));
        let mut combat = fight(EnemyKind::Thug);
        combat.enemy.intent = EnemyIntent::defend("Defend", 2);
        let mut r = ScriptedRoller::new([1]);
        let report = enemy_turn(&player, &combat, &mut r);
        assert_eq!(report.text, "Tavern Thug defends.");
        assert_eq!(report.character.hp.current(), 10);
        assert_eq!(report.combat.enemy.intent.label(), "Attack");
    }

    #[test]
    fn run_progress() {
        let player = hero(ClassName::Rogue, Stats::uniform(10).with(StatKey::Con, 14));
        let combat = fight(EnemyKind::Thug);
        let mut r = ScriptedRoller::new([11]);
        let ok = run(&player, &combat, &mut r);
        assert_eq!(ok.combat.flee_progress, 40);
        assert_eq!(ok.text, "You make distance. (Run check 11 +2 = 13 vs DC 13)");
        let mut r = ScriptedRoller::new([1]);
        let fail = run(&player, &ok.combat, &mut r);
        assert_eq!(fail.combat.flee_progress, 60);
    }

    #[test]
    fn killing_blow_skips_enemy_turn() {
        let player = hero(ClassName::Fighter, Stats::uniform(10));
        let mut combat = fight(EnemyKind::Thug);
        combat.enemy.hp = 3;
        let mut r = ScriptedRoller::new([15, 5, 20, 8]);
        let round = take_turn(&player, &combat, PlayerAction::Attack(AttackKind::Weapon), &mut r);
        assert_eq!(round.status, CombatStatus::Won);
        assert_eq!(round.lines.len(), 1);
        assert_eq!(round.character.hp.current(), player.hp.current());
        assert_eq!(r.remaining(), 2);
    }

    #[test]
    fn terminal_fight_is_frozen() {
        let player = hero(ClassName::Fighter, Stats::uniform(10));
        let mut combat = fight(EnemyKind::Thug);
        combat.flee_progress = 100;
        let mut r = ScriptedRoller::new([20]);
        let round = take_turn(&player, &combat, PlayerAction::Guard, &mut r);
        assert_eq!(round.status, CombatStatus::Fled);
        assert_eq!(round.combat, combat);
    }

    #[test]
    fn running_always_ends_the_fight() {
        let player = hero(ClassName::Rogue, Stats::uniform(10));
        let mut combat = fight(EnemyKind::Hound);
        let mut character = player;
        let mut r = ScriptedRoller::new([]);
        let mut status = CombatStatus::Active;
        for _ in 0..5 {
            let round = take_turn(&character, &combat, PlayerAction::Run, &mut r);
            character = round.character;
            combat = round.combat;
            status = round.status;
            if status.is_terminal() {
                break;
            }
        }
        assert!(matches!(status, CombatStatus::Fled | CombatStatus::Lost));
    }
}

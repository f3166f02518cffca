//! Skill-check resolution.
//!
//! [`begin_check`] turns a player's pick into a [`PendingRoll`];
//! [`resolve_roll`] rolls (or takes) the d20, advances time and the arc,
//! applies the matching [`Outcome`](crate::effect::Outcome), hands any
//! triggered fight to the combat engine, and reconciles level.

use tracing::info;

use cm_mechanics::{Character, CheckRoll, DieRoller, LogEntry, apply_leveling};

use crate::config::EngineConfig;
use crate::error::{CampaignError, CampaignResult};
use crate::scene::{PendingRoll, Scene};

/// Everything a resolved check produced.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The character afterwards.
    pub character: Character,
    /// Log entries, outcome text first.
    pub log: Vec<LogEntry>,
    /// The outcome's narrative text.
    pub outcome_text: String,
    /// e.g. `d20 11 + DEX +2 = 13 vs DC 13`.
    pub breakdown: String,
    /// The natural d20 face.
    pub roll: u32,
    /// Whether the check succeeded.
    pub success: bool,
    /// Whether the outcome started a fight (now in `pending_combat`).
    pub combat_started: bool,
}

/// Commit to a choice on a scene.
pub fn begin_check(scene: &Scene, choice_id: &str) -> CampaignResult<PendingRoll> {
    let choice = scene
        .find_choice(choice_id)
        .ok_or_else(|| CampaignError::UnknownChoice {
            scene: scene.id.clone(),
            choice: choice_id.to_string(),
        })?;
    Ok(PendingRoll {
        scene_id: scene.id.clone(),
        choice_id: choice.id.clone(),
        stat: choice.stat,
        dc: choice.dc,
    })
}

/// Resolve a pending roll.
///
/// A supplied `roll` is clamped to 1-20; otherwise a d20 is drawn. A natural
/// 1 always fails.
pub fn resolve_roll(
    character: &Character,
    scene: &Scene,
    pending: &PendingRoll,
    roll: Option<u32>,
    config: &EngineConfig,
    roller: &mut dyn DieRoller,
) -> CampaignResult<Resolution> {
    if pending.scene_id != scene.id {
        return Err(CampaignError::SceneMismatch {
            expected: pending.scene_id.clone(),
            found: scene.id.clone(),
        });
    }
    let choice = scene
        .find_choice(&pending.choice_id)
        .ok_or_else(|| CampaignError::UnknownChoice {
            scene: scene.id.clone(),
            choice: pending.choice_id.clone(),
        })?;

    let modifier = character.modifier(choice.stat);
    let check = match roll {
        Some(natural) => CheckRoll::resolve(natural, modifier, choice.dc),
        None => CheckRoll::roll(roller, modifier, choice.dc),
    };
    let success = check.success();
    let breakdown = check.breakdown(choice.stat);

    let mut next = character.clone();
    next.day += 1;
    next.campaign.advance(config.progress_step);

    let outcome = choice.outcome(success);
    let hp_before = next.hp.current();
    next = outcome.apply(&next);

    let combat_started = match &outcome.combat {
        Some(trigger) => {
            if next.hp.current() < hp_before {
                next.hp.set_current(hp_before);
            }
            next.pending_combat = Some(trigger.start());
            true
        }
        None => false,
    };

    let (next, level_logs) = apply_leveling(&next);
    let day = next.day;
    let mut log = vec![LogEntry::new(day, outcome.text.clone())];
    log.extend(LogEntry::batch(day, outcome.logs.iter().cloned()));
    log.extend(LogEntry::batch(day, level_logs));

    info!(
        scene = %scene.id,
        choice = %choice.id,
        natural = check.natural,
        total = check.total,
        dc = choice.dc,
        success,
        combat_started,
        "check resolved"
    );

    Ok(Resolution {
        character: next,
        log,
        outcome_text: outcome.text.clone(),
        breakdown,
        roll: check.natural,
        success,
        combat_started,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, HUB_SCENE_ID};
    use cm_mechanics::{
        Alignment, ArcId, CampaignState, ClassName, Identity, Race, ScriptedRoller, Sex, StatKey,
        Stats,
    };

    fn hero() -> Character {
        Character::new(
            Identity {
                name: "Garrick of Regret".into(),
                sex: Sex::Male,
                race: Race::Dwarf,
                class: ClassName::Fighter,
                alignment: Alignment::Neutral,
            },
            Stats::default().with(StatKey::Wis, 14).with(StatKey::Cha, 14),
            CampaignState::new(ArcId::Treasure),
        )
    }

    fn resolve(
        c: &Character,
        scene: &Scene,
        pending: &PendingRoll,
        roll: Option<u32>,
    ) -> CampaignResult<Resolution> {
        let cfg = EngineConfig::default();
        resolve_roll(c, scene, pending, roll, &cfg, &mut ScriptedRoller::new([]))
    }

    fn hub() -> Scene {
        Catalog::builtin().scene(HUB_SCENE_ID).unwrap().clone()
    }

    #[test]
    fn begin_check_copies_stat_and_dc() {
        let pending = begin_check(&hub(), "suspicious").unwrap();
        assert_eq!(pending.scene_id, HUB_SCENE_ID);
        assert_eq!(pending.stat, StatKey::Wis);
        assert_eq!(pending.dc, 13);
        assert!(matches!(
            begin_check(&hub(), "dance"),
            Err(CampaignError::UnknownChoice { .. })
        ));
    }

    #[test]
    fn success_applies_outcome_and_advances_time() {
        let scene = hub();
        let pending = begin_check(&scene, "suspicious").unwrap();
        let r = resolve(&hero(), &scene, &pending, Some(11)).unwrap();
        assert!(r.success);
        assert_eq!(r.roll, 11);
        assert_eq!(r.breakdown, "d20 11 + WIS +2 = 13 vs DC 13");
        assert_eq!(r.character.day, 2);
        assert_eq!(r.character.xp(), 5);
        assert_eq!(r.character.campaign.progress(), 8);
        assert!(!r.combat_started);
        assert_eq!(r.log[0].text, r.outcome_text);
    }

    #[test]
    fn natural_one_always_fails() {
        let scene = hub();
        let pending = begin_check(&scene, "rumors").unwrap();
        let mut c = hero();
        c.stats.set(StatKey::Cha, 18);
        let r = resolve(&c, &scene, &pending, Some(1)).unwrap();
        assert!(!r.success);
        assert_eq!(r.character.gold, 10);
    }

    #[test]
    fn supplied_roll_is_clamped() {
        let scene = hub();
        let pending = begin_check(&scene, "rumors").unwrap();
        let r = resolve(&hero(), &scene, &pending, Some(40)).unwrap();
        assert_eq!(r.roll, 20);
        assert!(r.success);
    }

    #[test]
    fn combat_trigger_hands_off_a_fight() {
        let scene = hub();
        let pending = begin_check(&scene, "suspicious").unwrap();
        let c = hero();
        let r = resolve(&c, &scene, &pending, Some(2)).unwrap();
        assert!(!r.success);
        assert!(r.combat_started);
        assert_eq!(r.character.hp.current(), c.hp.current());
        let combat = r.character.pending_combat.as_ref().unwrap();
        assert_eq!(combat.enemy.name, "Tavern Thug");
        assert!(r.log.iter().any(|e| e.text == "Combat triggered: Tavern brawl"));
    }

    #[test]
    fn hp_lost_to_a_triggered_outcome_is_restored() {
        use crate::effect::{CombatTrigger, Outcome};
        use crate::scene::{SceneCategory, SceneChoice};
        use cm_mechanics::{CombatEnding, EnemyKind};

        let trigger = CombatTrigger::new(
            EnemyKind::Thug,
            CombatEnding::new("won"),
            CombatEnding::new("lost"),
            CombatEnding::new("fled"),
        );
        let scene = Scene::new("alley.ambush", SceneCategory::Street, "Ambush", "Dark.")
            .choice(SceneChoice::new(
                "walk",
                "Walk on",
                StatKey::Dex,
                30,
                Outcome::new("Fine."),
                Outcome::new("A thug hits you. -4 HP.")
                    .hp(-4)
                    .gold(-1)
                    .fight(trigger),
            ));
        let pending = begin_check(&scene, "walk").unwrap();
        let c = hero();
        let r = resolve(&c, &scene, &pending, Some(5)).unwrap();
        assert!(!r.success);
        assert!(r.combat_started);
        assert_eq!(r.character.hp.current(), c.hp.current());
        assert_eq!(r.character.gold, c.gold - 1);
        let combat = r.character.pending_combat.as_ref().unwrap();
        assert_eq!(combat.enemy.name, "Tavern Thug");
    }

    #[test]
    fn untriggered_hp_loss_sticks() {
        use crate::effect::Outcome;
        use crate::scene::{SceneCategory, SceneChoice};

        let scene = Scene::new("ford.cold", SceneCategory::Road, "Ford", "Cold.").choice(
            SceneChoice::new(
                "wade",
                "Wade",
                StatKey::Con,
                30,
                Outcome::new("Fine."),
                Outcome::new("You slip into freezing water. -4 HP.").hp(-4),
            ),
        );
        let pending = begin_check(&scene, "wade").unwrap();
        let c = hero();
        let r = resolve(&c, &scene, &pending, Some(5)).unwrap();
        assert!(!r.combat_started);
        assert!(r.character.pending_combat.is_none());
        assert_eq!(r.character.hp.current(), c.hp.current() - 4);
    }

    #[test]
    fn pending_roll_for_another_scene_is_rejected() {
        let catalog = Catalog::builtin();
        let other = catalog.scene("court.day").unwrap();
        let pending = begin_check(&hub(), "flirt").unwrap();
        let err = resolve(&hero(), other, &pending, Some(10)).unwrap_err();
        assert!(matches!(err, CampaignError::SceneMismatch { .. }));
    }

    #[test]
    fn leveling_runs_last() {
        let scene = hub();
        let pending = begin_check(&scene, "suspicious").unwrap();
        let mut c = hero();
        c.add_xp(298);
        let r = resolve(&c, &scene, &pending, Some(15)).unwrap();
        assert_eq!(r.character.level(), 2);
        assert!(r.log.iter().any(|e| e.text == "Level up! You are now level 2."));
    }
}

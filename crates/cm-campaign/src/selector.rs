//! Picks the next scene for a turn.
//!
//! Priority: a queued follow-up, then the arc finale once act 3 is nearly
//! done, then a weighted draw from the act pool that skips scenes already
//! seen in this arc, then a synthesized filler scene.

use tracing::debug;

use cm_mechanics::{Character, DieRoller, StatKey};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::effect::Outcome;
use crate::error::{CampaignError, CampaignResult};
use crate::scene::{Scene, SceneCategory, SceneChoice};

/// Progress at which act 3 jumps straight to the finale.
pub const FINALE_PROGRESS: u32 = 85;

const FILLER_MOODS: [&str; 5] = [
    "A long road and longer thoughts.",
    "You make camp and listen to the world breathing.",
    "A small detour becomes a lesson in humility.",
    "You follow a rumor that turns into… mostly walking.",
    "The day is quiet. That makes you nervous.",
];

/// Weighted draw over explicit `(item, weight)` pairs.
///
/// Draws `r` in `[1, total]` and walks the cumulative weights; the last
/// candidate absorbs any remainder. Returns `None` for an empty list.
pub fn weighted_pick<T: Copy>(items: &[(T, u32)], roller: &mut dyn DieRoller) -> Option<T> {
    let (last, _) = *items.last()?;
    let total: u32 = items.iter().map(|(_, w)| *w).sum();
    if total == 0 {
        return Some(last);
    }
    let mut remaining = roller.roll(total).clamp(1, total);
    for (item, weight) in items {
        if remaining <= *weight {
            return Some(*item);
        }
        remaining -= weight;
    }
    Some(last)
}

/// Choose the scene for the next turn and record it as seen.
pub fn next_turn_scene(
    character: &Character,
    catalog: &Catalog,
    config: &EngineConfig,
    roller: &mut dyn DieRoller,
) -> CampaignResult<(Character, Scene)> {
    let mut next = character.clone();
    let arc_id = next.campaign.arc();
    let content = catalog
        .arc(arc_id)
        .ok_or_else(|| CampaignError::InvalidContent(format!("no content for arc '{arc_id}'")))?;

    let scene = if let Some(id) = next.next_scene_id.take() {
        debug!(scene = %id, "forced follow-up");
        catalog.scene_or_hub(&id)?.clone()
    } else if next.campaign.act() == 3 && next.campaign.progress() >= FINALE_PROGRESS {
        debug!(scene = %content.finale, "finale");
        catalog.scene_or_hub(&content.finale)?.clone()
    } else {
        let candidates: Vec<(&str, u32)> = content
            .pool(next.campaign.act())
            .iter()
            .filter(|e| e.is_open(&next.campaign))
            .filter(|e| !next.campaign.has_seen(&e.scene_id))
            .map(|e| (e.scene_id.as_str(), e.weight))
            .collect();
        match weighted_pick(&candidates, roller) {
            Some(id) => {
                debug!(scene = %id, candidates = candidates.len(), "pool pick");
                catalog.scene_or_hub(id)?.clone()
            }
            None => {
                let filler = filler_scene(&next, &content.title, roller);
                debug!(scene = %filler.id, "pool exhausted; filler");
                filler
            }
        }
    };

    next.mark_scene_seen(&scene.id, config.recent_window);
    Ok((next, scene))
}

/// A uniquely keyed travel scene for when the act pool is exhausted.
pub fn filler_scene(character: &Character, arc_title: &str, roller: &mut dyn DieRoller) -> Scene {
    let campaign = &character.campaign;
    let base = format!(
        "filler.{}.day{}.act{}",
        campaign.arc(),
        character.day,
        campaign.act()
    );
    let mut id = base.clone();
    let mut suffix = 2;
    while campaign.has_seen(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }

    let mood = FILLER_MOODS[pick_index(roller, FILLER_MOODS.len())];
    let stat_a = StatKey::ALL[pick_index(roller, StatKey::ALL.len())];
    let stat_b = StatKey::ALL[pick_index(roller, StatKey::ALL.len())];
    let dc_a = 9 + roller.roll(6).clamp(1, 6) as i32;
    let dc_b = 9 + roller.roll(6).clamp(1, 6) as i32;

    Scene::new(
        &id,
        SceneCategory::Travel,
        arc_title,
        &format!("{mood}\n\n(You feel the campaign tightening around you.)"),
    )
    .choice(SceneChoice::new(
        "push_on",
        "Push onward",
        stat_a,
        dc_a,
        Outcome::new("You make good time. Your confidence grows legs. +2 XP.").xp(2),
        Outcome::new("You trip over a root that was clearly placed by fate. -1 HP.").hp(-1),
    ))
    .choice(SceneChoice::new(
        "scavenge",
        "Scavenge for supplies",
        stat_b,
        dc_b,
        Outcome::new("You find something valuable and mostly legal. +2 gold.").gold(2),
        Outcome::new("You find nothing, but you do gain character. +1 XP.").xp(1),
    ))
}

fn pick_index(roller: &mut dyn DieRoller, len: usize) -> usize {
    (roller.roll(len as u32) as usize).clamp(1, len) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HUB_SCENE_ID;
    use cm_mechanics::{
        Alignment, ArcId, CampaignState, ClassName, Identity, Race, ScriptedRoller, Sex, Stats,
    };

    fn hero(arc: ArcId) -> Character {
        Character::new(
            Identity {
                name: "Vera Half-Plan".into(),
                sex: Sex::Female,
                race: Race::Halfling,
                class: ClassName::Rogue,
                alignment: Alignment::Neutral,
            },
            Stats::default(),
            CampaignState::new(arc),
        )
    }

    #[test]
    fn weighted_pick_walks_cumulative_weights() {
        let entries = [("a", 5), ("b", 2), ("c", 1)];
        let pick = |r: u32| weighted_pick(&entries, &mut ScriptedRoller::new([r])).unwrap();
        assert_eq!(pick(1), "a");
        assert_eq!(pick(5), "a");
        assert_eq!(pick(6), "b");
        assert_eq!(pick(7), "b");
        assert_eq!(pick(8), "c");
        let empty: [(&str, u32); 0] = [];
        assert!(weighted_pick(&empty, &mut ScriptedRoller::new([1])).is_none());
    }

    #[test]
    fn forced_scene_is_consumed() {
        let catalog = Catalog::builtin();
        let mut c = hero(ArcId::Taxman);
        c.next_scene_id = Some("court.day".into());
        let (next, scene) =
            next_turn_scene(&c, &catalog, &EngineConfig::default(), &mut ScriptedRoller::new([]))
                .unwrap();
        assert_eq!(scene.id, "court.day");
        assert!(next.next_scene_id.is_none());
        assert_eq!(next.last_scene_id.as_deref(), Some("court.day"));
        assert!(next.campaign.has_seen("court.day"));
    }

    #[test]
    fn unknown_forced_scene_falls_back_to_hub() {
        let catalog = Catalog::builtin();
        let mut c = hero(ArcId::Taxman);
        c.next_scene_id = Some("nowhere.at_all".into());
        let (_, scene) =
            next_turn_scene(&c, &catalog, &EngineConfig::default(), &mut ScriptedRoller::new([]))
                .unwrap();
        assert_eq!(scene.id, HUB_SCENE_ID);
    }

    #[test]
    fn finale_is_forced_late_in_act_three() {
        let catalog = Catalog::builtin();
        let mut c = hero(ArcId::Treasure);
        c.campaign.advance(90);
        let (_, scene) =
            next_turn_scene(&c, &catalog, &EngineConfig::default(), &mut ScriptedRoller::new([]))
                .unwrap();
        assert_eq!(scene.id, "vault.final_lock");
    }

    #[test]
    fn pool_never_repeats_and_then_fills() {
        let catalog = Catalog::builtin();
        let config = EngineConfig::default();
        let mut c = hero(ArcId::Taxman);
        let mut roller = ScriptedRoller::new([]);
        let mut ids = Vec::new();
        for _ in 0..5 {
            let (next, scene) = next_turn_scene(&c, &catalog, &config, &mut roller).unwrap();
            ids.push(scene.id);
            c = next;
        }
        assert!(ids[..3].contains(&"tavern.taxman".to_string()));
        assert!(ids[..3].contains(&"street.paperwork".to_string()));
        assert!(ids[..3].contains(&HUB_SCENE_ID.to_string()));
        assert_eq!(ids[3], "filler.taxman.day1.act1");
        assert_eq!(ids[4], "filler.taxman.day1.act1-2");
        assert_eq!(c.recent_scene_ids.len(), 5);
    }

    #[test]
    fn gated_followup_is_skipped_once_done() {
        let catalog = Catalog::builtin();
        let mut c = hero(ArcId::Mimic);
        c.campaign.advance(40);
        c.campaign.set_flag("mimic_met", true);
        c.campaign.set_flag("mimic_sent_away", true);
        c.campaign.mark_seen("dungeon.mimic_intro");
        c.campaign.mark_seen(HUB_SCENE_ID);
        let (_, scene) =
            next_turn_scene(&c, &catalog, &EngineConfig::default(), &mut ScriptedRoller::new([]))
                .unwrap();
        assert!(scene.id.starts_with("filler.mimic.day1.act2"));
    }

    #[test]
    fn filler_scene_shape() {
        let c = hero(ArcId::Vengeance);
        let scene = filler_scene(&c, "Black Letter", &mut ScriptedRoller::new([2, 1, 6, 1, 6]));
        assert_eq!(scene.category, SceneCategory::Travel);
        assert_eq!(scene.title, "Black Letter");
        assert!(scene.body.starts_with("You make camp"));
        assert!(scene.body.ends_with("(You feel the campaign tightening around you.)"));
        assert_eq!(scene.choices[0].stat, StatKey::Str);
        assert_eq!(scene.choices[1].stat, StatKey::Cha);
        assert_eq!(scene.choices[0].dc, 10);
        assert_eq!(scene.choices[1].dc, 15);
    }
}

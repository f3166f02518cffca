use cm_mechanics::StatKey::{Cha, Dex, Int, Str, Wis};

use super::arc;
use crate::catalog::{ArcContent, HUB_SCENE_ID, PoolEntry};
use crate::effect::Outcome;
use crate::scene::{Scene, SceneCategory, SceneChoice};

pub(super) fn content() -> ArcContent {
    arc(
        "Chest With Feelings",
        "A mimic has chosen you. That is not a compliment.",
        1,
        "camp.mimic_finale",
        [
            vec![
                PoolEntry::new("dungeon.mimic_intro", 5),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
            vec![
                PoolEntry::new("dungeon.mimic_intro", 3),
                PoolEntry::new("camp.mimic_followup", 2)
                    .requires("mimic_met")
                    .blocked_by("mimic_followup_done")
                    .blocked_by("mimic_sent_away"),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
            vec![
                PoolEntry::new("camp.mimic_finale", 6),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
        ],
    )
}

pub(super) fn scenes() -> Vec<Scene> {
    vec![intro(), followup(), finale()]
}

fn intro() -> Scene {
    Scene::new(
        "dungeon.mimic_intro",
        SceneCategory::Dungeon,
        "Chest With Feelings",
        "A treasure chest sits alone in the corridor. It sighs. You hate that it sighs.",
    )
    .choice(SceneChoice::new(
        "open",
        "Open it normally",
        Dex,
        13,
        Outcome::new(
            "You open it before it commits. Inside: coins and a tiny apology letter. +6 gold, +2 XP.",
        )
        .gold(6)
        .xp(2)
        .arc_flag("mimic_met")
        .advance(12)
        .then("camp.mimic_followup"),
        Outcome::new("It kisses your hand with teeth. You learn boundaries. -3 HP.")
            .hp(-3)
            .arc_flag("mimic_met")
            .advance(10)
            .then("camp.mimic_followup"),
    ))
    .choice(SceneChoice::new(
        "compliment",
        "Compliment it",
        Cha,
        14,
        Outcome::new("The chest blushes (somehow) and offers you a “gift.” +4 gold.")
            .gold(4)
            .then("camp.mimic_followup"),
        Outcome::new("You compliment the hinges. It is a sensitive topic. -1 HP (emotional).")
            .hp(-1)
            .then("camp.mimic_followup"),
    ))
    .choice(SceneChoice::new(
        "hit",
        "Hit it first",
        Str,
        12,
        Outcome::new("It yelps and retreats, leaving loot out of pure fear. +3 gold.")
            .gold(3)
            .then("camp.mimic_followup"),
        Outcome::new("You punch a wall. The chest watches. Your dignity dies quietly. -1 HP.")
            .hp(-1)
            .then("camp.mimic_followup"),
    ))
}

fn followup() -> Scene {
    Scene::new(
        "camp.mimic_followup",
        SceneCategory::Camp,
        "The Chest Returns",
        "That night, you hear scraping outside your tent. A small chest sits there like a stray cat with a violent hobby.",
    )
    .choice(SceneChoice::new(
        "adopt",
        "Adopt it",
        Wis,
        13,
        Outcome::new("You gain a weird companion: “Chesty.” You regret nothing. (Yet.) +3 XP.")
            .xp(3)
            .arc_flag("mimic_adopted")
            .arc_flag("mimic_followup_done")
            .advance(14),
        Outcome::new("It adopts you. You wake up briefly inside it. -2 HP, +2 XP.")
            .hp(-2)
            .xp(2)
            .arc_flag("mimic_adopted")
            .arc_flag("mimic_followup_done")
            .advance(12),
    ))
    .choice(SceneChoice::new(
        "boundaries",
        "Set boundaries",
        Cha,
        12,
        Outcome::new(
            "It agrees to bite only enemies and people who deserve it. You feel oddly proud. +2 XP.",
        )
        .xp(2)
        .arc_flag("mimic_boundaries")
        .arc_flag("mimic_followup_done")
        .advance(12),
        Outcome::new("It agrees loudly, then bites your boot to test the rules. -1 HP.")
            .hp(-1)
            .arc_flag("mimic_boundaries")
            .arc_flag("mimic_followup_done")
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "send",
        "Send it away",
        Cha,
        14,
        Outcome::new("It leaves you a single coin as closure. You feel… free? +1 gold.")
            .gold(1)
            .arc_flag("mimic_sent_away")
            .arc_flag("mimic_followup_done")
            .advance(12),
        Outcome::new(
            "It leaves anyway, but steals your socks. You are poorer in spirit. -1 gold.",
        )
        .gold(-1)
        .arc_flag("mimic_sent_away")
        .arc_flag("mimic_followup_done")
        .advance(10),
    ))
}

fn finale() -> Scene {
    Scene::new(
        "camp.mimic_finale",
        SceneCategory::Camp,
        "Chesty’s Ultimatum",
        "At midnight, the chest opens itself politely. Inside is a tiny velvet collar… and a contract written in drool. Chesty wants a role in the party. You suspect this ends with a bite either way.",
    )
    .choice(SceneChoice::new(
        "party",
        "Make it official: Chesty joins the party",
        Cha,
        14,
        Outcome::new(
            "You give a stirring speech about found family and acceptable biting. Chesty clicks happily. You have a new party member. +6 XP.",
        )
        .xp(6)
        .companion("comp_chesty", "Chesty", 65)
        .arc_flag("mimic_party")
        .advance(20)
        .log("New companion acquired: Chesty")
        .log("Relationship unlocked: Chesty"),
        Outcome::new(
            "Your speech is bad. Chesty joins anyway. It bites your hand like a signature. -2 HP, +4 XP.",
        )
        .hp(-2)
        .xp(4)
        .companion("comp_chesty", "Chesty", 55)
        .arc_flag("mimic_party")
        .advance(16)
        .log("New companion acquired: Chesty")
        .log("Relationship unlocked: Chesty"),
    ))
    .choice(SceneChoice::new(
        "banish",
        "Banish it (gently, with snacks)",
        Wis,
        13,
        Outcome::new(
            "You set boundaries so firm they briefly become law. Chesty leaves you three coins as closure. You feel victorious and slightly lonely. +3 gold, +3 XP.",
        )
        .gold(3)
        .xp(3)
        .arc_flag("mimic_banished")
        .advance(18),
        Outcome::new(
            "Chesty refuses, steals two coins, and disappears into the night like a tiny wooden menace. -2 gold.",
        )
        .gold(-2)
        .arc_flag("mimic_banished")
        .advance(14),
    ))
    .choice(SceneChoice::new(
        "weaponize",
        "Weaponize it (morally questionable, strategically correct)",
        Int,
        15,
        Outcome::new(
            "You invent “consensual ambush tactics.” Chesty purrs like a trap. You gain a reputation and some loot. +2 gold, +5 XP.",
        )
        .xp(5)
        .gold(2)
        .arc_flag("mimic_weapon")
        .advance(18),
        Outcome::new(
            "Chesty weaponizes you. You wake up inside it for three minutes and come out humbled. -3 HP.",
        )
        .hp(-3)
        .arc_flag("mimic_weapon")
        .advance(14),
    ))
}

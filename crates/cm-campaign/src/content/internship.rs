use cm_mechanics::StatKey::{Cha, Con, Dex, Int, Wis};

use super::arc;
use crate::catalog::{ArcContent, HUB_SCENE_ID, PoolEntry};
use crate::effect::Outcome;
use crate::scene::{Scene, SceneCategory, SceneChoice};

pub(super) fn content() -> ArcContent {
    arc(
        "Unpaid, Unholy Internship",
        "A wizard has offered you “experience.” You will pay in suffering.",
        2,
        "fallout.jar",
        [
            vec![
                PoolEntry::new("tower.internship", 5),
                PoolEntry::new("lab.safety", 2),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
            vec![
                PoolEntry::new("lab.safety", 5),
                PoolEntry::new("fallout.jar", 3),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
            vec![PoolEntry::new("fallout.jar", 6), PoolEntry::new(HUB_SCENE_ID, 1)],
        ],
    )
}

pub(super) fn scenes() -> Vec<Scene> {
    vec![tower(), lab_safety(), fallout()]
}

fn tower() -> Scene {
    Scene::new(
        "tower.internship",
        SceneCategory::Magic,
        "Unpaid, Unholy Internship",
        "A wizard offers you an internship. The pay is “experience” and a vague threat.",
    )
    .choice(SceneChoice::new(
        "accept",
        "Accept",
        Wis,
        12,
        Outcome::new("You accept and immediately regret it professionally. +2 XP.")
            .xp(2)
            .arc_flag("internship_signed")
            .advance(12)
            .then("lab.safety"),
        Outcome::new("You sign a contract written in smoke. You cough once. +1 XP.")
            .xp(1)
            .arc_flag("internship_signed")
            .advance(10)
            .then("lab.safety"),
    ))
    .choice(SceneChoice::new(
        "negotiate",
        "Negotiate pay",
        Cha,
        14,
        Outcome::new("You get a stipend and a helmet. The helmet is emotional support. +2 gold.")
            .gold(2)
            .arc_flag("internship_paid")
            .advance(14)
            .then("lab.safety"),
        Outcome::new("He laughs in several languages. You buy lunch anyway. -1 gold.")
            .gold(-1)
            .arc_flag("internship_signed")
            .advance(9)
            .then("lab.safety"),
    ))
    .choice(SceneChoice::new(
        "steal",
        "Steal his spellbook",
        Dex,
        16,
        Outcome::new(
            "You steal it and immediately don’t understand it. Knowledge is humiliating. +4 XP.",
        )
        .xp(4)
        .then("lab.safety"),
        Outcome::new("The spellbook “accidentally” whacks you. The wizard smiles. -2 HP.")
            .hp(-2)
            .then("lab.safety"),
    ))
}

fn lab_safety() -> Scene {
    Scene::new(
        "lab.safety",
        SceneCategory::Magic,
        "Safety Third",
        "The lab has three rules: don’t touch the glowing jar, don’t name it, don’t feed it. You already want to break all three.",
    )
    .choice(SceneChoice::new(
        "follow",
        "Follow the rules",
        Int,
        13,
        Outcome::new("You keep all your fingers. Rare achievement. +2 XP.")
            .xp(2)
            .then("fallout.jar"),
        Outcome::new("You misread “don’t name” as “do name.” It is now Gary. +1 XP.")
            .xp(1)
            .then("fallout.jar"),
    ))
    .choice(SceneChoice::new(
        "ask",
        "Ask what’s in the jar",
        Wis,
        12,
        Outcome::new("“Minor demon,” says the wizard. “Major attitude,” says the jar. +1 XP.")
            .xp(1)
            .then("fallout.jar"),
        Outcome::new("The wizard says “liability” and walks away. The jar laughs. +1 XP.")
            .xp(1)
            .then("fallout.jar"),
    ))
    .choice(SceneChoice::new(
        "feed",
        "Feed the jar",
        Con,
        14,
        Outcome::new("It purrs. You are disturbed but alive. +2 XP.")
            .xp(2)
            .then("fallout.jar"),
        Outcome::new("It bites through the jar. Something escapes with purpose. -3 HP.")
            .hp(-3)
            .then("fallout.jar"),
    ))
}

fn fallout() -> Scene {
    Scene::new(
        "fallout.jar",
        SceneCategory::Disaster,
        "Gary Wants Freedom",
        "Something escapes. The wizard blames you with the ease of a man who has never been wrong.",
    )
    .choice(SceneChoice::new(
        "sack",
        "Catch it with a sack",
        Dex,
        14,
        Outcome::new("You bag Gary. Gary is offended. The wizard is pleased. +1 gold, +3 XP.")
            .xp(3)
            .gold(1),
        Outcome::new("You bag yourself. The wizard writes notes. -2 HP.").hp(-2),
    ))
    .choice(SceneChoice::new(
        "blame",
        "Blame the wizard first",
        Cha,
        15,
        Outcome::new("The wizard is briefly speechless. You use the moment to leave. +3 XP.").xp(3),
        Outcome::new(
            "He writes your name in a book titled “Later.” You feel a future headache. -1 HP.",
        )
        .hp(-1),
    ))
    .choice(SceneChoice::new(
        "deal",
        "Make a deal with Gary",
        Cha,
        13,
        Outcome::new(
            "Gary agrees to haunt your enemies instead. You feel supported in a toxic way. +2 XP.",
        )
        .xp(2),
        Outcome::new("Gary agrees to haunt you, specifically. You feel noticed. -1 HP.").hp(-1),
    ))
}

use cm_mechanics::StatKey::{Cha, Wis};
use cm_mechanics::{CombatEnding, EnemyKind};

use crate::catalog::HUB_SCENE_ID;
use crate::effect::{CombatTrigger, Outcome};
use crate::scene::{Scene, SceneCategory, SceneChoice};

pub(super) fn dripping_goblet() -> Scene {
    let brawl = CombatTrigger::new(
        EnemyKind::Thug,
        CombatEnding::new(
            "The thug collapses and the tavern pretends it didn’t see. You keep your pride.",
        )
        .log("Combat won: Tavern brawl"),
        CombatEnding::new("You go down hard. Someone steps on your hand “by accident.”")
            .log("Combat lost: Tavern brawl"),
        CombatEnding::new("You slip out into the night with your dignity mostly intact.")
            .log("Fled: Tavern brawl"),
    );

    Scene::new(
        HUB_SCENE_ID,
        SceneCategory::Tavern,
        "The Dripping Goblet",
        "The air smells like stew and bad decisions. Someone is eying you suspiciously.",
    )
    .choice(SceneChoice::new(
        "rumors",
        "Ask the barkeep for rumors",
        Cha,
        12,
        Outcome::new(
            "The barkeep leans in and shares a rumor about a map that leads to a lantern-lit vault in the Black Road ruins. +4 XP.",
        )
        .xp(4)
        .arc_flag("heard_rumor")
        .advance(10)
        .log("Quest hook: The Map That Shouldn’t Exist"),
        Outcome::new(
            "The barkeep charges you for “information” and gives you a weather report. -2 gold.",
        )
        .gold(-2),
    ))
    .choice(SceneChoice::new(
        "suspicious",
        "Approach the suspicious stranger",
        Wis,
        13,
        Outcome::new(
            "You defuse the tension with alarming competence. The stranger offers a lead. +5 XP.",
        )
        .xp(5),
        Outcome::new(
            "You say the wrong thing. The stranger stands. Chairs scrape. Someone reaches for a bottle.",
        )
        .log("Combat triggered: Tavern brawl")
        .fight(brawl),
    ))
    .choice(SceneChoice::new(
        "flirt",
        "Flirt with the barmaid",
        Cha,
        14,
        Outcome::new("It works. You receive a free drink and a dangerous smile. +3 gold.").gold(3),
        Outcome::new("It does not work. You learn something about rejection. +1 XP.").xp(1),
    ))
}

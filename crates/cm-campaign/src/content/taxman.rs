use cm_mechanics::StatKey::{Cha, Con, Dex, Int, Wis};

use super::arc;
use crate::catalog::{ArcContent, HUB_SCENE_ID, PoolEntry};
use crate::effect::Outcome;
use crate::scene::{Scene, SceneCategory, SceneChoice};

pub(super) fn content() -> ArcContent {
    arc(
        "The Crown vs. Your Vibes",
        "An auditor has taken an unholy interest in your finances.",
        2,
        "court.day",
        [
            vec![
                PoolEntry::new("tavern.taxman", 5),
                PoolEntry::new("street.paperwork", 2),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
            vec![
                PoolEntry::new("street.paperwork", 5),
                PoolEntry::new("court.day", 3),
                PoolEntry::new(HUB_SCENE_ID, 1),
            ],
            vec![PoolEntry::new("court.day", 6), PoolEntry::new(HUB_SCENE_ID, 1)],
        ],
    )
}

pub(super) fn scenes() -> Vec<Scene> {
    vec![ledger(), paperwork(), court_day()]
}

fn ledger() -> Scene {
    Scene::new(
        "tavern.taxman",
        SceneCategory::Tavern,
        "A Man With A Ledger",
        "A well-dressed stranger slides onto the bench like he’s been waiting for your financial mistakes. He introduces himself as a “volunteer auditor” for the Crown.",
    )
    .choice(SceneChoice::new(
        "confess",
        "Confess everything",
        Wis,
        12,
        Outcome::new("You confess only plausible crimes. He nods like a man enjoying a list. +3 XP.")
            .xp(3)
            .arc_flag("taxman_met")
            .advance(12)
            .then("street.paperwork"),
        Outcome::new(
            "You accidentally invent a felony mid-sentence. He writes it down. -2 gold, +1 XP.",
        )
        .gold(-2)
        .xp(1)
        .arc_flag("taxman_met")
        .advance(10)
        .then("street.paperwork"),
    ))
    .choice(SceneChoice::new(
        "bribe",
        "Bribe him with sincerity",
        Cha,
        14,
        Outcome::new(
            "He takes your coin and your handshake. You are now “friends,” which is somehow worse. -3 gold.",
        )
        .gold(-3)
        .arc_flag("taxman_bribed")
        .advance(14)
        .then("street.paperwork"),
        Outcome::new("He takes your coin as “evidence.” You feel sponsored by anxiety. -5 gold.")
            .gold(-5)
            .arc_flag("taxman_bribed")
            .advance(12)
            .then("street.paperwork"),
    ))
    .choice(SceneChoice::new(
        "between",
        "Explain you’re “between incomes”",
        Cha,
        13,
        Outcome::new(
            "You spin a tragic backstory involving a cursed wallet. His eyes glisten. +2 XP.",
        )
        .xp(2)
        .arc_flag("taxman_met")
        .advance(11)
        .then("street.paperwork"),
        Outcome::new("He asks for references. You cite a barstool. It does not help. +1 XP.")
            .xp(1)
            .arc_flag("taxman_met")
            .advance(9)
            .then("street.paperwork"),
    ))
}

fn paperwork() -> Scene {
    Scene::new(
        "street.paperwork",
        SceneCategory::Street,
        "Forms: The True Dungeon",
        "Paperwork thick enough to stop an arrow is placed in your hands. The auditor watches you like a hawk watching a mouse learn cursive.",
    )
    .choice(SceneChoice::new(
        "forge",
        "Forge it",
        Dex,
        15,
        Outcome::new(
            "Your handwriting becomes a weapon. The forms look… legally alive. +6 gold, +3 XP.",
        )
        .gold(6)
        .xp(3)
        .advance(14)
        .then("court.day"),
        Outcome::new("You spell your own name wrong. The paper judges you. -4 gold.")
            .gold(-4)
            .advance(10)
            .then("court.day"),
    ))
    .choice(SceneChoice::new(
        "read",
        "Actually read it",
        Int,
        14,
        Outcome::new(
            "You find a loophole: “Adventuring expenses” are deductible. Your soul relaxes. +4 gold, +2 XP.",
        )
        .gold(4)
        .xp(2)
        .advance(12)
        .then("court.day"),
        Outcome::new("The words swim. One paragraph bites you. -1 HP.")
            .hp(-1)
            .advance(9)
            .then("court.day"),
    ))
    .choice(SceneChoice::new(
        "eat",
        "Eat the paper",
        Con,
        13,
        Outcome::new(
            "You finish the stack. The auditor is horrified. You are technically “done.” +3 XP.",
        )
        .xp(3)
        .then("court.day"),
        Outcome::new("You gag on bureaucracy. The ink tastes like regret. -2 HP.")
            .hp(-2)
            .then("court.day"),
    ))
}

fn court_day() -> Scene {
    Scene::new(
        "court.day",
        SceneCategory::Court,
        "The Crown vs. Your Vibes",
        "The judge looks like a disappointed statue. The prosecutor looks like he moisturizes with grudges.",
    )
    .choice(SceneChoice::new(
        "represent",
        "Represent yourself",
        Cha,
        15,
        Outcome::new(
            "You give a speech about destiny, freedom, and how taxes are basically a curse. The courtroom claps reluctantly. +3 gold, +4 XP.",
        )
        .xp(4)
        .gold(3),
        Outcome::new("You object to yourself. The judge allows it. You lose on principle. -6 gold.")
            .gold(-6),
    ))
    .choice(SceneChoice::new(
        "witness",
        "Call the auditor as a character witness",
        Wis,
        14,
        Outcome::new(
            "The auditor calls you “a mess, but an honest mess.” Case dismissed on vibes. +2 gold, +2 XP.",
        )
        .gold(2)
        .xp(2),
        Outcome::new("He testifies you offered him “sincerity.” The courtroom gasps. -8 gold.")
            .gold(-8),
    ))
    .choice(SceneChoice::new(
        "oops",
        "Plead “Oops.”",
        Cha,
        12,
        Outcome::new(
            "The judge respects humility. You get community service: dungeon latrines. You feel spiritually cleaner. +2 XP.",
        )
        .xp(2),
        Outcome::new(
            "The prosecutor respects nothing. The fine respects you even less. -4 gold, -1 HP.",
        )
        .hp(-1)
        .gold(-4),
    ))
}

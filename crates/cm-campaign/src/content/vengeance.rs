use cm_mechanics::StatKey::{Cha, Con, Dex, Int, Str, Wis};
use cm_mechanics::{CombatEnding, EnemyKind};

use super::arc;
use crate::catalog::{ArcContent, PoolEntry};
use crate::effect::{CombatTrigger, Outcome};
use crate::scene::{Scene, SceneCategory, SceneChoice};

const ARC_COMPLETE: &str = "Arc complete: Black Letter";

pub(super) fn content() -> ArcContent {
    arc(
        "Black Letter",
        "A letter brings bad news. Your grief becomes a direction.",
        3,
        "manor.confrontation",
        [
            vec![
                PoolEntry::new("letter.black_seal", 4),
                PoolEntry::new("village.funeral", 2),
                PoolEntry::new("road.witness", 2),
            ],
            vec![
                PoolEntry::new("road.witness", 2),
                PoolEntry::new("road.hired_blade", 3),
                PoolEntry::new("manor.closed_doors", 3),
            ],
            vec![
                PoolEntry::new("manor.confrontation", 4),
                PoolEntry::new("manor.aftermath", 2),
            ],
        ],
    )
}

pub(super) fn scenes() -> Vec<Scene> {
    vec![
        black_seal(),
        funeral(),
        witness(),
        hired_blade(),
        closed_doors(),
        confrontation(),
        aftermath(),
    ]
}

fn black_seal() -> Scene {
    Scene::new(
        "letter.black_seal",
        SceneCategory::Letter,
        "A Black Seal",
        "A courier finds you by name. He won’t meet your eyes. The letter is sealed in black wax. Your sister’s name is written in the corner in a hand you don’t recognize.",
    )
    .choice(SceneChoice::new(
        "open",
        "Open it",
        Con,
        12,
        Outcome::new(
            "The words cut clean: she’s dead. A place is named. A man is blamed. Your grief becomes direction. +2 XP.",
        )
        .xp(2)
        .arc_flag("sister_dead")
        .advance(14)
        .log("Quest hook: Vengeance"),
        Outcome::new(
            "Your hands shake. You smear ink like blood. The message remains. -1 HP (shock).",
        )
        .hp(-1)
        .arc_flag("sister_dead")
        .advance(12),
    ))
    .choice(SceneChoice::new(
        "ask",
        "Question the courier",
        Wis,
        13,
        Outcome::new(
            "He admits the sender paid extra to rush it, and paid extra to stay anonymous. +3 XP.",
        )
        .xp(3)
        .advance(12)
        .log("Clue gained: sender anonymous (paid extra)"),
        Outcome::new(
            "He says only, “I just deliver.” His fear answers more than his words. +1 XP.",
        )
        .xp(1)
        .advance(10),
    ))
    .choice(SceneChoice::new(
        "burn",
        "Burn the letter",
        Wis,
        14,
        Outcome::new(
            "You burn it and swear you don’t need paper to remember. The ashes don’t help. +2 XP.",
        )
        .xp(2)
        .advance(10),
        Outcome::new(
            "It won’t catch. The wax blackens and refuses. You take it as a sign. +1 XP.",
        )
        .xp(1)
        .advance(10),
    ))
}

fn funeral() -> Scene {
    Scene::new(
        "village.funeral",
        SceneCategory::Village,
        "The Funeral",
        "They’ve buried her, but the earth still looks raw. People speak softly around you like you might break. Someone watches from the edge of the crowd and leaves when you look back.",
    )
    .choice(SceneChoice::new(
        "ask",
        "Ask who left",
        Cha,
        13,
        Outcome::new("A widow says he was a hired man, not local. “He didn’t cry.” +3 XP.")
            .xp(3)
            .advance(12)
            .log("Clue gained: hired man at funeral"),
        Outcome::new("No one wants to talk. Fear has swallowed the village. +1 XP.")
            .xp(1)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "kneel",
        "Kneel at the grave",
        Wis,
        12,
        Outcome::new("You promise vengeance out loud. The wind answers like it heard you. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new("You can’t find words. The silence becomes your oath. +1 XP.")
            .xp(1)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "leave",
        "Leave before you fall apart",
        Con,
        12,
        Outcome::new("You walk away with your spine intact. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new("Your legs nearly give out. You catch yourself on the headstone. -1 HP.")
            .hp(-1)
            .advance(10),
    ))
}

fn witness() -> Scene {
    let scuffle = CombatTrigger::new(
        EnemyKind::Thug,
        CombatEnding::new("He sits back down in the ditch and tells you everything, between gasps.")
            .log("Combat won: Desperate witness")
            .log("Clue gained: manor on the hill"),
        CombatEnding::new("He takes your purse and runs. Fear makes people strong.")
            .log("Combat lost: Desperate witness"),
        CombatEnding::new("You back off. He keeps the rock and his secrets.")
            .log("Fled: Desperate witness"),
    );

    Scene::new(
        "road.witness",
        SceneCategory::Road,
        "A Witness With Loose Teeth",
        "You find a man in a roadside ditch with a split lip and a ruined coat. He flinches when you say your sister’s name.",
    )
    .choice(SceneChoice::new(
        "help",
        "Help him up",
        Wis,
        12,
        Outcome::new(
            "He tells you the name of the man who hired the killers, and where to find him. +3 XP.",
        )
        .xp(3)
        .advance(12)
        .log("Clue gained: “House Merrow”"),
        Outcome::new("He’s too scared to say much. But fear points in a direction. +1 XP.")
            .xp(1)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "threaten",
        "Threaten him",
        Str,
        13,
        Outcome::new("He talks fast. He talks ugly. He talks true. +2 XP.")
            .xp(2)
            .advance(10)
            .log("Clue gained: manor on the hill"),
        Outcome::new("He panics and comes up out of the ditch swinging a rock.")
            .advance(10)
            .log("Combat triggered: Desperate witness")
            .fight(scuffle),
    ))
    .choice(SceneChoice::new(
        "leave",
        "Leave him",
        Wis,
        14,
        Outcome::new("You decide you don’t need him. You’re probably wrong. +1 XP.")
            .xp(1)
            .advance(10),
        Outcome::new("Your conscience follows you for a mile before it shuts up. +1 XP.")
            .xp(1)
            .advance(10),
    ))
}

fn hired_blade() -> Scene {
    let duel = CombatTrigger::new(
        EnemyKind::HiredBlade,
        CombatEnding::new("The rider drops his blade and his purse. You keep both.")
            .log("Combat won: Hired blade")
            .log("Item acquired: Bloodstained Signet (Merrow)"),
        CombatEnding::new("He leaves you in the mud with a message: “Go home.”")
            .log("Combat lost: Hired blade"),
        CombatEnding::new("You break off into the brush. He doesn’t follow. Yet.")
            .log("Fled: Hired blade"),
    );

    Scene::new(
        "road.hired_blade",
        SceneCategory::Road,
        "Hired Blade",
        "A rider blocks the road, cloak hiding his hands. “Turn around,” he says. “This isn’t your fight.” His tone says it absolutely is.",
    )
    .choice(SceneChoice::new(
        "talk",
        "Talk him down",
        Cha,
        14,
        Outcome::new(
            "He hesitates. For a moment you see the man under the job. He lets you pass. +4 XP.",
        )
        .xp(4)
        .advance(14),
        Outcome::new("He doesn’t hesitate. The cloak falls away from a drawn blade.")
            .advance(12)
            .log("Combat triggered: Hired blade")
            .fight(duel.clone()),
    ))
    .choice(SceneChoice::new(
        "fight",
        "Draw steel",
        Str,
        15,
        Outcome::new(
            "You win the exchange and take his coin purse. He rides away bleeding pride. +3 gold, +4 XP.",
        )
        .xp(4)
        .gold(3)
        .advance(14)
        .log("Item acquired: Bloodstained Signet (Merrow)"),
        Outcome::new("He’s better than you hoped. He dismounts and comes for you properly.")
            .advance(12)
            .log("Combat triggered: Hired blade")
            .fight(duel.clone()),
    ))
    .choice(SceneChoice::new(
        "sneak",
        "Slip past through the brush",
        Dex,
        13,
        Outcome::new(
            "You vanish off-road and reappear behind him. He swears. You keep walking. +3 XP.",
        )
        .xp(3)
        .advance(12),
        Outcome::new("Thorns grab you like hands. He hears you, and turns his horse.")
            .advance(10)
            .log("Combat triggered: Hired blade")
            .fight(duel),
    ))
}

fn closed_doors() -> Scene {
    Scene::new(
        "manor.closed_doors",
        SceneCategory::Manor,
        "Closed Doors",
        "The manor looms above the village like a judgment. The doors are shut. The windows are lit. Somewhere inside, someone is comfortable.",
    )
    .choice(SceneChoice::new(
        "front",
        "Knock at the front door",
        Cha,
        13,
        Outcome::new(
            "A servant answers and lies badly. You step inside before he can close the door. +3 XP.",
        )
        .xp(3)
        .advance(12),
        Outcome::new(
            "The servant says “no” like he’s practiced it. You get nothing but a closed door. +1 XP.",
        )
        .xp(1)
        .advance(10),
    ))
    .choice(SceneChoice::new(
        "climb",
        "Climb to a window",
        Dex,
        14,
        Outcome::new("You slip inside like a secret. The house smells of wax and money. +3 XP.")
            .xp(3)
            .advance(12),
        Outcome::new("A gutter gives. You fall hard. The manor remains unimpressed. -2 HP.")
            .hp(-2)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "bribe",
        "Bribe a guard",
        Wis,
        13,
        Outcome::new("He takes your gold and looks the other way. -4 gold, +2 XP.")
            .gold(-4)
            .xp(2)
            .advance(12),
        Outcome::new(
            "He takes your gold and calls you “brave.” Then he calls for help. -4 gold.",
        )
        .gold(-4)
        .advance(10),
    ))
}

fn confrontation() -> Scene {
    let guard = CombatTrigger::new(
        EnemyKind::HiredBlade,
        CombatEnding::new("His guard falls. He runs for the back stairs, and you know where they lead.")
            .log("Combat won: Merrow's guard"),
        CombatEnding::new("You wake in the road outside the gates. Someone has folded your hands.")
            .log("Combat lost: Merrow's guard"),
        CombatEnding::new("You go out a window. It is a long way down, and worth it.")
            .log("Fled: Merrow's guard"),
    );

    Scene::new(
        "manor.confrontation",
        SceneCategory::Manor,
        "The Confrontation",
        "You find him in a warm room with cold eyes. He’s older than you expected. He recognizes your face and doesn’t bother to hide it.",
    )
    .choice(SceneChoice::new(
        "kill",
        "Kill him",
        Str,
        15,
        Outcome::new(
            "Steel ends the conversation. It does not end the feeling. +10 gold, +8 XP.",
        )
        .xp(8)
        .gold(10)
        .advance(20)
        .log(ARC_COMPLETE),
        Outcome::new("He’s guarded. A man in Merrow colors steps between you with steel out.")
            .advance(14)
            .log("Combat triggered: Merrow's guard")
            .fight(guard),
    ))
    .choice(SceneChoice::new(
        "confess",
        "Make him confess",
        Cha,
        16,
        Outcome::new(
            "You corner him with words sharper than knives. He admits it. Out loud. In front of witnesses. +8 XP.",
        )
        .xp(8)
        .advance(20)
        .log(ARC_COMPLETE),
        Outcome::new(
            "He laughs. He has practiced being untouchable. You leave with your rage intact. +2 XP.",
        )
        .xp(2)
        .advance(12),
    ))
    .choice(SceneChoice::new(
        "burn",
        "Burn the manor",
        Int,
        15,
        Outcome::new(
            "Fire does what law won’t. You walk away while the world screams behind you. +5 gold, +6 XP.",
        )
        .xp(6)
        .gold(5)
        .advance(18)
        .log(ARC_COMPLETE),
        Outcome::new("The fire turns on you. Smoke fills your lungs. You escape barely. -3 HP.")
            .hp(-3)
            .advance(12),
    ))
}

fn aftermath() -> Scene {
    Scene::new(
        "manor.aftermath",
        SceneCategory::Aftermath,
        "Aftermath",
        "Morning arrives like nothing happened. The village is quieter. Your hands are still the same hands.",
    )
    .choice(SceneChoice::new(
        "stay",
        "Stay and face what you’ve done",
        Wis,
        13,
        Outcome::new(
            "You stay. You answer questions. You learn that vengeance doesn’t finish anything. +4 XP.",
        )
        .xp(4)
        .advance(12),
        Outcome::new("You try to stay, but your body refuses. You leave before dawn. +2 XP.")
            .xp(2)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "leave",
        "Leave",
        Con,
        10,
        Outcome::new("You leave. The road takes your tears and gives you distance. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new("You leave anyway. Some choices don’t require success. +1 XP.")
            .xp(1)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "pray",
        "Pray",
        Wis,
        14,
        Outcome::new(
            "You pray for her. You don’t know who’s listening. You feel a fraction lighter. +3 XP.",
        )
        .xp(3)
        .advance(10),
        Outcome::new("You try to pray. The words don’t come. The silence is honest. +1 XP.")
            .xp(1)
            .advance(10),
    ))
}

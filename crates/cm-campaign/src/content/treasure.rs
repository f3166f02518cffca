use cm_mechanics::StatKey::{Cha, Con, Dex, Int, Str, Wis};
use cm_mechanics::{CombatEnding, EnemyKind};

use super::arc;
use crate::catalog::{ArcContent, PoolEntry};
use crate::effect::{CombatTrigger, Outcome};
use crate::scene::{Scene, SceneCategory, SceneChoice};

const ARC_COMPLETE: &str = "Arc complete: The Map That Shouldn’t Exist";

pub(super) fn content() -> ArcContent {
    arc(
        "The Map That Shouldn’t Exist",
        "A map falls into your hands, and suddenly everyone wants you dead.",
        3,
        "vault.final_lock",
        [
            vec![
                PoolEntry::new("tavern.rumor_black_road", 4),
                PoolEntry::new("street.map_drop", 3),
                PoolEntry::new("road.first_blood", 2),
            ],
            vec![
                PoolEntry::new("road.rival_party", 3),
                PoolEntry::new("road.bridge_toll", 2),
                PoolEntry::new("ruins.stone_gate", 3),
                PoolEntry::new("road.first_blood", 1),
            ],
            vec![
                PoolEntry::new("vault.lantern_room", 3),
                PoolEntry::new("vault.final_lock", 3),
            ],
        ],
    )
}

pub(super) fn scenes() -> Vec<Scene> {
    vec![
        rumor(),
        map_drop(),
        first_blood(),
        bridge_toll(),
        rival_party(),
        stone_gate(),
        lantern_room(),
        final_lock(),
    ]
}

fn rumor() -> Scene {
    let veteran = CombatTrigger::new(
        EnemyKind::Thug,
        CombatEnding::new("The veteran sits back down, impressed despite himself, and finishes the rumor.")
            .log("Combat won: Road veteran")
            .log("Clue gained: route sketch (Black Road)"),
        CombatEnding::new("You wake up under the table. Your drink is gone. So is your dignity.")
            .log("Combat lost: Road veteran"),
        CombatEnding::new("You leave through the kitchen. The cook does not ask.")
            .log("Fled: Road veteran"),
    );

    Scene::new(
        "tavern.rumor_black_road",
        SceneCategory::Tavern,
        "A Rumor With Teeth",
        "A veteran with road-dust in his beard leans in. “If you’re going to be stupid,” he says, “be stupid in the Black Road ruins. There’s a lantern room down there that only opens for liars and the desperate.”",
    )
    .choice(SceneChoice::new(
        "buy_info",
        "Buy him another drink and get details",
        Cha,
        13,
        Outcome::new(
            "He sketches a crude route and a warning: “Don’t trust the first light you see.” -2 gold.",
        )
        .gold(-2)
        .arc_flag("treasure_rumor")
        .advance(14)
        .log("Clue gained: route sketch (Black Road)"),
        Outcome::new(
            "He takes your coin and forgets your face mid-sentence. You learn humility. -2 gold.",
        )
        .gold(-2)
        .advance(10),
    ))
    .choice(SceneChoice::new(
        "mock",
        "Mock the rumor (quietly)",
        Wis,
        12,
        Outcome::new(
            "You keep your skepticism inside your mouth. You leave with your teeth intact. +2 XP.",
        )
        .xp(2)
        .advance(10),
        Outcome::new("You laugh. He sets down his mug, very calmly, and stands up.")
            .advance(10)
            .log("Combat triggered: Road veteran")
            .fight(veteran),
    ))
    .choice(SceneChoice::new(
        "leave",
        "Leave now",
        Wis,
        10,
        Outcome::new("You decide to live another day. It feels… unfamiliar. +1 XP.")
            .xp(1)
            .advance(8),
        Outcome::new("You try to leave, but your curiosity follows you out the door. +1 XP.")
            .xp(1)
            .advance(8),
    ))
}

fn map_drop() -> Scene {
    let pursuer = CombatTrigger::new(
        EnemyKind::Thug,
        CombatEnding::new("The pursuer limps off. The map is still in the gutter, waiting for you.")
            .log("Combat won: Map pursuer")
            .log("Item acquired: Sealed Map (Black Wax)"),
        CombatEnding::new("He takes the map and leaves you the gutter.")
            .log("Combat lost: Map pursuer"),
        CombatEnding::new("You leave the map to him. Some treasures are other people's problems.")
            .log("Fled: Map pursuer"),
    );

    Scene::new(
        "street.map_drop",
        SceneCategory::Street,
        "The Dropped Map",
        "A man runs past you with panic in his eyes. Something falls from his cloak: a folded map sealed with black wax. He doesn’t look back.",
    )
    .choice(SceneChoice::new(
        "take",
        "Take the map",
        Dex,
        12,
        Outcome::new("Your hands move before your morals can speak. The wax is still warm.")
            .item("Sealed Map (Black Wax)")
            .arc_flag("map_acquired")
            .advance(14)
            .log("Item acquired: Sealed Map (Black Wax)"),
        Outcome::new("You fumble. A boot heel lands beside your fingers: someone else was chasing him.")
            .advance(10)
            .log("Combat triggered: Map pursuer")
            .fight(pursuer),
    ))
    .choice(SceneChoice::new(
        "return",
        "Chase him and return it",
        Con,
        14,
        Outcome::new(
            "You catch him. He thanks you like a man who expects to be dead soon. +3 XP.",
        )
        .xp(3)
        .advance(12)
        .log("Clue gained: “Don’t go to the vault.”"),
        Outcome::new("He vanishes into the crowd. You run until your lungs revolt. -2 HP.")
            .hp(-2)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "burn",
        "Burn it",
        Wis,
        13,
        Outcome::new(
            "You destroy it before it can destroy you. Smart choices feel disgusting. +2 XP.",
        )
        .xp(2)
        .advance(10),
        Outcome::new(
            "The wax won’t catch. The paper feels… treated. You decide to keep it anyway. +1 XP.",
        )
        .xp(1)
        .advance(10),
    ))
}

fn first_blood() -> Scene {
    let wolves = CombatTrigger::new(
        EnemyKind::Hound,
        CombatEnding::new("The hound limps off into the pines. The rest of the night is quiet.")
            .log("Combat won: Black Road hound"),
        CombatEnding::new("You wake at dawn, chewed on and alive. Barely.")
            .log("Combat lost: Black Road hound"),
        CombatEnding::new("You abandon camp and run until the howling fades.")
            .log("Fled: Black Road hound"),
    );

    Scene::new(
        "road.first_blood",
        SceneCategory::Road,
        "First Blood on the Black Road",
        "The road narrows into pine and shadow. You feel eyes on you: hungry, patient eyes.",
    )
    .choice(SceneChoice::new(
        "camp",
        "Make camp early",
        Wis,
        12,
        Outcome::new("You choose a defensible spot. The night passes without teeth. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new("You camp in a hollow like an idiot. Something with teeth walks in.")
            .advance(10)
            .log("Combat triggered: Black Road hound")
            .fight(wolves.clone()),
    ))
    .choice(SceneChoice::new(
        "press",
        "Press on through the dark",
        Con,
        13,
        Outcome::new("You keep moving. Fear becomes fuel. +3 XP.")
            .xp(3)
            .advance(12),
        Outcome::new("You stumble and swear loudly. The forest remembers, and something answers.")
            .advance(10)
            .log("Combat triggered: Black Road hound")
            .fight(wolves),
    ))
    .choice(SceneChoice::new(
        "trail",
        "Follow the tracks you “definitely” see",
        Int,
        14,
        Outcome::new("You find a dropped pouch before the tracks vanish. +2 gold.")
            .gold(2)
            .advance(10),
        Outcome::new(
            "You follow nothing for an hour. You learn the shape of embarrassment. +1 XP.",
        )
        .xp(1)
        .advance(10),
    ))
}

fn bridge_toll() -> Scene {
    let toll_guard = CombatTrigger::new(
        EnemyKind::Thug,
        CombatEnding::new("The guard decides the toll is waived today. For you. Specifically.")
            .log("Combat won: Bridge guard"),
        CombatEnding::new("You pay the toll in teeth and cross anyway.")
            .log("Combat lost: Bridge guard"),
        CombatEnding::new("You retreat and look for another way across.")
            .log("Fled: Bridge guard"),
    );

    Scene::new(
        "road.bridge_toll",
        SceneCategory::Road,
        "The Bridge Toll",
        "A narrow bridge spans a cold river. A guard in patchwork armor blocks the way with a spear and a bored expression.",
    )
    .choice(SceneChoice::new(
        "pay",
        "Pay the toll",
        Wis,
        10,
        Outcome::new(
            "You pay. The guard nods like you’ve validated his entire existence. -3 gold.",
        )
        .gold(-3)
        .advance(10),
        Outcome::new("You pay too much. He does not correct you. -5 gold.")
            .gold(-5)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "talk",
        "Talk your way across",
        Cha,
        14,
        Outcome::new(
            "You sell him a story about urgent business and tragic orphans. He waves you through. +2 XP.",
        )
        .xp(2)
        .advance(12),
        Outcome::new("He calls your bluff and levels the spear “by accident.”")
            .advance(10)
            .log("Combat triggered: Bridge guard")
            .fight(toll_guard),
    ))
    .choice(SceneChoice::new(
        "ford",
        "Find another way",
        Dex,
        13,
        Outcome::new("You find a shallow ford and keep your boots mostly dry. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new("You slip into freezing water and crawl out like a drowned rat. -2 HP.")
            .hp(-2)
            .advance(10),
    ))
}

fn rival_party() -> Scene {
    let rivals = CombatTrigger::new(
        EnemyKind::Rival,
        CombatEnding::new("Their champion yields. The rest of the party suddenly remembers an errand.")
            .log("Combat won: Rival adventurers"),
        CombatEnding::new("They take a toll in bruises and leave you by the shrine.")
            .log("Combat lost: Rival adventurers"),
        CombatEnding::new("You leave them arguing about who gets your pack.")
            .log("Fled: Rival adventurers"),
    );

    Scene::new(
        "road.rival_party",
        SceneCategory::Road,
        "Rival Adventurers",
        "You find another party at the roadside shrine: better equipped, cleaner, and smiling too easily. One of them eyes your pack like he already owns it.",
    )
    .choice(SceneChoice::new(
        "trade",
        "Trade information",
        Wis,
        13,
        Outcome::new(
            "You trade half-truths and keep your real lead. They leave thinking they won. +3 XP.",
        )
        .xp(3)
        .advance(12),
        Outcome::new("You talk too much. Their smiles sharpen. +1 XP.")
            .xp(1)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "threat",
        "Threaten them",
        Str,
        14,
        Outcome::new(
            "You make it clear the next step is violence. They decide it’s not worth the blood. +2 XP.",
        )
        .xp(2)
        .advance(10),
        Outcome::new("They laugh. Then their biggest member steps forward and rolls his shoulders.")
            .advance(10)
            .log("Combat triggered: Rival adventurers")
            .fight(rivals),
    ))
    .choice(SceneChoice::new(
        "leave",
        "Leave quietly",
        Dex,
        12,
        Outcome::new("You disappear before pride can ruin you. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new("You leave… and notice later that two coins are missing. -2 gold.")
            .gold(-2)
            .advance(10),
    ))
}

fn stone_gate() -> Scene {
    Scene::new(
        "ruins.stone_gate",
        SceneCategory::Ruins,
        "The Stone Gate",
        "The ruins breathe cold air. A stone gate blocks the descent, carved with warnings that have been scraped away and rewritten. Someone has been here recently.",
    )
    .choice(SceneChoice::new(
        "study",
        "Study the carvings",
        Int,
        14,
        Outcome::new(
            "You decipher the pattern: the gate responds to lies spoken with conviction. +3 XP.",
        )
        .xp(3)
        .advance(12),
        Outcome::new(
            "You learn only that someone hated this place enough to vandalize it twice. +1 XP.",
        )
        .xp(1)
        .advance(10),
    ))
    .choice(SceneChoice::new(
        "force",
        "Force it",
        Str,
        15,
        Outcome::new(
            "It opens with a scream of stone. You bruise your shoulder, but you’re in. -1 HP, +2 XP.",
        )
        .hp(-1)
        .xp(2)
        .advance(12),
        Outcome::new(
            "The gate does not move. Something does. You get hit by falling masonry. -3 HP.",
        )
        .hp(-3)
        .advance(10),
    ))
    .choice(SceneChoice::new(
        "lie",
        "Lie to the gate with confidence",
        Cha,
        13,
        Outcome::new("You tell a lie so clean it almost becomes truth. The gate opens. +3 XP.")
            .xp(3)
            .advance(14),
        Outcome::new(
            "The gate rejects your lie and punishes your honesty. A stone shard slices your palm. -2 HP.",
        )
        .hp(-2)
        .advance(10),
    ))
}

fn lantern_room() -> Scene {
    Scene::new(
        "vault.lantern_room",
        SceneCategory::Vault,
        "The Lantern Room",
        "A chamber lined with dead lanterns. One burns with a steady flame though no one has lit it. In its light, you see scratches on the floor: a fight happened here.",
    )
    .choice(SceneChoice::new(
        "take",
        "Take the lantern",
        Dex,
        14,
        Outcome::new("The lantern is warm in your hand. The shadows hate it.")
            .item("Lantern of True Flame")
            .advance(16)
            .log("Item acquired: Lantern of True Flame"),
        Outcome::new("The flame flares and bites. Your fingers blister. -2 HP.")
            .hp(-2)
            .advance(12),
    ))
    .choice(SceneChoice::new(
        "inspect",
        "Inspect the scratches",
        Wis,
        13,
        Outcome::new(
            "You read the fight like a story: someone came for the lock. Someone left bleeding. +3 XP.",
        )
        .xp(3)
        .advance(12),
        Outcome::new("You learn nothing except that fear has handwriting. +1 XP.")
            .xp(1)
            .advance(10),
    ))
    .choice(SceneChoice::new(
        "wait",
        "Wait in the dark",
        Con,
        12,
        Outcome::new("You wait. Nothing comes. That feels wrong. +2 XP.")
            .xp(2)
            .advance(10),
        Outcome::new(
            "You drift and startle awake. Something small scurries away. -1 HP (panic).",
        )
        .hp(-1)
        .advance(10),
    ))
}

fn final_lock() -> Scene {
    Scene::new(
        "vault.final_lock",
        SceneCategory::Vault,
        "The Final Lock",
        "The vault door is sealed by a lock with three tumblers: bone, iron, and glass. You can hear water behind it, like a river trapped in a throat.",
    )
    .choice(SceneChoice::new(
        "pick",
        "Pick the lock",
        Dex,
        15,
        Outcome::new(
            "The tumblers click like prayers. The door opens. Inside: treasure and silence. +25 gold, +8 XP.",
        )
        .gold(25)
        .xp(8)
        .advance(20)
        .log(ARC_COMPLETE),
        Outcome::new("The lock bites back. A thin glass needle pierces your thumb. -3 HP.")
            .hp(-3)
            .advance(16),
    ))
    .choice(SceneChoice::new(
        "smash",
        "Smash it open",
        Str,
        16,
        Outcome::new(
            "You break the door, and it breaks you a little back. Treasure spills out like guilt. -2 HP, +18 gold, +6 XP.",
        )
        .hp(-2)
        .gold(18)
        .xp(6)
        .advance(18)
        .log(ARC_COMPLETE),
        Outcome::new("Stone wins. You lose. -4 HP.").hp(-4).advance(14),
    ))
    .choice(SceneChoice::new(
        "leave",
        "Walk away",
        Wis,
        14,
        Outcome::new(
            "You leave the treasure behind. You keep your life. That is a trade most people never learn. +5 XP.",
        )
        .xp(5)
        .advance(18)
        .log(ARC_COMPLETE),
        Outcome::new(
            "You try to leave. The map in your pocket feels heavier with every step. You turn back. +2 XP.",
        )
        .xp(2)
        .advance(14),
    ))
}

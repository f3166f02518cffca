//! Character creation, backgrounds, and starting over.

use tracing::info;

use cm_mechanics::stats::generate_stats;
use cm_mechanics::{
    Alignment, ArcId, CampaignState, Character, ClassName, DieRoller, Identity, Race, Sex,
    StatGenMode, Stats,
};

use crate::catalog::Catalog;
use crate::error::{CampaignError, CampaignResult};
use crate::selector::weighted_pick;

const FIRST_NAMES_FEMALE: [&str; 8] = [
    "Astra", "Lilith", "Morgana", "Nyx", "Seraphine", "Vera", "Tess", "Rowan",
];
const FIRST_NAMES_MALE: [&str; 8] = [
    "Bromley", "Thorn", "Garrick", "Roland", "Osric", "Dorian", "Milo", "Cedric",
];
const LAST_NAMES: [&str; 8] = [
    "Underfoot",
    "Tax-Evasion",
    "McSidequest",
    "the Uninsured",
    "von Bad Idea",
    "of Regret",
    "Two-Swords",
    "Half-Plan",
];

const BACKGROUND_HOOKS: [&str; 5] = [
    "raised by a cleric with debt and a bard with commitment issues",
    "cursed at birth by an intern wizard who was “pretty sure” it would wear off",
    "destined for greatness, according to a prophecy written on a bar napkin",
    "trained by monks until you got banned for “excessive vibes”",
    "born during a lightning storm that definitely meant something ominous",
];

/// What the player chose on the creation screen.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    /// Name; blank picks a random one.
    pub name: String,
    /// Sex, also selects the first-name table.
    pub sex: Sex,
    /// Race.
    pub race: Race,
    /// Class.
    pub class: ClassName,
    /// Alignment.
    pub alignment: Alignment,
    /// How to roll stats when `stats` is not given.
    pub stat_mode: StatGenMode,
    /// Fixed stats, skipping generation.
    pub stats: Option<Stats>,
}

impl NewCharacter {
    /// A request with a random name and weighted stats.
    pub fn new(sex: Sex, race: Race, class: ClassName, alignment: Alignment) -> Self {
        Self {
            name: String::new(),
            sex,
            race,
            class,
            alignment,
            stat_mode: StatGenMode::Weighted,
            stats: None,
        }
    }

    /// Set the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the stat generation mode.
    pub fn with_stat_mode(mut self, mode: StatGenMode) -> Self {
        self.stat_mode = mode;
        self
    }

    /// Use fixed stats.
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }
}

fn pick<'a>(table: &[&'a str], roller: &mut dyn DieRoller) -> &'a str {
    let index = (roller.roll(table.len() as u32) as usize).clamp(1, table.len()) - 1;
    table[index]
}

/// A random `First Last` name from the sex-specific tables.
pub fn random_name(sex: Sex, roller: &mut dyn DieRoller) -> String {
    let first = match sex {
        Sex::Female => pick(&FIRST_NAMES_FEMALE, roller),
        Sex::Male => pick(&FIRST_NAMES_MALE, roller),
    };
    let last = pick(&LAST_NAMES, roller);
    format!("{first} {last}")
}

/// Start a fresh campaign on an arc chosen by the catalog's arc weights.
pub fn new_campaign(catalog: &Catalog, roller: &mut dyn DieRoller) -> CampaignResult<CampaignState> {
    let weights: Vec<(ArcId, u32)> = catalog
        .arcs()
        .filter(|(_, content)| content.weight > 0)
        .map(|(arc, content)| (arc, content.weight))
        .collect();
    let arc = weighted_pick(&weights, roller)
        .ok_or_else(|| CampaignError::InvalidContent("catalog has no selectable arcs".into()))?;
    Ok(CampaignState::new(arc))
}

/// Build a level-1 character on a new campaign.
pub fn create_character(
    request: &NewCharacter,
    catalog: &Catalog,
    roller: &mut dyn DieRoller,
) -> CampaignResult<Character> {
    let stats = match request.stats {
        Some(stats) => stats.clamped(),
        None => generate_stats(request.class, request.stat_mode, roller),
    };
    let name = match request.name.trim() {
        "" => random_name(request.sex, roller),
        trimmed => trimmed.to_string(),
    };
    let campaign = new_campaign(catalog, roller)?;
    let identity = Identity {
        name,
        sex: request.sex,
        race: request.race,
        class: request.class,
        alignment: request.alignment,
    };
    let character = Character::new(identity, stats, campaign);
    info!(
        name = character.name(),
        class = %character.class(),
        arc = %character.campaign.arc(),
        "character created"
    );
    Ok(character)
}

/// A short flavour paragraph naming the current campaign.
pub fn generate_background(
    character: &Character,
    catalog: &Catalog,
    roller: &mut dyn DieRoller,
) -> String {
    let hook = pick(&BACKGROUND_HOOKS, roller);
    let arc = character.campaign.arc();
    let title = catalog
        .arc(arc)
        .map(|content| content.title.clone())
        .unwrap_or_else(|| arc.to_string());
    format!(
        "You are a {} {} who was {hook}.\n\nCurrent campaign: {title} (Act {}).",
        character.identity.sex.label().to_lowercase(),
        character.class().label().to_lowercase(),
        character.campaign.act()
    )
}

/// Begin a new adventure with the same hero.
///
/// Identity, stats, level, xp, gold, inventory, and companions carry over.
/// Story state, flags, and navigation reset; every resource pool refills.
pub fn restart_adventure(
    character: &Character,
    catalog: &Catalog,
    roller: &mut dyn DieRoller,
) -> CampaignResult<Character> {
    let mut next = character.clone();
    next.campaign = new_campaign(catalog, roller)?;
    next.hp.restore();
    next.hit_dice.restore();
    next.spell_slots.restore();
    next.flags.clear();
    next.next_scene_id = None;
    next.last_scene_id = None;
    next.recent_scene_ids.clear();
    next.pending_combat = None;
    info!(arc = %next.campaign.arc(), "adventure restarted");
    Ok(next)
}

//! Short rests, long rests, rest story events, and reviving.
//!
//! All rolls are supplied by the caller so a presentation layer can animate
//! them: hit dice faces for a short rest, a d100 consequence roll, and a d20
//! story roll for any rest event that fires.

use tracing::info;

use crate::campaign::ArcId;
use crate::check::CheckRoll;
use crate::log::LogEntry;
use crate::sheet::Character;
use crate::stats::{StatKey, format_modifier};

/// Short rest consequence threshold on the d100.
pub const SHORT_CONSEQUENCE_CHANCE: u32 = 25;
/// Long rest consequence threshold on the d100.
pub const LONG_CONSEQUENCE_CHANCE: u32 = 55;

/// Which kind of rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestStyle {
    /// One day, spend hit dice.
    Short,
    /// Two days, full restore.
    Long,
}

/// A flag-gated story event that can interrupt a rest.
#[derive(Debug, Clone, Copy)]
pub struct RestEvent {
    /// Arc the event belongs to.
    pub arc: ArcId,
    /// Arc flag that must be set.
    pub requires_flag: &'static str,
    /// Arc flag set once the event has fired; blocks it afterwards.
    pub done_flag: &'static str,
    /// Arc flag set on a passed check.
    pub good_flag: &'static str,
    /// Arc flag set on a failed check.
    pub bad_flag: &'static str,
    /// Stat for the check.
    pub stat: StatKey,
    /// DC for the check.
    pub dc: i32,
    /// Fires when the consequence roll is at or below this on a short rest.
    pub short_chance: u32,
    /// Fires when the consequence roll is at or below this on a long rest.
    pub long_chance: u32,
    /// Scene queued after the event.
    pub next_scene_id: &'static str,
    /// Lead-in text.
    pub intro: &'static str,
    /// Text for a passed check.
    pub success_text: &'static str,
    /// Text for a failed check.
    pub failure_text: &'static str,
    /// Hp lost on a failed check during a short rest.
    pub short_damage: u32,
    /// Hp lost on a failed check during a long rest.
    pub long_damage: u32,
}

impl RestEvent {
    fn chance(&self, style: RestStyle) -> u32 {
        match style {
            RestStyle::Short => self.short_chance,
            RestStyle::Long => self.long_chance,
        }
    }

    fn damage(&self, style: RestStyle) -> u32 {
        match style {
            RestStyle::Short => self.short_damage,
            RestStyle::Long => self.long_damage,
        }
    }

    /// Whether this event fires for the character and roll.
    pub fn triggers(&self, character: &Character, style: RestStyle, consequence_roll: u32) -> bool {
        let campaign = &character.campaign;
        campaign.arc() == self.arc
            && campaign.flag(self.requires_flag)
            && !campaign.flag(self.done_flag)
            && consequence_roll <= self.chance(style)
    }
}

/// Built-in rest events.
pub static REST_EVENTS: &[RestEvent] = &[RestEvent {
    arc: ArcId::Mimic,
    requires_flag: "mimic_met",
    done_flag: "mimic_followup_done",
    good_flag: "mimic_rest_good",
    bad_flag: "mimic_rest_bad",
    stat: StatKey::Wis,
    dc: 13,
    short_chance: 25,
    long_chance: 40,
    next_scene_id: "camp.mimic_followup",
    intro: "Rest event: scratching outside your tent...",
    success_text: "You wake in time. Whatever it is, you have the upper hand.",
    failure_text: "You do NOT wake in time. Something bites.",
    short_damage: 1,
    long_damage: 2,
}];

/// Result of a rest or revive.
#[derive(Debug, Clone)]
pub struct RestOutcome {
    /// The character afterwards.
    pub character: Character,
    /// Log entries written.
    pub log: Vec<LogEntry>,
    /// One-line summary.
    pub summary: String,
}

fn run_rest_events(
    character: &mut Character,
    style: RestStyle,
    consequence_roll: u32,
    story_roll: u32,
    log: &mut Vec<LogEntry>,
) {
    for event in REST_EVENTS {
        if !event.triggers(character, style, consequence_roll) {
            continue;
        }
        let modifier = character.modifier(event.stat);
        let check = CheckRoll::resolve(story_roll, modifier, event.dc);
        let day = character.day;

        character.campaign.set_flag(event.done_flag, true);
        let outcome_flag = if check.success() {
            event.good_flag
        } else {
            event.bad_flag
        };
        character.campaign.set_flag(outcome_flag, true);
        character.next_scene_id = Some(event.next_scene_id.to_string());

        log.push(LogEntry::new(
            day,
            format!(
                "{} ({} check d20 {} {} = {} vs DC {})",
                event.intro,
                event.stat,
                check.natural,
                format_modifier(modifier),
                check.total,
                event.dc
            ),
        ));
        if check.success() {
            log.push(LogEntry::new(day, event.success_text));
        } else {
            log.push(LogEntry::new(day, event.failure_text));
            let damage = event.damage(style);
            character.hp.adjust(-(damage as i32));
            log.push(LogEntry::new(day, format!("Rest consequence: -{damage} HP.")));
        }
        info!(arc = %event.arc, success = check.success(), "rest event fired");
    }
}

/// Spend hit dice to heal over one day.
///
/// Only as many of `dice` are used as hit dice remain; each face is clamped
/// to the hit die. At least one spent die heals at least 1.
pub fn short_rest(
    character: &Character,
    dice: &[u32],
    consequence_roll: u32,
    story_roll: u32,
) -> RestOutcome {
    let mut next = character.clone();
    let con = next.modifier(StatKey::Con);
    let usable = dice.len().min(next.hit_dice.current() as usize);
    let spent: Vec<u32> = dice[..usable]
        .iter()
        .map(|d| next.hit_die.clamp_face(*d))
        .collect();

    next.day += 1;
    next.hit_dice.adjust(-(usable as i32));

    let hp_before = next.hp.current();
    if usable > 0 {
        let sum: i32 = spent.iter().map(|d| *d as i32).sum();
        let heal = (sum + usable as i32 * con).max(1);
        next.hp.adjust(heal);
    }
    let healed = next.hp.current() - hp_before;

    let mut log = vec![LogEntry::new(
        next.day,
        format!(
            "Short rest: spent {usable}{}. Healed {healed} HP.",
            next.hit_die
        ),
    )];

    run_rest_events(&mut next, RestStyle::Short, consequence_roll, story_roll, &mut log);

    if consequence_roll <= SHORT_CONSEQUENCE_CHANCE {
        next.adjust_gold(-1);
        next.campaign.advance(6);
        log.push(LogEntry::new(
            next.day,
            "While you rest, time moves. A small \"fee\" finds its way out of your coin pouch. -1 gold.",
        ));
    }

    info!(dice = usable, healed, day = next.day, "short rest");
    let summary = format!(
        "Short rest: +{} HP",
        next.hp.current().saturating_sub(hp_before)
    );
    RestOutcome {
        character: next,
        log,
        summary,
    }
}

/// Restore hp, spell slots, and hit dice over two days.
pub fn long_rest(character: &Character, consequence_roll: u32, story_roll: u32) -> RestOutcome {
    let mut next = character.clone();
    next.day += 2;
    next.hp.restore();
    next.spell_slots.restore();
    next.hit_dice.restore();

    let mut log = vec![LogEntry::new(
        next.day,
        "Long rest: fully healed. Spell slots refreshed. Hit dice restored.",
    )];

    run_rest_events(&mut next, RestStyle::Long, consequence_roll, story_roll, &mut log);

    if consequence_roll <= LONG_CONSEQUENCE_CHANCE {
        next.adjust_gold(-3);
        next.campaign.advance(12);
        log.push(LogEntry::new(
            next.day,
            "You wake to missing supplies and the distant sound of consequences. -3 gold.",
        ));
    }

    info!(day = next.day, "long rest");
    RestOutcome {
        character: next,
        log,
        summary: "Long rest: fully restored".to_string(),
    }
}

/// Bring a character at 0 hp back by spending one hit die.
///
/// `roll` is the hit die face. Without hit dice the revive is refused.
pub fn revive(character: &Character, roll: u32) -> RestOutcome {
    let mut next = character.clone();
    let day = next.day;

    if !next.is_dead() {
        return RestOutcome {
            character: next,
            log: vec![LogEntry::new(day, "You are not dead. Yet.")],
            summary: "Nothing to revive".to_string(),
        };
    }
    if next.hit_dice.is_empty() {
        return RestOutcome {
            character: next,
            log: vec![LogEntry::new(
                day,
                "No hit dice remaining. You cannot revive.",
            )],
            summary: "Revive refused".to_string(),
        };
    }

    let face = next.hit_die.clamp_face(roll) as i32;
    let heal = (face + next.modifier(StatKey::Con)).max(1) as u32;
    let hp = heal.clamp(1, next.hp.max());
    next.hp.set_current(hp);
    next.hit_dice.adjust(-1);
    info!(hp, "revived");

    RestOutcome {
        character: next,
        log: vec![LogEntry::new(day, format!("You revive with {hp} HP."))],
        summary: format!("Revived with {hp} HP"),
    }
}

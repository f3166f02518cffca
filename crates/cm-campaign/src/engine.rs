//! The engine facade.
//!
//! [`Engine`] owns the dice, the current character, the adventure log and
//! the turn stage. Each method checks that the action fits the stage before
//! running the pure operation behind it.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use cm_mechanics::combat::{PlayerAction, conclude, take_turn};
use cm_mechanics::rest::{long_rest, revive, short_rest};
use cm_mechanics::{Character, Die, DieRoller, LogEntry, RestOutcome};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::creation::{NewCharacter, create_character, generate_background, restart_adventure};
use crate::error::{CampaignError, CampaignResult};
use crate::journal::Journal;
use crate::resolver::{Resolution, begin_check, resolve_roll};
use crate::scene::{PendingRoll, Scene};
use crate::selector::next_turn_scene;
use crate::snapshot::{SNAPSHOT_VERSION, Snapshot, Stage};

/// What one combat round produced.
#[derive(Debug, Clone)]
pub struct CombatRound {
    /// Narration, in order, including any ending.
    pub lines: Vec<String>,
    /// Whether the fight is over.
    pub finished: bool,
}

/// A running campaign session.
pub struct Engine {
    catalog: Catalog,
    config: EngineConfig,
    roller: Box<dyn DieRoller>,
    character: Option<Character>,
    journal: Journal,
    stage: Stage,
}

impl Engine {
    /// Create an engine with no character.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let roller = Box::new(StdRng::seed_from_u64(config.seed));
        Self {
            catalog,
            config,
            roller,
            character: None,
            journal: Journal::new(),
            stage: Stage::Idle,
        }
    }

    /// Resume from a snapshot. The character's invariants are checked.
    pub fn from_snapshot(
        catalog: Catalog,
        config: EngineConfig,
        snapshot: Snapshot,
    ) -> CampaignResult<Self> {
        if let Some(character) = &snapshot.character {
            character.validate()?;
        }
        let mut engine = Self::new(catalog, config);
        engine.character = snapshot.character;
        engine.journal = snapshot.log;
        engine.stage = snapshot.stage;
        Ok(engine)
    }

    /// Replace the dice, e.g. with a scripted roller.
    pub fn with_roller(mut self, roller: Box<dyn DieRoller>) -> Self {
        self.roller = roller;
        self
    }

    /// Capture the session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            character: self.character.clone(),
            log: self.journal.clone(),
            stage: self.stage.clone(),
        }
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The config.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The character, if one exists.
    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    /// The adventure log.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The turn stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    fn require_character(&self) -> CampaignResult<&Character> {
        self.character.as_ref().ok_or(CampaignError::NoCharacter)
    }

    fn ensure_between_turns(&self, action: &str) -> CampaignResult<()> {
        let character = self.require_character()?;
        if !matches!(self.stage, Stage::Idle | Stage::Outcome { .. }) {
            return Err(self.wrong_stage(action));
        }
        if character.is_dead() {
            return Err(CampaignError::Dead);
        }
        Ok(())
    }

    fn wrong_stage(&self, action: &str) -> CampaignError {
        CampaignError::WrongStage {
            action: action.to_string(),
            stage: self.stage.label().to_string(),
        }
    }

    fn record(&mut self, entries: Vec<LogEntry>) {
        self.journal.extend(entries);
    }

    /// Create a character and return its background.
    pub fn create(&mut self, request: &NewCharacter) -> CampaignResult<String> {
        let character = create_character(request, &self.catalog, self.roller.as_mut())?;
        let background = generate_background(&character, &self.catalog, self.roller.as_mut());
        let day = character.day;
        self.journal = Journal::new();
        self.journal.append(LogEntry::new(
            day,
            format!("{} begins their adventure.", character.name()),
        ));
        self.character = Some(character);
        self.stage = Stage::Idle;
        Ok(background)
    }

    /// Background text for the current character.
    pub fn background(&mut self) -> CampaignResult<String> {
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        Ok(generate_background(character, &self.catalog, self.roller.as_mut()))
    }

    /// Draw the next scene.
    pub fn next_turn(&mut self) -> CampaignResult<Scene> {
        self.ensure_between_turns("start a new turn")?;
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let (next, scene) =
            next_turn_scene(character, &self.catalog, &self.config, self.roller.as_mut())?;
        self.character = Some(next);
        self.stage = Stage::Scene {
            scene: scene.clone(),
        };
        Ok(scene)
    }

    /// Commit to a choice on the current scene.
    pub fn choose(&mut self, choice_id: &str) -> CampaignResult<PendingRoll> {
        let Stage::Scene { scene } = &self.stage else {
            return Err(self.wrong_stage("choose"));
        };
        let pending = begin_check(scene, choice_id)?;
        let scene = scene.clone();
        self.stage = Stage::Roll {
            scene,
            pending: pending.clone(),
        };
        Ok(pending)
    }

    /// Resolve the pending roll. `roll` overrides the d20.
    ///
    /// A triggered fight moves out of the character's pending slot and into
    /// the combat stage.
    pub fn roll(&mut self, roll: Option<u32>) -> CampaignResult<Resolution> {
        let Stage::Roll { scene, pending } = &self.stage else {
            return Err(self.wrong_stage("roll"));
        };
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let mut resolution = resolve_roll(
            character,
            scene,
            pending,
            roll,
            &self.config,
            self.roller.as_mut(),
        )?;
        let scene = scene.clone();

        self.stage = match resolution.character.pending_combat.take() {
            Some(combat) => Stage::Combat { combat },
            None => Stage::Outcome {
                scene,
                outcome_text: resolution.outcome_text.clone(),
            },
        };
        self.character = Some(resolution.character.clone());
        self.record(resolution.log.clone());
        Ok(resolution)
    }

    /// Play one combat round.
    pub fn combat_turn(&mut self, action: PlayerAction) -> CampaignResult<CombatRound> {
        let Stage::Combat { combat } = &self.stage else {
            return Err(self.wrong_stage("fight"));
        };
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let round = take_turn(character, combat, action, self.roller.as_mut());
        let mut lines = round.lines;
        let finished = round.status.is_terminal();

        let next = if finished {
            let (concluded, ending) = conclude(&round.character, &round.combat, round.status);
            lines.extend(ending);
            self.stage = Stage::Idle;
            concluded
        } else {
            self.stage = Stage::Combat {
                combat: round.combat,
            };
            round.character
        };

        let day = next.day;
        self.character = Some(next);
        self.record(LogEntry::batch(day, lines.iter().cloned()));
        Ok(CombatRound { lines, finished })
    }

    fn finish_rest(&mut self, outcome: RestOutcome) -> RestOutcome {
        self.character = Some(outcome.character.clone());
        self.record(outcome.log.clone());
        self.stage = Stage::Idle;
        outcome
    }

    /// Short rest spending up to `dice` hit dice.
    pub fn short_rest(&mut self, dice: u32) -> CampaignResult<RestOutcome> {
        self.ensure_between_turns("rest")?;
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let usable = dice.min(character.hit_dice.current());
        let hit_die = character.hit_die;
        let rolls: Vec<u32> = (0..usable).map(|_| hit_die.roll(self.roller.as_mut())).collect();
        let consequence = Die::D100.roll(self.roller.as_mut());
        let story = Die::D20.roll(self.roller.as_mut());
        let outcome = short_rest(character, &rolls, consequence, story);
        Ok(self.finish_rest(outcome))
    }

    /// Long rest.
    pub fn long_rest(&mut self) -> CampaignResult<RestOutcome> {
        self.ensure_between_turns("rest")?;
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let consequence = Die::D100.roll(self.roller.as_mut());
        let story = Die::D20.roll(self.roller.as_mut());
        let outcome = long_rest(character, consequence, story);
        Ok(self.finish_rest(outcome))
    }

    /// Spend a hit die to get back up.
    pub fn revive(&mut self) -> CampaignResult<RestOutcome> {
        if matches!(self.stage, Stage::Combat { .. } | Stage::Roll { .. }) {
            return Err(self.wrong_stage("revive"));
        }
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let roll = character.hit_die.roll(self.roller.as_mut());
        let outcome = revive(character, roll);
        Ok(self.finish_rest(outcome))
    }

    /// Start a new adventure with the same hero.
    pub fn restart(&mut self) -> CampaignResult<String> {
        let character = self.character.as_ref().ok_or(CampaignError::NoCharacter)?;
        let next = restart_adventure(character, &self.catalog, self.roller.as_mut())?;
        let title = self
            .catalog
            .arc(next.campaign.arc())
            .map(|c| c.title.clone())
            .unwrap_or_else(|| next.campaign.arc().to_string());
        let line = format!("A new adventure begins: {title}.");
        info!(arc = %next.campaign.arc(), "restart");
        self.record(vec![LogEntry::new(next.day, line.clone())]);
        self.character = Some(next);
        self.stage = Stage::Idle;
        Ok(line)
    }
}

//! Interactive play loop state.
//!
//! `Session` wraps an [`Engine`] and turns a line of player input into the
//! text to print. The play command owns I/O and saving.

use colored::Colorize;

use cm_campaign::{CampaignError, Engine, Scene, Stage};
use cm_mechanics::combat::{AttackKind, PlayerAction};
use cm_mechanics::{CombatState, RestOutcome};

use crate::commands::sheet::render_sheet;

const HELP: &str = "\
Commands:
  turn                 Draw the next scene
  <n|id> [d20]         Pick a choice (optionally forcing the d20)
  roll [d20]           Roll a pending check
  attack [weapon|cantrip|spell]
  guard                Brace for the enemy's next action
  run                  Try to escape
  short [n]            Short rest, spending up to n hit dice (default 1)
  long                 Long rest
  revive               Spend a hit die to get back up
  restart              New adventure, same hero
  sheet                Character sheet
  log [n]              Last n log entries (default 10)
  help                 This help
  quit                 Save and exit";

/// An interactive session over one engine.
pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// What is on screen right now.
    pub fn status(&self) -> String {
        match self.engine.stage() {
            Stage::Idle => "Type 'turn' to continue your adventure.".to_string(),
            Stage::Scene { scene } => render_scene(scene),
            Stage::Roll { pending, .. } => {
                format!("Pending {} check vs DC {}. Type 'roll'.", pending.stat, pending.dc)
            }
            Stage::Outcome { outcome_text, .. } => {
                format!("{outcome_text}\n\nType 'turn' to continue.")
            }
            Stage::Combat { combat } => render_combat(combat),
        }
    }

    /// Process a line of input and return the response.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();
        let arg = parts.get(1).copied();

        let result = match cmd.as_str() {
            "turn" | "t" | "next" => self.do_turn(),
            "roll" => self.do_roll(parse_roll(arg)?),
            "attack" | "a" => {
                let kind = match arg {
                    Some(s) => AttackKind::parse(s)
                        .ok_or_else(|| format!("unknown attack '{s}' (weapon, cantrip, spell)"))?,
                    None => AttackKind::Weapon,
                };
                self.do_fight(PlayerAction::Attack(kind))
            }
            "guard" | "g" => self.do_fight(PlayerAction::Guard),
            "run" | "r" => self.do_fight(PlayerAction::Run),
            "short" => {
                let dice = match arg {
                    Some(s) => s.parse().map_err(|_| format!("not a number: {s}"))?,
                    None => 1,
                };
                self.engine.short_rest(dice).map(render_rest)
            }
            "long" => self.engine.long_rest().map(render_rest),
            "revive" => self.engine.revive().map(render_rest),
            "restart" => self.engine.restart(),
            "sheet" => {
                return self
                    .engine
                    .character()
                    .map(render_sheet)
                    .ok_or_else(|| CampaignError::NoCharacter.to_string());
            }
            "log" => {
                let n = match arg {
                    Some(s) => s.parse().map_err(|_| format!("not a number: {s}"))?,
                    None => 10,
                };
                return Ok(self.do_log(n));
            }
            "help" | "?" => return Ok(HELP.to_string()),
            "quit" | "q" | "exit" => return Ok("Saved. Farewell, adventurer.".to_string()),
            _ => self.do_choice(&cmd, arg),
        };
        result.map_err(|e| e.to_string())
    }

    fn do_turn(&mut self) -> Result<String, CampaignError> {
        let scene = self.engine.next_turn()?;
        Ok(render_scene(&scene))
    }

    fn do_choice(&mut self, key: &str, roll: Option<&str>) -> Result<String, CampaignError> {
        let Stage::Scene { scene } = self.engine.stage() else {
            return Err(CampaignError::WrongStage {
                action: format!("choose '{key}'"),
                stage: self.engine.stage().label().to_string(),
            });
        };
        let choice_id = match key.parse::<usize>() {
            Ok(n) if (1..=scene.choices.len()).contains(&n) => scene.choices[n - 1].id.clone(),
            _ => key.to_string(),
        };
        let roll = roll.and_then(|s| s.parse().ok());
        self.engine.choose(&choice_id)?;
        self.do_roll(roll)
    }

    fn do_roll(&mut self, roll: Option<u32>) -> Result<String, CampaignError> {
        let resolution = self.engine.roll(roll)?;
        let verdict = if resolution.success {
            "Success!".green().bold()
        } else {
            "Failure.".red().bold()
        };
        let mut out = format!("{}\n{verdict} {}", resolution.breakdown, resolution.outcome_text);
        for entry in resolution.log.iter().skip(1) {
            out.push_str(&format!("\n  {}", entry.text));
        }
        if let Stage::Combat { combat } = self.engine.stage() {
            out.push_str("\n\n");
            out.push_str(&render_combat(combat));
        }
        Ok(out)
    }

    fn do_fight(&mut self, action: PlayerAction) -> Result<String, CampaignError> {
        let round = self.engine.combat_turn(action)?;
        let mut out = round.lines.join("\n");
        if let Stage::Combat { combat } = self.engine.stage() {
            out.push_str("\n\n");
            out.push_str(&render_combat(combat));
        } else if self.engine.character().is_some_and(|c| c.is_dead()) {
            out.push_str(&format!("\n\n{}", "You are at 0 HP. 'revive' or 'restart'.".red()));
        }
        Ok(out)
    }

    fn do_log(&self, n: usize) -> String {
        let journal = self.engine.journal();
        if journal.is_empty() {
            return "The log is empty.".to_string();
        }
        journal
            .tail(n)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_roll(arg: Option<&str>) -> Result<Option<u32>, String> {
    arg.map(|s| s.parse::<u32>().map_err(|_| format!("not a d20 face: {s}")))
        .transpose()
}

/// A scene with numbered choices.
pub fn render_scene(scene: &Scene) -> String {
    let mut out = format!("{} [{}]\n{}\n", scene.title.bold(), scene.category, scene.body);
    for (i, choice) in scene.choices.iter().enumerate() {
        out.push_str(&format!(
            "\n  {}. {} ({} DC {}) [{}]",
            i + 1,
            choice.text,
            choice.stat,
            choice.dc,
            choice.id.dimmed()
        ));
    }
    out
}

fn render_combat(combat: &CombatState) -> String {
    format!(
        "{} {} HP {}/{} AC {} | round {} | next: {}\nattack [weapon|cantrip|spell], guard, run",
        "Fight:".red().bold(),
        combat.enemy.name,
        combat.enemy.hp,
        combat.enemy.max_hp,
        combat.enemy.ac,
        combat.round,
        combat.enemy.intent
    )
}

fn render_rest(outcome: RestOutcome) -> String {
    let mut lines = vec![outcome.summary.bold().to_string()];
    lines.extend(outcome.log.iter().map(|e| format!("  {e}")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_campaign::{Catalog, EngineConfig, NewCharacter};
    use cm_mechanics::{Alignment, ClassName, Race, ScriptedRoller, Sex, Stats};

    fn session(rolls: Vec<u32>) -> Session {
        let mut engine = Engine::new(Catalog::builtin(), EngineConfig::default())
            .with_roller(Box::new(ScriptedRoller::new(rolls)));
        engine
            .create(
                &NewCharacter::new(Sex::Male, Race::Halfling, ClassName::Rogue, Alignment::Neutral)
                    .named("Pip Ledgerlight")
                    .with_stats(Stats::uniform(14)),
            )
            .unwrap();
        Session::new(engine)
    }

    #[test]
    fn empty_input_is_quiet() {
        let mut s = session(vec![1, 1]);
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn turn_then_numbered_choice() {
        let mut s = session(vec![1, 1, 1]);
        let scene = s.process("turn").unwrap();
        assert!(scene.contains("A Man With A Ledger"));
        assert!(scene.contains("1. Confess everything"));

        let out = s.process("1 18").unwrap();
        assert!(out.contains("d20 18"));
        assert!(out.contains("He nods like a man enjoying a list."));
        assert!(matches!(s.engine().stage(), Stage::Outcome { .. }));
    }

    #[test]
    fn choice_by_id() {
        let mut s = session(vec![1, 1, 1]);
        s.process("turn").unwrap();
        let out = s.process("bribe 2").unwrap();
        assert!(out.contains("sponsored by anxiety"));
    }

    #[test]
    fn wrong_stage_is_an_error() {
        let mut s = session(vec![1, 1]);
        let err = s.process("guard").unwrap_err();
        assert!(err.contains("cannot fight right now (idle)"));
        let err = s.process("1").unwrap_err();
        assert!(err.contains("right now (idle)"));
    }

    #[test]
    fn bad_arguments() {
        let mut s = session(vec![1, 1]);
        assert!(s.process("attack sword").unwrap_err().contains("unknown attack"));
        assert!(s.process("short lots").unwrap_err().contains("not a number"));
        assert!(s.process("roll twenty").unwrap_err().contains("not a d20 face"));
    }

    #[test]
    fn sheet_log_and_help() {
        let mut s = session(vec![1, 1]);
        assert!(s.process("sheet").unwrap().contains("Pip Ledgerlight"));
        assert!(s.process("log").unwrap().contains("Day 1: Pip Ledgerlight begins their adventure."));
        assert!(s.process("help").unwrap().contains("attack [weapon|cantrip|spell]"));
    }

    #[test]
    fn short_rest_reports_healing() {
        let mut s = session(vec![1, 1, 5, 100, 10]);
        let out = s.process("short").unwrap();
        assert!(out.contains("Short rest: +0 HP"));
        assert!(out.contains("Day 2: Short rest: spent 1d8. Healed 0 HP."));
    }
}

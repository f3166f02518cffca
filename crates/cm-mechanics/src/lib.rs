//! Rules layer for the Critical Miss campaign engine.
//!
//! Provides dice rolling, ability scores, the character record, skill
//! checks, the experience curve, the combat turn state machine, and the
//! rest/recovery subsystem. Every operation takes a `&Character` and
//! returns the next value; randomness is injected through [`DieRoller`].

pub mod campaign;
pub mod check;
pub mod combat;
pub mod dice;
pub mod error;
pub mod leveling;
pub mod log;
pub mod rest;
pub mod sheet;
pub mod stats;

pub use campaign::{ArcId, CampaignState};
pub use check::{CheckOutcome, CheckRoll};
pub use combat::{CombatEnding, CombatState, CombatStatus, Enemy, EnemyIntent, EnemyKind};
pub use dice::{DiceExpr, Die, DieRoller, RollResult, ScriptedRoller};
pub use error::{MechError, MechResult};
pub use leveling::apply_leveling;
pub use log::LogEntry;
pub use rest::{RestOutcome, RestStyle};
pub use sheet::{Alignment, Character, ClassName, Companion, Identity, Race, Sex, Track};
pub use stats::{StatGenMode, StatKey, Stats, ability_modifier};

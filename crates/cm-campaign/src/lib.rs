//! Campaign engine for Critical Miss.
//!
//! Sits on top of `cm-mechanics` and drives the story: a catalog of authored
//! scenes and arcs, weighted scene selection with a no-repeat window and
//! synthesized filler, check resolution with outcome effects and combat
//! triggers, character creation, the adventure journal, and the
//! [`Engine`] facade that sequences a turn and can be snapshotted to JSON.

pub mod catalog;
pub mod config;
mod content;
pub mod creation;
pub mod effect;
pub mod engine;
pub mod error;
pub mod journal;
pub mod lint;
pub mod resolver;
pub mod scene;
pub mod selector;
pub mod snapshot;

pub use catalog::{ArcContent, Catalog, HUB_SCENE_ID, PoolEntry, ValidationIssue};
pub use config::EngineConfig;
pub use creation::NewCharacter;
pub use effect::{CombatTrigger, Effect, Outcome};
pub use engine::{CombatRound, Engine};
pub use error::{CampaignError, CampaignResult};
pub use journal::Journal;
pub use resolver::Resolution;
pub use scene::{PendingRoll, Scene, SceneCategory, SceneChoice};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot, Stage};

//! Save-file shapes.
//!
//! The engine only defines what a snapshot holds. Reading and writing them,
//! and upgrading older versions, is up to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cm_mechanics::{Character, CombatState};

use crate::journal::Journal;
use crate::scene::{PendingRoll, Scene};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 4;

/// Where the player is in the turn loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stage {
    /// Waiting for the next turn.
    #[default]
    Idle,
    /// A scene is shown and a choice is expected.
    Scene {
        /// The scene on screen.
        scene: Scene,
    },
    /// A choice was made and the d20 is pending.
    Roll {
        /// The scene the choice belongs to.
        scene: Scene,
        /// The committed choice.
        pending: PendingRoll,
    },
    /// A check was resolved; the result is on screen.
    Outcome {
        /// The scene that was resolved.
        scene: Scene,
        /// What happened.
        outcome_text: String,
    },
    /// A fight is in progress.
    Combat {
        /// The fight.
        combat: CombatState,
    },
}

impl Stage {
    /// Short label for prompts and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scene { .. } => "scene",
            Self::Roll { .. } => "roll",
            Self::Outcome { .. } => "outcome",
            Self::Combat { .. } => "combat",
        }
    }
}

/// Everything needed to resume a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version.
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// The hero, if one was created.
    pub character: Option<Character>,
    /// The adventure log.
    #[serde(default)]
    pub log: Journal,
    /// Turn-loop position.
    #[serde(default)]
    pub stage: Stage,
}

impl Snapshot {
    /// A snapshot with no character.
    pub fn empty() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            character: None,
            log: Journal::new(),
            stage: Stage::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, HUB_SCENE_ID};

    #[test]
    fn empty_snapshot() {
        let snap = Snapshot::empty();
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert!(snap.character.is_none());
        assert!(snap.log.is_empty());
        assert_eq!(snap.stage, Stage::Idle);
    }

    #[test]
    fn stage_json_is_tagged() {
        let json = serde_json::to_string(&Stage::Idle).unwrap();
        assert_eq!(json, r#"{"kind":"idle"}"#);
        let scene = Catalog::builtin().scene(HUB_SCENE_ID).unwrap().clone();
        let stage = Stage::Scene { scene };
        let json = serde_json::to_string(&stage).unwrap();
        assert!(json.starts_with(r#"{"kind":"scene","scene":{"id":"tavern.dripping_goblet""#));
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stage);
        assert_eq!(back.label(), "scene");
    }

    #[test]
    fn missing_log_and_stage_default() {
        let json = r#"{"version":4,"saved_at":"2026-01-01T00:00:00Z","character":null}"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert!(snap.log.is_empty());
        assert_eq!(snap.stage, Stage::Idle);
    }
}

//! Scenes, choices, and pending rolls.

use serde::{Deserialize, Serialize};

use cm_mechanics::StatKey;

use crate::effect::Outcome;

/// Broad setting of a scene. Used for display and the combat lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneCategory {
    /// A tavern.
    Tavern,
    /// A town street.
    Street,
    /// The open road.
    Road,
    /// Old ruins.
    Ruins,
    /// A treasure vault.
    Vault,
    /// A letter arrives.
    Letter,
    /// A village.
    Village,
    /// A noble's manor.
    Manor,
    /// The morning after.
    Aftermath,
    /// A courtroom.
    Court,
    /// A dungeon corridor.
    Dungeon,
    /// A campsite.
    Camp,
    /// A wizard's workplace.
    Magic,
    /// Something has gone wrong.
    Disaster,
    /// Synthesized travel filler.
    Travel,
}

impl SceneCategory {
    /// Categories where hp loss usually means somebody is hitting you.
    pub fn is_adversarial(self) -> bool {
        matches!(self, Self::Tavern | Self::Street | Self::Road | Self::Manor)
    }
}

impl std::fmt::Display for SceneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One option on a scene, resolved with a stat check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneChoice {
    /// Choice id, unique within the scene.
    pub id: String,
    /// Button text.
    pub text: String,
    /// Stat for the check.
    pub stat: StatKey,
    /// Difficulty class.
    pub dc: i32,
    /// Applied when the check succeeds.
    pub on_success: Outcome,
    /// Applied when the check fails.
    pub on_failure: Outcome,
}

impl SceneChoice {
    /// Create a choice.
    pub fn new(
        id: &str,
        text: &str,
        stat: StatKey,
        dc: i32,
        on_success: Outcome,
        on_failure: Outcome,
    ) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            stat,
            dc,
            on_success,
            on_failure,
        }
    }

    /// The outcome for a check result.
    pub fn outcome(&self, success: bool) -> &Outcome {
        if success {
            &self.on_success
        } else {
            &self.on_failure
        }
    }
}

/// An authored (or synthesized) story beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Stable id, e.g. `tavern.dripping_goblet`.
    pub id: String,
    /// Setting.
    pub category: SceneCategory,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Two to four choices.
    pub choices: Vec<SceneChoice>,
}

impl Scene {
    /// Create a scene with no choices yet.
    pub fn new(id: &str, category: SceneCategory, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            category,
            title: title.to_string(),
            body: body.to_string(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn choice(mut self, choice: SceneChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Look up a choice by id.
    pub fn find_choice(&self, id: &str) -> Option<&SceneChoice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

/// A choice the player committed to, waiting for its d20.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRoll {
    /// Scene the choice belongs to.
    pub scene_id: String,
    /// Chosen choice id.
    pub choice_id: String,
    /// Stat for the check.
    pub stat: StatKey,
    /// Difficulty class.
    pub dc: i32,
}

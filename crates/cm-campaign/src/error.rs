//! Error types for the campaign engine.

use cm_mechanics::MechError;

/// Errors that can occur while running a campaign.
#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    /// A choice id does not exist on the scene.
    #[error("scene '{scene}' has no choice '{choice}'")]
    UnknownChoice {
        /// The scene that was searched.
        scene: String,
        /// The missing choice id.
        choice: String,
    },

    /// A pending roll was resolved against a different scene.
    #[error("pending roll belongs to scene '{expected}', not '{found}'")]
    SceneMismatch {
        /// Scene id on the pending roll.
        expected: String,
        /// Scene id that was passed in.
        found: String,
    },

    /// Neither the requested scene nor the hub exists.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// The engine has no character yet.
    #[error("no character; create one first")]
    NoCharacter,

    /// The action does not fit the current turn stage.
    #[error("cannot {action} right now ({stage})")]
    WrongStage {
        /// What was attempted.
        action: String,
        /// The current stage label.
        stage: String,
    },

    /// The character is at 0 hp.
    #[error("you are dead; revive or restart")]
    Dead,

    /// A content pack failed validation.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// A content pack or snapshot could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error from the rules layer.
    #[error(transparent)]
    Mechanics(#[from] MechError),
}

/// Convenience result type for campaign operations.
pub type CampaignResult<T> = Result<T, CampaignError>;

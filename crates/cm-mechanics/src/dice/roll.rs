//! Rolled faces for a dice expression.

use serde::{Deserialize, Serialize};

use super::{DiceExpr, Die};

/// The faces that came up for one [`DiceExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// What was rolled.
    pub expr: DiceExpr,
    /// Faces in roll order.
    pub faces: Vec<u32>,
}

impl RollResult {
    /// Sum of the faces.
    pub fn total(&self) -> u32 {
        self.faces.iter().sum()
    }

    /// Sum without the single lowest face. Used for 4d6-drop-lowest stats.
    pub fn total_drop_lowest(&self) -> u32 {
        let lowest = self.faces.iter().min().copied().unwrap_or(0);
        self.total() - lowest
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        write!(f, "{} [{}] = {}", self.expr, faces.join(", "), self.total())
    }
}

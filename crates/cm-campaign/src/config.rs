//! Configuration for the campaign engine.

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible runs.
    pub seed: u64,
    /// How many recent scene ids the character remembers.
    pub recent_window: usize,
    /// Arc progress added by every resolved check.
    pub progress_step: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            recent_window: 6,
            progress_step: 8,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the recent-scene window (at least 1).
    pub fn with_recent_window(mut self, window: usize) -> Self {
        self.recent_window = window.max(1);
        self
    }

    /// Set the per-check arc progress step (0-100).
    pub fn with_progress_step(mut self, step: u32) -> Self {
        self.progress_step = step.min(100);
        self
    }
}

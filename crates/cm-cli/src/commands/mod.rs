pub mod log;
pub mod new;
pub mod play;
pub mod scenes;
pub mod sheet;

use std::path::Path;

use cm_campaign::{Catalog, Engine, EngineConfig, Snapshot};
use cm_mechanics::Character;
use tracing::debug;

use crate::store;

/// The seed to run with: the one given, or a fresh one per invocation.
fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    debug!(seed, "rng seeded");
    seed
}

/// Load a save and resume an engine over the built-in catalog.
fn open_engine(save: &Path, seed: Option<u64>) -> Result<Engine, String> {
    let snapshot = store::load(save)?;
    Engine::from_snapshot(
        Catalog::builtin(),
        EngineConfig::default().with_seed(resolve_seed(seed)),
        snapshot,
    )
    .map_err(|e| format!("{} is damaged: {e}", save.display()))
}

/// Load a save that must hold a character.
fn load_character(save: &Path) -> Result<(Snapshot, Character), String> {
    let snapshot = store::load(save)?;
    let character = snapshot
        .character
        .clone()
        .ok_or_else(|| format!("{} has no character; run 'cm new' first", save.display()))?;
    Ok((snapshot, character))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(7)), 7);
        assert_eq!(resolve_seed(Some(0)), 0);
    }

    #[test]
    fn missing_seed_is_drawn_fresh() {
        assert_ne!(resolve_seed(None), resolve_seed(None));
    }
}

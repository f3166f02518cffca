//! JSON save files.
//!
//! Saves are a serialized [`Snapshot`]. Versions 2 and 3 are upgraded on
//! load by backfilling the fields they lack.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use cm_campaign::{SNAPSHOT_VERSION, Snapshot};

/// Save file used when `--save` is not given.
pub const DEFAULT_SAVE: &str = "critical-miss.json";

const OLDEST_SUPPORTED: u64 = 2;

/// Read and upgrade a save file.
pub fn load(path: &Path) -> Result<Snapshot, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .map_err(|e| format!("{} is not valid JSON: {e}", path.display()))?;
    let upgraded = migrate(raw)?;
    serde_json::from_value(upgraded)
        .map_err(|e| format!("{} is not a Critical Miss save: {e}", path.display()))
}

/// Write a save file.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), String> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    debug!(path = %path.display(), "saved");
    Ok(())
}

/// Bring a raw save up to the current version.
///
/// Version 2 predates companions and the recent-scene window; version 3
/// predates the turn stage and save timestamps.
pub fn migrate(mut raw: Value) -> Result<Value, String> {
    let root = raw
        .as_object_mut()
        .ok_or_else(|| "save file must be a JSON object".to_string())?;
    let version = root.get("version").and_then(Value::as_u64).unwrap_or(0);
    let current = u64::from(SNAPSHOT_VERSION);

    if version == current {
        return Ok(raw);
    }
    if !(OLDEST_SUPPORTED..current).contains(&version) {
        return Err(format!(
            "unsupported save version {version} (expected {OLDEST_SUPPORTED}-{current})"
        ));
    }

    if let Some(character) = root.get_mut("character").and_then(Value::as_object_mut) {
        backfill(character, "inventory", json!([]));
        backfill(character, "companions", json!([]));
        backfill(character, "flags", json!({}));
        backfill(character, "recent_scene_ids", json!([]));
    }
    backfill(root, "saved_at", json!(chrono::Utc::now()));
    backfill(root, "log", json!([]));
    backfill(root, "stage", json!({ "kind": "idle" }));
    root.insert("version".into(), json!(current));

    info!(from = version, to = current, "save migrated");
    Ok(raw)
}

fn backfill(object: &mut Map<String, Value>, key: &str, default: Value) {
    object.entry(key).or_insert(default);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_campaign::{Catalog, Engine, EngineConfig, NewCharacter, Stage};
    use cm_mechanics::{Alignment, ClassName, Race, Sex};

    fn current_save() -> Value {
        let mut engine = Engine::new(Catalog::builtin(), EngineConfig::default());
        engine
            .create(
                &NewCharacter::new(Sex::Female, Race::Dwarf, ClassName::Druid, Alignment::Good)
                    .named("Brisa Ashfall"),
            )
            .unwrap();
        serde_json::to_value(engine.snapshot()).unwrap()
    }

    #[test]
    fn current_version_passes_through() {
        let raw = current_save();
        assert_eq!(migrate(raw.clone()).unwrap(), raw);
    }

    #[test]
    fn version_three_gains_stage_and_timestamp() {
        let mut raw = current_save();
        let root = raw.as_object_mut().unwrap();
        root.insert("version".into(), json!(3));
        root.remove("stage");
        root.remove("saved_at");

        let snap: Snapshot = serde_json::from_value(migrate(raw).unwrap()).unwrap();
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert_eq!(snap.stage, Stage::Idle);
        assert_eq!(snap.character.unwrap().name(), "Brisa Ashfall");
    }

    #[test]
    fn version_two_gains_character_fields() {
        let mut raw = current_save();
        let root = raw.as_object_mut().unwrap();
        root.insert("version".into(), json!(2));
        root.remove("log");
        root.remove("stage");
        let character = root["character"].as_object_mut().unwrap();
        character.remove("companions");
        character.remove("recent_scene_ids");

        let snap: Snapshot = serde_json::from_value(migrate(raw).unwrap()).unwrap();
        let c = snap.character.unwrap();
        assert!(c.companions.is_empty());
        assert!(c.recent_scene_ids.is_empty());
        assert!(snap.log.is_empty());
    }

    #[test]
    fn rejects_unknown_versions() {
        assert!(migrate(json!({ "version": 1 })).is_err());
        assert!(migrate(json!({ "version": 9 })).is_err());
        assert!(migrate(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let snap: Snapshot = serde_json::from_value(current_save()).unwrap();
        save(&path, &snap).unwrap();
        let back = load(&path).unwrap();
        assert_eq!(back.character, snap.character);
        assert_eq!(back.log, snap.log);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/nonexistent/critical-miss.json")).unwrap_err();
        assert!(err.contains("cannot read"));
    }
}

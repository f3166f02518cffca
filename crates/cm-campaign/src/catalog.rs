//! The scene catalog: scenes by id, weighted pools per arc and act,
//! finales, and the hub scene.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use cm_mechanics::rest::REST_EVENTS;
use cm_mechanics::{ArcId, CampaignState};

use crate::error::{CampaignError, CampaignResult};
use crate::scene::Scene;

/// Id of the built-in hub scene.
pub const HUB_SCENE_ID: &str = "tavern.dripping_goblet";

/// A weighted candidate in an act pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Scene id.
    pub scene_id: String,
    /// Relative weight, at least 1.
    pub weight: u32,
    /// Arc flags that must all be set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    /// Arc flags that remove the entry when any is set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<String>,
}

impl PoolEntry {
    /// An ungated entry.
    pub fn new(scene_id: &str, weight: u32) -> Self {
        Self {
            scene_id: scene_id.to_string(),
            weight,
            requires: Vec::new(),
            blocked_by: Vec::new(),
        }
    }

    /// Require an arc flag.
    pub fn requires(mut self, flag: &str) -> Self {
        self.requires.push(flag.to_string());
        self
    }

    /// Drop the entry once an arc flag is set.
    pub fn blocked_by(mut self, flag: &str) -> Self {
        self.blocked_by.push(flag.to_string());
        self
    }

    /// Whether the entry is eligible under the campaign's flags.
    pub fn is_open(&self, campaign: &CampaignState) -> bool {
        self.requires.iter().all(|f| campaign.flag(f))
            && !self.blocked_by.iter().any(|f| campaign.flag(f))
    }
}

/// Authored content for one arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcContent {
    /// Display title.
    pub title: String,
    /// One-line pitch.
    pub blurb: String,
    /// Weight when a new campaign picks its arc.
    pub weight: u32,
    /// Scene forced once act 3 is nearly done.
    pub finale: String,
    /// Candidate scenes per act (1-3).
    pub pools: BTreeMap<u8, Vec<PoolEntry>>,
}

impl ArcContent {
    /// The pool for an act; empty if the act has none.
    pub fn pool(&self, act: u8) -> &[PoolEntry] {
        self.pools.get(&act).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A problem found while validating a catalog.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Scene id, arc id, or `catalog` where the issue was found.
    pub entity: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    pub(crate) fn error(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            message: message.into(),
            is_error: true,
        }
    }

    pub(crate) fn warning(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.entity, self.message)
    }
}

/// Every scene and arc the engine can draw from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    hub_scene_id: String,
    scenes: BTreeMap<String, Scene>,
    arcs: BTreeMap<ArcId, ArcContent>,
}

impl Catalog {
    /// An empty catalog with the given hub id.
    pub fn new(hub_scene_id: &str) -> Self {
        Self {
            hub_scene_id: hub_scene_id.to_string(),
            scenes: BTreeMap::new(),
            arcs: BTreeMap::new(),
        }
    }

    /// The content shipped with the engine.
    pub fn builtin() -> Self {
        crate::content::builtin()
    }

    /// Parse a content pack and reject it if validation reports errors.
    pub fn from_json(json: &str) -> CampaignResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        let errors: Vec<String> = catalog
            .validate()
            .into_iter()
            .filter(|i| i.is_error)
            .map(|i| i.to_string())
            .collect();
        if errors.is_empty() {
            Ok(catalog)
        } else {
            Err(CampaignError::InvalidContent(errors.join("; ")))
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> CampaignResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add or replace a scene.
    pub fn insert_scene(&mut self, scene: Scene) {
        self.scenes.insert(scene.id.clone(), scene);
    }

    /// Add or replace an arc.
    pub fn insert_arc(&mut self, arc: ArcId, content: ArcContent) {
        self.arcs.insert(arc, content);
    }

    /// The hub scene id.
    pub fn hub_scene_id(&self) -> &str {
        &self.hub_scene_id
    }

    /// Strict lookup.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Lookup that falls back to the hub for unknown ids.
    pub fn scene_or_hub(&self, id: &str) -> CampaignResult<&Scene> {
        self.scenes
            .get(id)
            .or_else(|| self.scenes.get(&self.hub_scene_id))
            .ok_or_else(|| CampaignError::UnknownScene(id.to_string()))
    }

    /// All scenes, ordered by id.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the catalog has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Content for one arc.
    pub fn arc(&self, arc: ArcId) -> Option<&ArcContent> {
        self.arcs.get(&arc)
    }

    /// All arcs with content.
    pub fn arcs(&self) -> impl Iterator<Item = (ArcId, &ArcContent)> {
        self.arcs.iter().map(|(id, c)| (*id, c))
    }

    /// Check the catalog for authoring mistakes.
    ///
    /// Errors make the catalog unusable (dangling ids, bad choice counts);
    /// warnings flag content that is legal but probably unintended.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !self.scenes.contains_key(&self.hub_scene_id) {
            issues.push(ValidationIssue::error(
                "catalog",
                format!("hub scene '{}' is missing", self.hub_scene_id),
            ));
        }

        for (key, scene) in &self.scenes {
            validate_scene(key, scene, &self.scenes, &mut issues);
        }

        let mut reachable: BTreeSet<&str> = BTreeSet::new();
        reachable.insert(self.hub_scene_id.as_str());

        for arc in ArcId::ALL {
            let Some(content) = self.arcs.get(&arc) else {
                issues.push(ValidationIssue::error(arc.as_str(), "arc has no content"));
                continue;
            };
            if content.weight == 0 {
                issues.push(ValidationIssue::warning(
                    arc.as_str(),
                    "arc weight is 0; new campaigns never pick it",
                ));
            }
            if !self.scenes.contains_key(&content.finale) {
                issues.push(ValidationIssue::error(
                    arc.as_str(),
                    format!("finale '{}' does not exist", content.finale),
                ));
            }
            reachable.insert(content.finale.as_str());
            for act in 1..=3u8 {
                let pool = content.pool(act);
                if pool.is_empty() {
                    issues.push(ValidationIssue::warning(
                        arc.as_str(),
                        format!("act {act} pool is empty; only filler will appear"),
                    ));
                }
                for entry in pool {
                    reachable.insert(entry.scene_id.as_str());
                    if !self.scenes.contains_key(&entry.scene_id) {
                        issues.push(ValidationIssue::error(
                            arc.as_str(),
                            format!("act {act} pool references unknown scene '{}'", entry.scene_id),
                        ));
                    }
                    if entry.weight == 0 {
                        issues.push(ValidationIssue::error(
                            arc.as_str(),
                            format!("act {act} entry '{}' has weight 0", entry.scene_id),
                        ));
                    }
                }
            }
        }

        for event in REST_EVENTS {
            reachable.insert(event.next_scene_id);
            if !self.scenes.contains_key(event.next_scene_id) {
                issues.push(ValidationIssue::error(
                    event.arc.as_str(),
                    format!("rest event queues unknown scene '{}'", event.next_scene_id),
                ));
            }
        }

        for scene in self.scenes.values() {
            for choice in &scene.choices {
                for outcome in [&choice.on_success, &choice.on_failure] {
                    reachable.extend(outcome.forced_scenes());
                }
            }
        }
        for id in self.scenes.keys() {
            if !reachable.contains(id.as_str()) {
                issues.push(ValidationIssue::warning(
                    id.as_str(),
                    "scene is never selected, forced, or used as a finale",
                ));
            }
        }

        issues
    }
}

fn validate_scene(
    key: &str,
    scene: &Scene,
    scenes: &BTreeMap<String, Scene>,
    issues: &mut Vec<ValidationIssue>,
) {
    if key != scene.id {
        issues.push(ValidationIssue::error(
            key,
            format!("stored under '{key}' but has id '{}'", scene.id),
        ));
    }
    if !(2..=4).contains(&scene.choices.len()) {
        issues.push(ValidationIssue::error(
            key,
            format!("has {} choices (expected 2-4)", scene.choices.len()),
        ));
    }
    let mut ids = BTreeSet::new();
    for choice in &scene.choices {
        if !ids.insert(choice.id.as_str()) {
            issues.push(ValidationIssue::error(
                key,
                format!("duplicate choice id '{}'", choice.id),
            ));
        }
        if !(1..=30).contains(&choice.dc) {
            issues.push(ValidationIssue::error(
                key,
                format!("choice '{}' has DC {} (expected 1-30)", choice.id, choice.dc),
            ));
        }
        for outcome in [&choice.on_success, &choice.on_failure] {
            for target in outcome.forced_scenes() {
                if !scenes.contains_key(target) {
                    issues.push(ValidationIssue::error(
                        key,
                        format!("choice '{}' queues unknown scene '{target}'", choice.id),
                    ));
                }
            }
        }
    }
}

//! Per-campaign story state embedded in the character record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Highest arc progress value.
pub const MAX_PROGRESS: u32 = 100;

/// One of the authored storylines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcId {
    /// The crown audits your adventuring income.
    Taxman,
    /// An unpaid internship with a necromancer.
    Internship,
    /// A mimic that would like to be your friend.
    Mimic,
    /// A treasure map that should not exist.
    Treasure,
    /// A black letter and a debt of blood.
    Vengeance,
}

impl ArcId {
    /// Every arc.
    pub const ALL: [ArcId; 5] = [
        ArcId::Taxman,
        ArcId::Internship,
        ArcId::Mimic,
        ArcId::Treasure,
        ArcId::Vengeance,
    ];

    /// The lowercase identifier used in scene ids and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Taxman => "taxman",
            Self::Internship => "internship",
            Self::Mimic => "mimic",
            Self::Treasure => "treasure",
            Self::Vengeance => "vengeance",
        }
    }

    /// Parse an arc identifier.
    pub fn parse(s: &str) -> MechResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MechError::UnknownArc(s.to_string()))
    }
}

impl std::fmt::Display for ArcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrative phase derived from progress.
pub fn act_for_progress(progress: u32) -> u8 {
    if progress >= 70 {
        3
    } else if progress >= 35 {
        2
    } else {
        1
    }
}

/// Story state for the active arc.
///
/// Progress only moves forward and the act is always recomputed from it, so
/// the two cannot disagree. A saved `act` is ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CampaignRepr")]
pub struct CampaignState {
    arc: ArcId,
    act: u8,
    progress: u32,
    #[serde(default)]
    flags: BTreeMap<String, bool>,
    #[serde(default)]
    seen_scene_ids: Vec<String>,
}

#[derive(Deserialize)]
struct CampaignRepr {
    arc: ArcId,
    progress: u32,
    #[serde(default)]
    flags: BTreeMap<String, bool>,
    #[serde(default)]
    seen_scene_ids: Vec<String>,
}

impl From<CampaignRepr> for CampaignState {
    fn from(repr: CampaignRepr) -> Self {
        let progress = repr.progress.min(MAX_PROGRESS);
        Self {
            arc: repr.arc,
            act: act_for_progress(progress),
            progress,
            flags: repr.flags,
            seen_scene_ids: repr.seen_scene_ids,
        }
    }
}

impl CampaignState {
    /// A fresh campaign at act 1, progress 0.
    pub fn new(arc: ArcId) -> Self {
        Self {
            arc,
            act: 1,
            progress: 0,
            flags: BTreeMap::new(),
            seen_scene_ids: Vec::new(),
        }
    }

    /// The active arc.
    pub fn arc(&self) -> ArcId {
        self.arc
    }

    /// Current act (1-3).
    pub fn act(&self) -> u8 {
        self.act
    }

    /// Current progress (0-100).
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Move progress forward, clamped to 100, and recompute the act.
    pub fn advance(&mut self, amount: u32) {
        self.progress = self.progress.saturating_add(amount).min(MAX_PROGRESS);
        self.act = act_for_progress(self.progress);
    }

    /// Read an arc flag; unset flags are false.
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Set an arc flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    /// All arc flags.
    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    /// Whether a scene was already presented in this arc.
    pub fn has_seen(&self, scene_id: &str) -> bool {
        self.seen_scene_ids.iter().any(|s| s == scene_id)
    }

    /// Record a scene as seen. Already-seen ids are not duplicated.
    pub fn mark_seen(&mut self, scene_id: &str) {
        if !self.has_seen(scene_id) {
            self.seen_scene_ids.push(scene_id.to_string());
        }
    }

    /// Seen scene ids in first-seen order.
    pub fn seen_scene_ids(&self) -> &[String] {
        &self.seen_scene_ids
    }
}

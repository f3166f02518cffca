//! Resource tracks (HP, hit dice, spell slots).
//!
//! A track is a clamped counter between 0 and a maximum. The fields are
//! private so `current <= max` holds for every value that exists, including
//! ones read back from a snapshot.

use serde::{Deserialize, Serialize};

/// A named resource clamped to `0..=max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TrackRepr")]
pub struct Track {
    name: String,
    current: u32,
    max: u32,
}

#[derive(Deserialize)]
struct TrackRepr {
    name: String,
    current: u32,
    max: u32,
}

impl From<TrackRepr> for Track {
    fn from(repr: TrackRepr) -> Self {
        Track::with_current(repr.name, repr.current, repr.max)
    }
}

impl Track {
    /// Create a new track starting at its maximum value.
    pub fn new(name: impl Into<String>, max: u32) -> Self {
        Self {
            name: name.into(),
            current: max,
            max,
        }
    }

    /// Create a track with an explicit current value, clamped to `max`.
    pub fn with_current(name: impl Into<String>, current: u32, max: u32) -> Self {
        Self {
            name: name.into(),
            current: current.min(max),
            max,
        }
    }

    /// Display name of the track.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Maximum value.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Adjust the track by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let next = (i64::from(self.current) + i64::from(delta)).clamp(0, i64::from(self.max));
        self.current = next as u32;
        self.current
    }

    /// Set the current value, clamped to bounds.
    pub fn set_current(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Refill to the maximum.
    pub fn restore(&mut self) {
        self.current = self.max;
    }

    /// Change the maximum and shift the current value by the same delta.
    ///
    /// Growing a track by 3 also grants 3; shrinking it takes them away,
    /// never below zero.
    pub fn resize(&mut self, max: u32) {
        let delta = i64::from(max) - i64::from(self.max);
        self.max = max;
        let next = (i64::from(self.current) + delta).clamp(0, i64::from(max));
        self.current = next as u32;
    }

    /// Returns true if the track is at zero.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true if the track is at its maximum value.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Returns the fraction of the track that is filled (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_max() {
        let t = Track::new("HP", 10);
        assert_eq!(t.current(), 10);
        assert_eq!(t.max(), 10);
        assert!(t.is_full());
    }

    #[test]
    fn adjust_clamps_both_ways() {
        let mut t = Track::new("HP", 10);
        assert_eq!(t.adjust(-4), 6);
        assert_eq!(t.adjust(-20), 0);
        assert!(t.is_empty());
        assert_eq!(t.adjust(50), 10);
    }

    #[test]
    fn with_current_clamps() {
        let t = Track::with_current("Hit Dice", 9, 6);
        assert_eq!(t.current(), 6);
    }

    #[test]
    fn resize_shifts_current() {
        let mut t = Track::with_current("Spell Slots", 1, 2);
        t.resize(3);
        assert_eq!((t.current(), t.max()), (2, 3));
        t.resize(0);
        assert_eq!((t.current(), t.max()), (0, 0));
    }

    #[test]
    fn fraction_handles_zero_max() {
        assert!((Track::new("Spell Slots", 0).fraction() - 1.0).abs() < f64::EPSILON);
        let t = Track::with_current("HP", 5, 10);
        assert!((t.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        let t = Track::with_current("HP", 7, 12);
        assert_eq!(t.to_string(), "HP: 7/12");
    }

    #[test]
    fn deserialize_clamps_overfull_track() {
        let t: Track = serde_json::from_str(r#"{"name":"HP","current":30,"max":12}"#).unwrap();
        assert_eq!(t.current(), 12);
    }
}

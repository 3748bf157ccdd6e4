//! Common types for Setflow
//!
//! Track entries and the energy scale they are rated on.

use serde::{Deserialize, Serialize};

use crate::music::{key_to_camelot, CamelotPosition};

/// Largest BPM change allowed between consecutive tracks
pub const MAX_BPM_DELTA: i64 = 8;

/// Average track length used for set duration estimates (minutes)
pub const DEFAULT_MINUTES_PER_TRACK: f32 = 5.5;

/// A track in a set
///
/// Numeric fields are not range-checked; keeping BPM and energy within a
/// sensible domain is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title (older set files call this `track`)
    #[serde(alias = "track")]
    pub title: String,
    pub artist: String,
    /// Tempo, typically 60-200
    pub bpm: i32,
    /// Key label such as "Am" or "F#"; any string is accepted
    pub key: String,
    /// Energy rating on the set's [`EnergyScale`]
    pub energy: i32,
    /// Free-text transition notes
    #[serde(default)]
    pub notes: String,
}

impl Track {
    /// Create a track without notes
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        bpm: i32,
        key: impl Into<String>,
        energy: i32,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            bpm,
            key: key.into(),
            energy,
            notes: String::new(),
        }
    }

    /// Attach transition notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Camelot wheel position of this track's key
    pub fn camelot(&self) -> CamelotPosition {
        key_to_camelot(&self.key)
    }
}

/// Energy rating scale `1..=max`
///
/// Flow thresholds are fractions of `max`, so the 1-6 and 1-10 scales share
/// one rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct EnergyScale {
    max: u8,
}

impl EnergyScale {
    /// The 1-6 scale (Ambient .. Full Send)
    pub const SIX: EnergyScale = EnergyScale { max: 6 };
    /// The 1-10 scale used by the set builder and presets
    pub const TEN: EnergyScale = EnergyScale { max: 10 };

    /// Create a scale with the given maximum (clamped to at least 1)
    pub const fn new(max: u8) -> Self {
        Self {
            max: if max == 0 { 1 } else { max },
        }
    }

    /// Declared maximum `E_max`
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// `round(E_max / divisor)` with halves rounded up
    pub fn fraction(&self, divisor: u8) -> i64 {
        let max = i64::from(self.max);
        let divisor = i64::from(divisor.max(1));
        (2 * max + divisor) / (2 * divisor)
    }
}

impl Default for EnergyScale {
    fn default() -> Self {
        EnergyScale::SIX
    }
}

impl From<u8> for EnergyScale {
    fn from(max: u8) -> Self {
        EnergyScale::new(max)
    }
}

impl From<EnergyScale> for u8 {
    fn from(scale: EnergyScale) -> Self {
        scale.max
    }
}

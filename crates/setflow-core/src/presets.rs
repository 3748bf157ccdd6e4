//! Built-in set templates
//!
//! Presets are rated on the 1-10 scale and load as ordinary [`SetList`]s that
//! the caller can then edit.

use crate::error::{SetflowError, SetflowResult};
use crate::setlist::SetList;
use crate::types::{EnergyScale, Track};

/// A named template: (title, bpm, key, energy, notes) per track
pub struct Preset {
    pub name: &'static str,
    tracks: &'static [(&'static str, i32, &'static str, i32, &'static str)],
}

impl Preset {
    /// Number of tracks in the template
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Build an editable set from this template
    pub fn to_set_list(&self) -> SetList {
        let tracks = self
            .tracks
            .iter()
            .map(|&(title, bpm, key, energy, notes)| {
                Track::new(title, "TBD", bpm, key, energy).with_notes(notes)
            })
            .collect();
        SetList::with_tracks(self.name, EnergyScale::TEN, tracks)
    }
}

static PRESETS: [Preset; 3] = [
    Preset {
        name: "Opening Set (60min)",
        tracks: &[
            ("Ambient Intro", 116, "Am", 2, "Atmospheric opener"),
            ("Warm Groove", 118, "Cm", 3, "Build the room"),
            ("First Wave", 120, "Dm", 4, "First energy push"),
            ("Sustain", 122, "Em", 4, "Hold the energy"),
            ("Peak Tease", 124, "Fm", 5, "Tease the peak"),
            ("Gentle Close", 120, "Am", 3, "Hand off to next DJ"),
        ],
    },
    Preset {
        name: "Peak Time (90min)",
        tracks: &[
            ("Statement", 124, "Am", 4, "Start with intent"),
            ("Build", 126, "Cm", 5, "Push up"),
            ("Peak 1", 128, "Dm", 7, "First peak"),
            ("Breathe", 126, "Em", 5, "Let them breathe"),
            ("Peak 2", 130, "Fm", 8, "Biggest moment"),
            ("Sustain", 128, "Gm", 7, "Keep it going"),
            ("Cool Down", 124, "Am", 5, "Ease back"),
            ("Close", 122, "Dm", 4, "Smooth close"),
        ],
    },
    Preset {
        name: "After Hours (120min)",
        tracks: &[
            ("Deep Start", 118, "Am", 2, "Minimal, hypnotic"),
            ("Layers", 120, "Cm", 3, "Add texture"),
            ("Dark Build", 124, "Dm", 5, "Underground vibe"),
            ("Tension", 126, "Fm", 6, "Dark peak"),
            ("Release", 124, "Gm", 4, "Breakdown"),
            ("Rebuild", 126, "Am", 6, "Second wave"),
            ("Fade", 122, "Dm", 3, "Wind down"),
            ("Ambient Close", 118, "Am", 1, "Lights up"),
        ],
    },
];

/// All built-in presets
pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Find a preset by name
///
/// Matching is case-insensitive; an unambiguous prefix ("peak") is enough.
pub fn find(name: &str) -> Option<&'static Preset> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    if let Some(exact) = PRESETS.iter().find(|p| p.name.to_lowercase() == wanted) {
        return Some(exact);
    }

    let mut prefixed = PRESETS
        .iter()
        .filter(|p| p.name.to_lowercase().starts_with(&wanted));
    match (prefixed.next(), prefixed.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

/// Load a preset as an editable set
pub fn load(name: &str) -> SetflowResult<SetList> {
    let preset = find(name).ok_or_else(|| SetflowError::UnknownPreset(name.to_string()))?;
    log::info!("Loaded preset '{}' ({} tracks)", preset.name, preset.len());
    Ok(preset.to_set_list())
}

//! Tracklist export and display helpers
//!
//! Plain-text and JSON renderings of a set, the estimated set duration, and
//! the block-character energy bar used in track listings.

use serde::Serialize;

use crate::error::SetflowResult;
use crate::flow::{self, Violation};
use crate::setlist::SetList;
use crate::types::{EnergyScale, Track};

/// Render the set as a numbered text tracklist
///
/// ```text
/// SET LIST
/// 1. Ambient Intro - TBD (116 BPM, Am [8A], energy 2/10)
/// ```
pub fn tracklist_text(set: &SetList) -> String {
    let mut out = String::from("SET LIST\n");
    for (idx, track) in set.tracks().iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {} ({} BPM, {} [{}], energy {}/{})\n",
            idx + 1,
            track.title,
            track.artist,
            track.bpm,
            track.key,
            track.camelot(),
            track.energy,
            set.scale.max()
        ));
    }
    out
}

#[derive(Serialize)]
struct ExportedTrack<'a> {
    position: usize,
    #[serde(flatten)]
    track: &'a Track,
    camelot: String,
}

#[derive(Serialize)]
struct ExportedSet<'a> {
    name: &'a str,
    energy_max: EnergyScale,
    tracks: Vec<ExportedTrack<'a>>,
    violations: Vec<Violation>,
    clean: bool,
}

/// Render the set, with its current violations, as pretty-printed JSON
pub fn tracklist_json(set: &SetList) -> SetflowResult<String> {
    let violations = flow::validate(set.tracks(), set.scale);
    let exported = ExportedSet {
        name: &set.name,
        energy_max: set.scale,
        tracks: set
            .tracks()
            .iter()
            .enumerate()
            .map(|(idx, track)| ExportedTrack {
                position: idx + 1,
                track,
                camelot: track.camelot().to_string(),
            })
            .collect(),
        clean: violations.is_empty(),
        violations,
    };
    Ok(serde_json::to_string_pretty(&exported)?)
}

/// Estimated set length in minutes
pub fn estimate_duration(track_count: usize, minutes_per_track: f32) -> f32 {
    track_count as f32 * minutes_per_track.max(0.0)
}

/// Format a duration in minutes as "45 min" or "1h 6m"
pub fn format_duration(total_minutes: f32) -> String {
    let total = total_minutes.max(0.0) as u32;
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Energy bar such as `████░░ 4/6`
///
/// The drawn bar is clamped to the scale; the printed value is not.
pub fn energy_bar(energy: i32, scale: EnergyScale) -> String {
    let max = usize::from(scale.max());
    let filled = energy.clamp(0, i32::from(scale.max())) as usize;
    format!(
        "{}{} {}/{}",
        "█".repeat(filled),
        "░".repeat(max - filled),
        energy,
        max
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> SetList {
        SetList::with_tracks(
            "Warmup",
            EnergyScale::SIX,
            vec![
                Track::new("Ambient Intro", "TBD", 116, "Am", 2),
                Track::new("Wrong Turn", "TBD", 118, "F#", 3),
            ],
        )
    }

    #[test]
    fn test_tracklist_text() {
        let text = tracklist_text(&sample_set());
        assert_eq!(
            text,
            "SET LIST\n\
             1. Ambient Intro - TBD (116 BPM, Am [8A], energy 2/6)\n\
             2. Wrong Turn - TBD (118 BPM, F# [2B], energy 3/6)\n"
        );
    }

    #[test]
    fn test_tracklist_text_empty() {
        let set = SetList::new("Empty", EnergyScale::SIX);
        assert_eq!(tracklist_text(&set), "SET LIST\n");
    }

    #[test]
    fn test_tracklist_json() {
        let json = tracklist_json(&sample_set()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Warmup");
        assert_eq!(value["energy_max"], 6);
        assert_eq!(value["clean"], false);
        assert_eq!(value["tracks"][0]["position"], 1);
        assert_eq!(value["tracks"][0]["title"], "Ambient Intro");
        assert_eq!(value["tracks"][1]["camelot"], "2B");
        assert_eq!(value["violations"][0]["kind"], "KeyClash");
        assert_eq!(value["violations"][0]["track_index"], 1);
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(estimate_duration(6, 5.5)), "33 min");
        assert_eq!(format_duration(estimate_duration(12, 5.5)), "1h 6m");
        assert_eq!(format_duration(estimate_duration(0, 5.5)), "0 min");
        assert_eq!(format_duration(estimate_duration(4, -1.0)), "0 min");
    }

    #[test]
    fn test_energy_bar() {
        assert_eq!(energy_bar(4, EnergyScale::SIX), "████░░ 4/6");
        assert_eq!(energy_bar(0, EnergyScale::SIX), "░░░░░░ 0/6");
        assert_eq!(energy_bar(9, EnergyScale::SIX), "██████ 9/6");
        assert_eq!(energy_bar(-3, EnergyScale::SIX), "░░░░░░ -3/6");
    }
}

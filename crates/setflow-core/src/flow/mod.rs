//! Set flow validation
//!
//! Checks an ordered track list against the energy, tempo and harmonic
//! rules a DJ applies when sequencing a set:
//!
//! - energy may not jump up by more than `E_max/3` or fall by more than
//!   `E_max/6` between consecutive tracks
//! - BPM may not change by more than 8 between consecutive tracks
//! - consecutive keys must be Camelot-compatible (unknown keys always clash)
//! - the opening track may not exceed `E_max/2`
//!
//! Validation is a pure function of the track list. Violations are advisory:
//! a set with violations is still a usable set.

mod rules;

pub use rules::FlowRules;

use serde::Serialize;
use std::fmt;

use crate::types::{EnergyScale, Track};

/// Kind of flow rule a track breaks
///
/// Variant order is the order violations at the same track index are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ViolationKind {
    OpeningEnergyTooHigh,
    EnergyJump,
    EnergyDrop,
    BpmJump,
    KeyClash,
}

impl ViolationKind {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::OpeningEnergyTooHigh => "Opening energy",
            ViolationKind::EnergyJump => "Energy jump",
            ViolationKind::EnergyDrop => "Energy drop",
            ViolationKind::BpmJump => "BPM jump",
            ViolationKind::KeyClash => "Key clash",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A broken flow rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Zero-based index of the offending track (the later track of a pair)
    pub track_index: usize,
    pub kind: ViolationKind,
    /// Human-readable warning using 1-based track numbers
    pub message: String,
}

impl Violation {
    fn new(track_index: usize, kind: ViolationKind, detail: String) -> Self {
        Self {
            track_index,
            kind,
            message: format!("Track {}: {}", track_index + 1, detail),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validate a set and return every rule violation
///
/// Violations are ordered by track index; within one index the order is
/// energy jump, energy drop, BPM jump, key clash. Empty and single-track
/// sets only get the opening check.
pub fn validate(tracks: &[Track], scale: EnergyScale) -> Vec<Violation> {
    let rules = FlowRules::for_scale(scale);
    let mut violations = Vec::new();

    let Some(first) = tracks.first() else {
        return violations;
    };

    let opening = i64::from(first.energy);
    if opening > rules.max_opening_energy {
        violations.push(Violation::new(
            0,
            ViolationKind::OpeningEnergyTooHigh,
            format!(
                "Opening energy too high ({}, max {})",
                opening, rules.max_opening_energy
            ),
        ));
    }

    for (offset, pair) in tracks.windows(2).enumerate() {
        check_transition(offset + 1, &pair[0], &pair[1], &rules, &mut violations);
    }

    violations
}

/// Check one adjacent pair, appending violations for `index` (the later track)
fn check_transition(
    index: usize,
    prev: &Track,
    curr: &Track,
    rules: &FlowRules,
    violations: &mut Vec<Violation>,
) {
    // Widen before subtracting so extreme inputs cannot overflow
    let energy_diff = i64::from(curr.energy) - i64::from(prev.energy);
    let bpm_diff = (i64::from(curr.bpm) - i64::from(prev.bpm)).abs();

    if energy_diff > rules.max_energy_jump {
        violations.push(Violation::new(
            index,
            ViolationKind::EnergyJump,
            format!(
                "Energy jump +{} (max +{})",
                energy_diff, rules.max_energy_jump
            ),
        ));
    }

    if energy_diff < -rules.max_energy_drop {
        violations.push(Violation::new(
            index,
            ViolationKind::EnergyDrop,
            format!(
                "Energy drop {} (max -{})",
                energy_diff, rules.max_energy_drop
            ),
        ));
    }

    if bpm_diff > rules.max_bpm_delta {
        violations.push(Violation::new(
            index,
            ViolationKind::BpmJump,
            format!("BPM jump {} (max {})", bpm_diff, rules.max_bpm_delta),
        ));
    }

    let (from, to) = (prev.camelot(), curr.camelot());
    if !from.is_compatible_with(&to) {
        violations.push(Violation::new(
            index,
            ViolationKind::KeyClash,
            format!(
                "Key clash {} [{}] -> {} [{}]",
                prev.key, from, curr.key, to
            ),
        ));
    }
}

/// Violations for a set plus the clean/dirty verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetReport {
    pub track_count: usize,
    pub violations: Vec<Violation>,
}

impl SetReport {
    /// True when no rule is broken
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations of one kind
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    /// Violations reported against one track
    pub fn for_track(&self, track_index: usize) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.track_index == track_index)
    }
}

/// Validate a set and wrap the result in a [`SetReport`]
pub fn analyze(tracks: &[Track], scale: EnergyScale) -> SetReport {
    SetReport {
        track_count: tracks.len(),
        violations: validate(tracks, scale),
    }
}

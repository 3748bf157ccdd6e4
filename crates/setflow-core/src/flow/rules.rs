//! Flow rule thresholds derived from the energy scale

use crate::types::{EnergyScale, MAX_BPM_DELTA};

/// Thresholds applied by [`validate`](super::validate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRules {
    /// Largest allowed energy increase between consecutive tracks
    pub max_energy_jump: i64,
    /// Largest allowed energy decrease between consecutive tracks (positive)
    pub max_energy_drop: i64,
    /// Largest allowed BPM change between consecutive tracks
    pub max_bpm_delta: i64,
    /// Highest energy the first track may have
    pub max_opening_energy: i64,
}

impl FlowRules {
    /// Rules for a scale: jump `E_max/3`, drop `E_max/6`, opening `E_max/2`
    pub fn for_scale(scale: EnergyScale) -> Self {
        Self {
            max_energy_jump: scale.fraction(3),
            max_energy_drop: scale.fraction(6),
            max_bpm_delta: MAX_BPM_DELTA,
            max_opening_energy: scale.fraction(2),
        }
    }
}

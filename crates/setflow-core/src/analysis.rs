//! Ingestion of external BPM/key analysis
//!
//! Audio analysis happens elsewhere. An analyzer reports a float BPM and a
//! key label, and this module folds that into a [`Track`]. Key labels are
//! stored verbatim: labels outside the key table are legal and simply show up
//! as key clashes when the set is validated.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Track;

/// BPM and key reported by an analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub bpm: f32,
    pub key: String,
}

/// Errors reported by, or about, an analysis service
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service could not analyse the file
    #[error("Analysis unavailable: {0}")]
    Unavailable(String),

    /// The service returned a BPM that is not a finite number
    #[error("Analysis returned invalid BPM {0}")]
    InvalidBpm(f32),
}

/// Source of BPM/key analysis for audio files
pub trait TrackAnalyzer {
    fn analyze(&self, path: &Path) -> Result<AnalysisResult, AnalysisError>;
}

impl AnalysisResult {
    /// BPM rounded to the nearest whole beat
    pub fn rounded_bpm(&self) -> Result<i32, AnalysisError> {
        if !self.bpm.is_finite() {
            return Err(AnalysisError::InvalidBpm(self.bpm));
        }
        // `as` saturates for values beyond i32
        Ok(self.bpm.round() as i32)
    }

    /// Overwrite a track's BPM and key with the analysed values
    pub fn apply_to(&self, track: &mut Track) -> Result<(), AnalysisError> {
        track.bpm = self.rounded_bpm()?;
        track.key = self.key.clone();
        Ok(())
    }
}

/// Run an analyzer on `path` and apply the result to `track`
///
/// On failure the track is left untouched.
pub fn analyze_into<A: TrackAnalyzer + ?Sized>(
    analyzer: &A,
    path: &Path,
    track: &mut Track,
) -> Result<(), AnalysisError> {
    let result = analyzer.analyze(path)?;
    log::info!(
        "Analysis for {:?}: {:.1} BPM, key {:?}",
        path,
        result.bpm,
        result.key
    );
    result.apply_to(track)
}

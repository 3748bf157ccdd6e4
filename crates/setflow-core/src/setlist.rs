//! Caller-owned set list
//!
//! An ordered collection of tracks with the editing operations a set planner
//! needs. The list never caches a validation result: call
//! [`SetList::validate`] after every edit.

use crate::error::{SetflowError, SetflowResult};
use crate::flow::{self, SetReport, Violation};
use crate::types::{EnergyScale, Track};

/// An ordered set of tracks rated on one energy scale
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetList {
    pub name: String,
    pub scale: EnergyScale,
    tracks: Vec<Track>,
}

impl SetList {
    /// Create an empty set
    pub fn new(name: impl Into<String>, scale: EnergyScale) -> Self {
        Self {
            name: name.into(),
            scale,
            tracks: Vec::new(),
        }
    }

    /// Create a set from existing tracks
    pub fn with_tracks(name: impl Into<String>, scale: EnergyScale, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            scale,
            tracks,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Append a track to the end of the set
    pub fn push(&mut self, track: Track) {
        log::debug!("SetList[{}]: add '{}' at {}", self.name, track.title, self.tracks.len());
        self.tracks.push(track);
    }

    /// Insert a track at `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, track: Track) -> SetflowResult<()> {
        if index > self.tracks.len() {
            return Err(self.out_of_range(index));
        }
        log::debug!("SetList[{}]: insert '{}' at {}", self.name, track.title, index);
        self.tracks.insert(index, track);
        Ok(())
    }

    /// Remove and return the track at `index`
    pub fn remove(&mut self, index: usize) -> SetflowResult<Track> {
        if index >= self.tracks.len() {
            return Err(self.out_of_range(index));
        }
        let track = self.tracks.remove(index);
        log::debug!("SetList[{}]: removed '{}' from {}", self.name, track.title, index);
        Ok(track)
    }

    /// Move the track at `from` so it ends up at index `to`
    pub fn move_track(&mut self, from: usize, to: usize) -> SetflowResult<()> {
        let len = self.tracks.len();
        if from >= len {
            return Err(self.out_of_range(from));
        }
        if to >= len {
            return Err(self.out_of_range(to));
        }
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        log::debug!("SetList[{}]: moved track {} -> {}", self.name, from, to);
        Ok(())
    }

    /// Remove every track
    pub fn clear(&mut self) {
        log::debug!("SetList[{}]: cleared {} tracks", self.name, self.tracks.len());
        self.tracks.clear();
    }

    /// Current flow violations
    pub fn validate(&self) -> Vec<Violation> {
        flow::validate(&self.tracks, self.scale)
    }

    /// Current flow violations with the clean/dirty verdict
    pub fn report(&self) -> SetReport {
        flow::analyze(&self.tracks, self.scale)
    }

    fn out_of_range(&self, index: usize) -> SetflowError {
        SetflowError::IndexOutOfRange {
            index,
            len: self.tracks.len(),
        }
    }
}

//! Setflow Core - energy-flow and harmonic compatibility checks for DJ sets
//!
//! The two pieces everything else builds on are pure and total:
//!
//! - [`music`] maps key labels onto the Camelot wheel and answers
//!   "can these two keys be mixed directly?"
//! - [`flow`] validates an ordered track list against the energy, tempo and
//!   key rules and returns every violation
//!
//! Around them sit the caller-owned [`setlist::SetList`], built-in
//! [`presets`], tracklist [`export`], set files, analysis ingestion and
//! configuration.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod flow;
pub mod music;
pub mod presets;
pub mod setfile;
pub mod setlist;
pub mod types;

pub use error::{SetflowError, SetflowResult};
pub use flow::{analyze, validate, SetReport, Violation, ViolationKind};
pub use music::{are_compatible, compatible_neighbors, key_to_camelot, CamelotPosition, Lane};
pub use setlist::SetList;
pub use types::*;

//! Set files on disk
//!
//! A set file holds an optional name and energy scale plus the ordered
//! tracks. The format follows the file extension: `.yaml`/`.yml` or `.json`.
//!
//! ```yaml
//! name: Friday warmup
//! energy_max: 6
//! tracks:
//!   - title: Ambient Intro
//!     artist: TBD
//!     bpm: 116
//!     key: Am
//!     energy: 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SetflowError, SetflowResult};
use crate::setlist::SetList;
use crate::types::{EnergyScale, Track};

/// On-disk representation of a set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Energy scale maximum; falls back to the configured scale when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_max: Option<EnergyScale>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_for(path: &Path) -> SetflowResult<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(SetflowError::UnsupportedFormat(path.to_path_buf())),
    }
}

impl SetFile {
    /// Read a set file
    pub fn load(path: &Path) -> SetflowResult<Self> {
        let format = format_for(path)?;
        log::info!("SetFile::load: Loading {:?}", path);

        let contents = std::fs::read_to_string(path).map_err(|source| SetflowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SetFile = match format {
            Format::Yaml => serde_yaml::from_str(&contents)?,
            Format::Json => serde_json::from_str(&contents)?,
        };

        log::info!("SetFile::load: {} tracks from {:?}", file.tracks.len(), path);
        Ok(file)
    }

    /// Write a set file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> SetflowResult<()> {
        let format = format_for(path)?;
        log::info!("SetFile::save: Saving {} tracks to {:?}", self.tracks.len(), path);

        let io_err = |source| SetflowError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = match format {
            Format::Yaml => serde_yaml::to_string(self)?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, contents).map_err(io_err)
    }

    /// Turn the file into an editable set
    ///
    /// `default_scale` applies when the file does not declare `energy_max`.
    /// Files without a name are named after their file stem.
    pub fn into_set_list(self, path: &Path, default_scale: EnergyScale) -> SetList {
        let name = self.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled set".to_string())
        });
        let scale = self.energy_max.unwrap_or(default_scale);
        SetList::with_tracks(name, scale, self.tracks)
    }
}

impl From<&SetList> for SetFile {
    fn from(set: &SetList) -> Self {
        Self {
            name: Some(set.name.clone()),
            energy_max: Some(set.scale),
            tracks: set.tracks().to_vec(),
        }
    }
}

/// Load a set file straight into a [`SetList`]
pub fn load_set(path: &Path, default_scale: EnergyScale) -> SetflowResult<SetList> {
    Ok(SetFile::load(path)?.into_set_list(path, default_scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SetList {
        SetList::with_tracks(
            "Friday warmup",
            EnergyScale::SIX,
            vec![
                Track::new("Ambient Intro", "TBD", 116, "Am", 2).with_notes("Atmospheric opener"),
                Track::new("Warm Groove", "TBD", 118, "C", 3),
            ],
        )
    }

    #[test]
    fn test_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["sets/friday.yaml", "sets/friday.json"] {
            let path = dir.path().join(name);
            SetFile::from(&sample()).save(&path).unwrap();
            let loaded = load_set(&path, EnergyScale::TEN).unwrap();
            assert_eq!(loaded, sample(), "{}", name);
        }
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saturday.yml");
        std::fs::write(
            &path,
            "tracks:\n  - track: Deep Start\n    artist: TBD\n    bpm: 118\n    key: Am\n    energy: 2\n",
        )
        .unwrap();

        let set = load_set(&path, EnergyScale::TEN).unwrap();
        assert_eq!(set.name, "saturday");
        assert_eq!(set.scale, EnergyScale::TEN);
        assert_eq!(set.tracks()[0].title, "Deep Start");
    }

    #[test]
    fn test_energy_max_is_a_plain_number() {
        let file = SetFile::from(&sample());
        let yaml = serde_yaml::to_string(&file).unwrap();
        assert!(yaml.contains("energy_max: 6"));

        let zero: SetFile = serde_yaml::from_str("energy_max: 0\ntracks: []\n").unwrap();
        assert_eq!(zero.energy_max.map(|s| s.max()), Some(1));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SetFile::load(Path::new("/sets/friday.txt"));
        assert!(matches!(result, Err(SetflowError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SetFile::load(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(SetflowError::Io { .. })));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "tracks: [not a track]").unwrap();
        assert!(matches!(SetFile::load(&path), Err(SetflowError::Yaml(_))));
    }
}

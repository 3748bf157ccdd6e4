//! Subcommand implementations
//!
//! Every command writes to a caller-supplied writer so the output can be
//! captured in tests.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use setflow_core::config::SetflowConfig;
use setflow_core::export::{
    energy_bar, estimate_duration, format_duration, tracklist_json, tracklist_text,
};
use setflow_core::music::{key_to_camelot, CamelotPosition};
use setflow_core::{presets, setfile, EnergyScale, SetList};

use crate::cli::{ExportFormat, SetSource};

/// Outcome of `setflow check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Clean,
    Violations(usize),
}

/// Load the set named by `source`
///
/// `--energy-max` wins over the scale declared by the file or preset.
pub fn load_set(source: &SetSource, config: &SetflowConfig) -> Result<SetList> {
    let mut set = match (&source.file, &source.preset) {
        (_, Some(name)) => presets::load(name)?,
        (Some(path), None) => setfile::load_set(path, config.energy_scale())
            .with_context(|| format!("Failed to load set file {:?}", path))?,
        (None, None) => bail!("No set given: pass a set file or --preset"),
    };
    if let Some(max) = source.energy_max {
        set.scale = EnergyScale::new(max);
    }
    Ok(set)
}

pub fn check(out: &mut impl Write, set: SetList, config: &SetflowConfig) -> Result<CheckOutcome> {
    writeln!(out, "{} ({} tracks, energy 1-{})", set.name, set.len(), set.scale.max())?;
    writeln!(out)?;
    for (idx, track) in set.tracks().iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} - {} | {} BPM | {} [{}] | {}",
            idx + 1,
            track.title,
            track.artist,
            track.bpm,
            track.key,
            track.camelot(),
            energy_bar(track.energy, set.scale)
        )?;
    }
    writeln!(out)?;

    let report = set.report();
    if report.is_clean() {
        writeln!(out, "Flow and harmonic compatibility look clean.")?;
    } else {
        for violation in &report.violations {
            writeln!(out, "WARNING {}", violation)?;
        }
    }

    let minutes = estimate_duration(set.len(), config.minutes_per_track);
    writeln!(out, "Est. set duration: {}", format_duration(minutes))?;

    log::debug!("check: {} violations in '{}'", report.violations.len(), set.name);
    Ok(if report.is_clean() {
        CheckOutcome::Clean
    } else {
        CheckOutcome::Violations(report.violations.len())
    })
}

/// Resolve a key label, falling back to a Camelot code like "8A"
fn resolve_position(key: &str) -> CamelotPosition {
    match key_to_camelot(key) {
        CamelotPosition::Unknown => key.parse().unwrap_or(CamelotPosition::Unknown),
        position => position,
    }
}

fn describe(position: &CamelotPosition) -> String {
    match position.key() {
        Some(key) => format!("{} ({})", position, key),
        None => position.to_string(),
    }
}

pub fn camelot(out: &mut impl Write, key: &str) -> Result<()> {
    let position = resolve_position(key);
    if !position.is_known() {
        writeln!(out, "{}: unknown key", key)?;
        return Ok(());
    }

    writeln!(out, "{}: {}", key, describe(&position))?;
    let neighbors: Vec<String> = position.neighbors().iter().map(describe).collect();
    writeln!(out, "Compatible: {}", neighbors.join(", "))?;
    Ok(())
}

pub fn compat(out: &mut impl Write, key1: &str, key2: &str) -> Result<bool> {
    let (p1, p2) = (resolve_position(key1), resolve_position(key2));
    let compatible = p1.is_compatible_with(&p2);
    if compatible {
        writeln!(out, "Compatible: {} ({}) -> {} ({})", key1, p1, key2, p2)?;
    } else {
        writeln!(
            out,
            "Risky mix: {} ({}) -> {} ({}). Consider a bridge track.",
            key1, p1, key2, p2
        )?;
    }
    Ok(compatible)
}

pub fn list_presets(out: &mut impl Write) -> Result<()> {
    for preset in presets::all() {
        writeln!(out, "{} ({} tracks)", preset.name, preset.len())?;
    }
    Ok(())
}

pub fn export(
    out: &mut impl Write,
    set: &SetList,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = match format {
        ExportFormat::Text => tracklist_text(set),
        ExportFormat::Json => tracklist_json(set)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write tracklist to {:?}", path))?;
            log::info!("Exported '{}' to {:?}", set.name, path);
            writeln!(out, "Exported {} tracks to {}", set.len(), path.display())?;
        }
        None => write!(out, "{}", rendered)?,
    }
    Ok(())
}

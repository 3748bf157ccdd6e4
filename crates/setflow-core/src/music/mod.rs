//! Music theory utilities for harmonic mixing
//!
//! Provides key parsing and Camelot wheel lookups. The wheel has 12 slots,
//! each with an A lane (minor keys) and a B lane (major keys). Two tracks are
//! safe to mix directly when their keys sit on the same position, on the
//! relative major/minor of each other, or one slot apart on the same lane.
//!
//! Every lookup is total: labels that are not recognised resolve to
//! [`CamelotPosition::Unknown`], which is never compatible with anything.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of slots on the Camelot wheel
pub const WHEEL_SLOTS: u8 = 12;

/// Every key label accepted by [`key_to_camelot`], major then minor.
///
/// Sharp and flat spellings are both listed for the five black-key roots.
pub const KEY_LABELS: [&str; 34] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb",
    "B", "Cm", "C#m", "Dbm", "Dm", "D#m", "Ebm", "Em", "Fm", "F#m", "Gbm", "Gm", "G#m", "Abm",
    "Am", "A#m", "Bbm", "Bm",
];

// Indexed by root (0=C, 1=C#, ...)
// Major keys (B): C=8, G=9, D=10, A=11, E=12, B=1, F#=2, Db=3, Ab=4, Eb=5, Bb=6, F=7
// Minor keys (A): Am=8, Em=9, Bm=10, F#m=11, C#m=12, G#m=1, D#m=2, Bbm=3, Fm=4, Cm=5, Gm=6, Dm=7
const CAMELOT_MAJOR: [u8; 12] = [8, 3, 10, 5, 12, 7, 2, 9, 4, 11, 6, 1];
const CAMELOT_MINOR: [u8; 12] = [5, 12, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10];

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Lane on the Camelot wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    /// Minor keys
    A,
    /// Major keys
    B,
}

impl Lane {
    /// The other lane (relative major/minor swap)
    pub fn opposite(self) -> Self {
        match self {
            Lane::A => Lane::B,
            Lane::B => Lane::A,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Lane::A => 'A',
            Lane::B => 'B',
        }
    }
}

/// Position of a key on the Camelot wheel
///
/// `Unknown` is the sentinel for labels outside the key table. It sorts after
/// every known position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CamelotPosition {
    /// A slot in `1..=12` on one of the two lanes
    Known { slot: u8, lane: Lane },
    /// Unrecognised key label
    Unknown,
}

impl CamelotPosition {
    /// Build a position, returning `Unknown` for slots outside `1..=12`
    pub fn new(slot: u8, lane: Lane) -> Self {
        if (1..=WHEEL_SLOTS).contains(&slot) {
            CamelotPosition::Known { slot, lane }
        } else {
            CamelotPosition::Unknown
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CamelotPosition::Known { .. })
    }

    /// Whether a track at `self` can be mixed directly into one at `other`
    ///
    /// Compatible means same position, relative major/minor (same slot,
    /// opposite lane), or a perfect-fifth shift (same lane, slots one apart
    /// with 12 wrapping to 1). Anything involving `Unknown` is incompatible.
    pub fn is_compatible_with(&self, other: &CamelotPosition) -> bool {
        match (*self, *other) {
            (
                CamelotPosition::Known { slot: s1, lane: l1 },
                CamelotPosition::Known { slot: s2, lane: l2 },
            ) => s1 == s2 || (l1 == l2 && wheel_distance(s1, s2) == 1),
            _ => false,
        }
    }

    /// The positions compatible with this one, including itself
    ///
    /// Returns at most four positions; empty for `Unknown`.
    pub fn neighbors(&self) -> BTreeSet<CamelotPosition> {
        let CamelotPosition::Known { slot, lane } = *self else {
            return BTreeSet::new();
        };

        [
            *self,
            CamelotPosition::Known { slot, lane: lane.opposite() },
            CamelotPosition::Known { slot: step_slot(slot, 1), lane },
            CamelotPosition::Known { slot: step_slot(slot, -1), lane },
        ]
        .into_iter()
        .collect()
    }

    /// The key at this position, spelled with sharps
    pub fn key(&self) -> Option<MusicalKey> {
        let CamelotPosition::Known { slot, lane } = *self else {
            return None;
        };
        let table = match lane {
            Lane::A => &CAMELOT_MINOR,
            Lane::B => &CAMELOT_MAJOR,
        };
        table
            .iter()
            .position(|&s| s == slot)
            .map(|root| MusicalKey::new(root as u8, lane == Lane::A))
    }
}

impl fmt::Display for CamelotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CamelotPosition::Known { slot, lane } => write!(f, "{}{}", slot, lane.letter()),
            CamelotPosition::Unknown => write!(f, "?"),
        }
    }
}

/// Error parsing a Camelot code such as `"8A"`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Camelot code '{0}' (expected 1A-12A or 1B-12B)")]
pub struct ParseCamelotError(pub String);

impl FromStr for CamelotPosition {
    type Err = ParseCamelotError;

    /// Parse a Camelot code like `"8A"` or `"12b"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseCamelotError(s.to_string());

        let mut chars = trimmed.chars();
        let lane = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('A') => Lane::A,
            Some('B') => Lane::B,
            _ => return Err(invalid()),
        };
        let digits = chars.as_str();
        // Plain digits only: no sign, no leading zero
        if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let slot: u8 = digits.parse().map_err(|_| invalid())?;

        match CamelotPosition::new(slot, lane) {
            CamelotPosition::Unknown => Err(invalid()),
            position => Ok(position),
        }
    }
}

/// Musical key with root note and scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicalKey {
    /// Root note as semitone offset from C (0=C, 1=C#, 2=D, ..., 11=B)
    pub root: u8,
    /// true = minor, false = major
    pub minor: bool,
}

impl MusicalKey {
    /// Create a new musical key
    pub const fn new(root: u8, minor: bool) -> Self {
        Self {
            root: root % 12,
            minor,
        }
    }

    /// Parse a key label like "Am", "C#m", "F", "Bb"
    ///
    /// Labels are case-sensitive: an uppercase root letter, an optional `#`
    /// or `b`, and an optional `m` for minor. Nothing else is allowed, so
    /// padded labels like `" Am "` are rejected. Spellings without a
    /// conventional key signature (`E#`, `B#`, `Cb`, `Fb`) are rejected too.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();

        let letter = chars.next()?;
        let base_root: u8 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let rest = chars.as_str();
        let (root, rest) = if let Some(rest) = rest.strip_prefix('#') {
            if matches!(letter, 'E' | 'B') {
                return None;
            }
            ((base_root + 1) % 12, rest)
        } else if let Some(rest) = rest.strip_prefix('b') {
            if matches!(letter, 'C' | 'F') {
                return None;
            }
            ((base_root + 11) % 12, rest) // +11 is same as -1 mod 12
        } else {
            (base_root, rest)
        };

        let minor = match rest {
            "" => false,
            "m" => true,
            _ => return None,
        };

        Some(Self { root, minor })
    }

    /// Get the relative major/minor key
    ///
    /// For minor keys: relative major is 3 semitones up
    /// For major keys: relative minor is 3 semitones down
    pub fn relative(&self) -> Self {
        if self.minor {
            Self::new(self.root + 3, false)
        } else {
            Self::new(self.root + 9, true) // +9 is same as -3 mod 12
        }
    }

    /// Get the Camelot wheel position
    pub fn camelot(&self) -> CamelotPosition {
        let root = (self.root % 12) as usize;
        if self.minor {
            CamelotPosition::Known { slot: CAMELOT_MINOR[root], lane: Lane::A }
        } else {
            CamelotPosition::Known { slot: CAMELOT_MAJOR[root], lane: Lane::B }
        }
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = NOTE_NAMES[(self.root % 12) as usize];
        if self.minor {
            write!(f, "{}m", note)
        } else {
            write!(f, "{}", note)
        }
    }
}

/// Map a key label to its Camelot position
///
/// Unrecognised labels (empty, malformed, lowercase, Camelot codes) map to
/// [`CamelotPosition::Unknown`].
pub fn key_to_camelot(key: &str) -> CamelotPosition {
    MusicalKey::parse(key)
        .map(|k| k.camelot())
        .unwrap_or(CamelotPosition::Unknown)
}

/// Check whether two key labels are safe to mix directly
///
/// Symmetric. Returns `false` if either label is unrecognised.
pub fn are_compatible(key1: &str, key2: &str) -> bool {
    key_to_camelot(key1).is_compatible_with(&key_to_camelot(key2))
}

/// Positions compatible with the given key label, including its own
///
/// Empty when the label is unrecognised.
pub fn compatible_neighbors(key: &str) -> BTreeSet<CamelotPosition> {
    key_to_camelot(key).neighbors()
}

/// Shortest distance between two slots around the wheel (0..=6)
fn wheel_distance(a: u8, b: u8) -> u8 {
    let diff = (i16::from(a) - i16::from(b)).rem_euclid(i16::from(WHEEL_SLOTS)) as u8;
    diff.min(WHEEL_SLOTS - diff)
}

/// Move `steps` slots around the wheel, wrapping 12 -> 1
fn step_slot(slot: u8, steps: i16) -> u8 {
    let zero_based = (i16::from(slot) - 1 + steps).rem_euclid(i16::from(WHEEL_SLOTS));
    zero_based as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pos(slot: u8, lane: Lane) -> CamelotPosition {
        CamelotPosition::new(slot, lane)
    }

    #[test]
    fn test_parse_major_keys() {
        assert_eq!(MusicalKey::parse("C"), Some(MusicalKey::new(0, false)));
        assert_eq!(MusicalKey::parse("G"), Some(MusicalKey::new(7, false)));
        assert_eq!(MusicalKey::parse("F#"), Some(MusicalKey::new(6, false)));
        assert_eq!(MusicalKey::parse("Bb"), Some(MusicalKey::new(10, false)));
        assert_eq!(MusicalKey::parse("Db"), Some(MusicalKey::new(1, false)));
    }

    #[test]
    fn test_parse_minor_keys() {
        assert_eq!(MusicalKey::parse("Am"), Some(MusicalKey::new(9, true)));
        assert_eq!(MusicalKey::parse("Em"), Some(MusicalKey::new(4, true)));
        assert_eq!(MusicalKey::parse("C#m"), Some(MusicalKey::new(1, true)));
        assert_eq!(MusicalKey::parse("Bbm"), Some(MusicalKey::new(10, true)));
        assert_eq!(MusicalKey::parse("F#m"), Some(MusicalKey::new(6, true)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for label in ["", "   ", "am", "c", "H", "Amin", "A minor", "8A", "E#", "Cb", "C##", "Cmm"] {
            assert_eq!(MusicalKey::parse(label), None, "label {:?}", label);
        }
        for label in [" Am ", "Am\n", "\tC", "F# "] {
            assert_eq!(MusicalKey::parse(label), None, "label {:?}", label);
            assert_eq!(key_to_camelot(label), CamelotPosition::Unknown);
        }
    }

    #[test]
    fn test_relative_keys() {
        let am = MusicalKey::parse("Am").unwrap();
        let c = MusicalKey::parse("C").unwrap();
        assert_eq!(am.relative(), c);
        assert_eq!(c.relative(), am);

        let em = MusicalKey::parse("Em").unwrap();
        let g = MusicalKey::parse("G").unwrap();
        assert_eq!(em.relative(), g);
        assert_eq!(g.relative(), em);
    }

    #[test]
    fn test_camelot_table() {
        assert_eq!(key_to_camelot("Am"), pos(8, Lane::A));
        assert_eq!(key_to_camelot("C"), pos(8, Lane::B));
        assert_eq!(key_to_camelot("F#"), pos(2, Lane::B));
        assert_eq!(key_to_camelot("Abm"), pos(1, Lane::A));
        assert_eq!(key_to_camelot("Fm"), pos(4, Lane::A));
        assert_eq!(key_to_camelot("E"), pos(12, Lane::B));
        assert_eq!(key_to_camelot("B"), pos(1, Lane::B));
        assert_eq!(key_to_camelot("Dm"), pos(7, Lane::A));
    }

    #[test]
    fn test_relative_shares_slot() {
        for label in KEY_LABELS {
            let key = MusicalKey::parse(label).unwrap();
            let (CamelotPosition::Known { slot: s1, lane: l1 }, CamelotPosition::Known { slot: s2, lane: l2 }) =
                (key.camelot(), key.relative().camelot())
            else {
                panic!("{} should map to a known position", label);
            };
            assert_eq!(s1, s2);
            assert_eq!(l1, l2.opposite());
        }
    }

    #[test]
    fn test_table_covers_all_positions() {
        let positions: BTreeSet<_> = KEY_LABELS.iter().map(|k| key_to_camelot(k)).collect();
        assert_eq!(positions.len(), 24);
        assert!(!positions.contains(&CamelotPosition::Unknown));
    }

    #[test]
    fn test_enharmonic_equivalence() {
        let pairs = [
            ("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb"),
            ("C#m", "Dbm"), ("D#m", "Ebm"), ("F#m", "Gbm"), ("G#m", "Abm"), ("A#m", "Bbm"),
        ];
        for (sharp, flat) in pairs {
            assert_eq!(key_to_camelot(sharp), key_to_camelot(flat), "{} vs {}", sharp, flat);
        }
    }

    #[test]
    fn test_compatibility_rules() {
        // same key
        assert!(are_compatible("Am", "Am"));
        // relative major/minor
        assert!(are_compatible("Am", "C"));
        // perfect fifth on the same lane
        assert!(are_compatible("Am", "Em"));
        assert!(are_compatible("Am", "Dm"));
        // 12 wraps to 1
        assert!(are_compatible("E", "B"));
        assert!(are_compatible("C#m", "G#m"));

        // two slots apart
        assert!(!are_compatible("Am", "Bm"));
        // adjacent slot, opposite lane
        assert!(!are_compatible("Am", "G"));
        assert!(!are_compatible("Am", "F#"));
    }

    #[test]
    fn test_unknown_key_closure() {
        assert_eq!(key_to_camelot("garbage"), CamelotPosition::Unknown);
        assert!(!are_compatible("garbage", "Am"));
        assert!(!are_compatible("Am", ""));
        assert!(!are_compatible("garbage", "garbage"));
        assert!(compatible_neighbors("garbage").is_empty());
    }

    #[test]
    fn test_compatible_neighbors() {
        let expected: BTreeSet<_> = [
            pos(8, Lane::A),
            pos(8, Lane::B),
            pos(7, Lane::A),
            pos(9, Lane::A),
        ]
        .into_iter()
        .collect();
        assert_eq!(compatible_neighbors("Am"), expected);

        let wrap = compatible_neighbors("E");
        assert!(wrap.contains(&pos(1, Lane::B)));
        assert!(wrap.contains(&pos(11, Lane::B)));
        assert!(wrap.contains(&pos(12, Lane::A)));
    }

    #[test]
    fn test_neighbors_match_compatibility() {
        for a in KEY_LABELS {
            let neighbors = compatible_neighbors(a);
            for b in KEY_LABELS {
                assert_eq!(neighbors.contains(&key_to_camelot(b)), are_compatible(a, b), "{} -> {}", a, b);
            }
        }
    }

    #[test]
    fn test_camelot_display_and_parse() {
        assert_eq!(pos(8, Lane::A).to_string(), "8A");
        assert_eq!(pos(12, Lane::B).to_string(), "12B");
        assert_eq!(CamelotPosition::Unknown.to_string(), "?");

        assert_eq!("8A".parse::<CamelotPosition>(), Ok(pos(8, Lane::A)));
        assert_eq!("12b".parse::<CamelotPosition>(), Ok(pos(12, Lane::B)));
        assert!("13A".parse::<CamelotPosition>().is_err());
        assert!("0B".parse::<CamelotPosition>().is_err());
        assert!("Am".parse::<CamelotPosition>().is_err());
        assert!("+8A".parse::<CamelotPosition>().is_err());
        assert!("08A".parse::<CamelotPosition>().is_err());
        assert!("A".parse::<CamelotPosition>().is_err());
        assert!("-1B".parse::<CamelotPosition>().is_err());
    }

    #[test]
    fn test_position_key_lookup() {
        assert_eq!(pos(8, Lane::A).key(), MusicalKey::parse("Am"));
        assert_eq!(pos(3, Lane::B).key(), MusicalKey::parse("Db"));
        assert_eq!(CamelotPosition::Unknown.key(), None);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(MusicalKey::parse("Am").unwrap().to_string(), "Am");
        assert_eq!(MusicalKey::parse("C").unwrap().to_string(), "C");
        assert_eq!(MusicalKey::parse("F#m").unwrap().to_string(), "F#m");
        assert_eq!(MusicalKey::parse("Bb").unwrap().to_string(), "A#"); // Normalized to sharps
    }

    proptest! {
        #[test]
        fn prop_compatibility_symmetric(a in prop::sample::select(KEY_LABELS.to_vec()), b in prop::sample::select(KEY_LABELS.to_vec())) {
            prop_assert_eq!(are_compatible(a, b), are_compatible(b, a));
        }

        #[test]
        fn prop_self_compatible(k in prop::sample::select(KEY_LABELS.to_vec())) {
            prop_assert!(are_compatible(k, k));
        }

        #[test]
        fn prop_any_string_is_total(s in ".*", k in prop::sample::select(KEY_LABELS.to_vec())) {
            let position = key_to_camelot(&s);
            prop_assert_eq!(are_compatible(&s, k), are_compatible(k, &s));
            if position == CamelotPosition::Unknown {
                prop_assert!(!are_compatible(&s, k));
            }
        }
    }
}

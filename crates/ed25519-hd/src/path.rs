//! Derivation path grammar and parsing.
//!
//! A path is the root marker `m` followed by one to five `/`-separated decimal
//! segments. The accepted shapes are:
//!
//! ```text
//! m/a'
//! m/a'/b'
//! m/a'/b'/c'
//! m/a'/b'/c'/d
//! m/a'/b'/c'/d/e
//! ```
//!
//! The first three segments must carry the `'` marker and the last two must
//! not. The marker is notation only: every element is derived hardened.

use std::{fmt, num::IntErrorKind, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::DerivationError;

/// Root marker every path starts with.
const ROOT: &str = "m";

/// Marker suffix on the hardened segments.
const HARDENED_MARKER: char = '\'';

/// Maximum number of segments in a path.
pub const MAX_DEPTH: usize = 5;

/// Number of leading segments that must be written hardened.
const HARDENED_PREFIX_LEN: usize = 3;

/// Ordered list of unhardened indices parsed from a path string.
///
/// The hardened offset is not stored here; [`crate::derive_path`] adds it to
/// every element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// Number of derivation steps below the master key.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the unhardened indices.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// The unhardened indices as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl From<DerivationPath> for Vec<u32> {
    fn from(path: DerivationPath) -> Self {
        path.0
    }
}

impl TryFrom<Vec<u32>> for DerivationPath {
    type Error = DerivationError;

    fn try_from(indices: Vec<u32>) -> Result<Self, Self::Error> {
        if indices.is_empty() || indices.len() > MAX_DEPTH {
            return Err(DerivationError::InvalidPath);
        }
        Ok(Self(indices))
    }
}

impl TryFrom<&[u32]> for DerivationPath {
    type Error = DerivationError;

    fn try_from(indices: &[u32]) -> Result<Self, Self::Error> {
        Self::try_from(indices.to_vec())
    }
}

impl FromStr for DerivationPath {
    type Err = DerivationError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(path)?;
        let indices = segments
            .into_iter()
            .map(parse_element)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        for (pos, index) in self.0.iter().enumerate() {
            if pos < HARDENED_PREFIX_LEN {
                write!(f, "/{index}{HARDENED_MARKER}")?;
            } else {
                write!(f, "/{index}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Returns `true` if `path` matches the grammar and every element fits in a
/// `u32`.
pub fn is_valid_path(path: &str) -> bool {
    path.parse::<DerivationPath>().is_ok()
}

/// Checks the shape of `path` and returns its segments with the hardening
/// marker stripped.
fn split_segments(path: &str) -> Result<Vec<&str>, DerivationError> {
    let rest = path
        .strip_prefix(ROOT)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or(DerivationError::InvalidPath)?;

    let segments: Vec<&str> = rest.split('/').collect();
    if segments.len() > MAX_DEPTH {
        return Err(DerivationError::InvalidPath);
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(pos, segment)| {
            let hardened = pos < HARDENED_PREFIX_LEN;
            let digits = if hardened {
                segment.strip_suffix(HARDENED_MARKER)
            } else {
                Some(segment)
            };
            match digits {
                Some(d) if !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()) => Ok(d),
                _ => Err(DerivationError::InvalidPath),
            }
        })
        .collect()
}

/// Parses a single base-10 element.
fn parse_element(element: &str) -> Result<u32, DerivationError> {
    element.parse::<u32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => DerivationError::ElementTooLarge,
        _ => DerivationError::InvalidElement {
            element: element.to_owned(),
            source: e,
        },
    })
}

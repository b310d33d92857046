//! Bin Identity
//!
//! A bin is either one of the K numbered bins of a fitted partition or the
//! catch-all bin absorbing everything outside the fitted domain. The
//! catch-all is an explicit variant rather than a reserved trailing index,
//! and it orders after every numbered bin.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of the bin a value was assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinIndex {
    /// Zero-based index into the fitted bins
    Numbered(usize),
    /// Value fell outside every fitted bin; sorts after all numbered bins
    CatchAll,
}

impl BinIndex {
    /// Numbered index, or `None` for the catch-all bin
    pub fn index(&self) -> Option<usize> {
        match self {
            BinIndex::Numbered(i) => Some(*i),
            BinIndex::CatchAll => None,
        }
    }

    /// Whether this is the catch-all bin
    pub fn is_catch_all(&self) -> bool {
        matches!(self, BinIndex::CatchAll)
    }
}

// Wire form is the conventional signed index: numbered bins serialize as
// their zero-based index, the catch-all as -1.
impl Serialize for BinIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BinIndex::Numbered(i) => serializer.serialize_i64(*i as i64),
            BinIndex::CatchAll => serializer.serialize_i64(-1),
        }
    }
}

impl<'de> Deserialize<'de> for BinIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        match raw {
            -1 => Ok(BinIndex::CatchAll),
            i if i >= 0 => Ok(BinIndex::Numbered(i as usize)),
            other => Err(D::Error::custom(format!("invalid bin index {other}"))),
        }
    }
}

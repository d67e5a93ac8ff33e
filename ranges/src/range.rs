use std::fmt;

use rare_sats_math::{big_max, big_min};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::serde::{deserialize_u64, serialize_u64};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("range start {start} is after its end {end}")]
    Inverted { start: u64, end: u64 },

    #[error("half-open range starting at {start} contains no sats")]
    Empty { start: u64 },

    #[error("range end {end} leaves no room for the size of the range")]
    Unbounded { end: u64 },
}

/// A closed interval `[start, end]` of sat ordinals.
///
/// Invariant: `start <= end < u64::MAX`, so [`Range::size`] always fits in a
/// `u64`. [`Range::new`] and [`Range::from_half_open`] enforce it; code that
/// builds a `Range` literal is responsible for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    pub start: u64,
    pub end: u64,
}

impl Range {
    /// Creates the inclusive range `[start, end]`.
    pub fn new(start: u64, end: u64) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        if end == u64::MAX {
            return Err(RangeError::Unbounded { end });
        }
        Ok(Self { start, end })
    }

    /// The range holding only `sat`.
    pub const fn single(sat: u64) -> Self {
        Self {
            start: sat,
            end: sat,
        }
    }

    /// Converts a right-exclusive `[start, end)` into the inclusive `[start, end - 1]`.
    ///
    /// ```rust
    /// use rare_sats_ranges::{Range, RangeError};
    ///
    /// assert_eq!(Range::from_half_open(0, 5_000_000_000), Range::new(0, 4_999_999_999));
    /// assert_eq!(Range::from_half_open(7, 7), Err(RangeError::Empty { start: 7 }));
    /// ```
    pub fn from_half_open(start: u64, end: u64) -> Result<Self, RangeError> {
        if start == end {
            return Err(RangeError::Empty { start });
        }
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self {
            start,
            end: end - 1,
        })
    }

    /// Number of sats in the range, `end - start + 1`.
    pub fn size(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, sat: u64) -> bool {
        self.start <= sat && sat <= self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `[max(starts), min(ends)]`, or `None` when the ranges are disjoint.
    pub fn intersection(&self, other: &Range) -> Option<Range> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Range {
            start: big_max(self.start, [other.start]),
            end: big_min(self.end, [other.end]),
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Lifts individual sats into singleton ranges, keeping their order.
pub fn sats_to_ranges<I>(sats: I) -> Vec<Range>
where
    I: IntoIterator<Item = u64>,
{
    sats.into_iter().map(Range::single).collect()
}

/// Wire form of a range: a two-element array of integers that may be encoded
/// as JSON numbers or decimal strings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RangeRepr(
    #[serde(serialize_with = "serialize_u64", deserialize_with = "deserialize_u64")] u64,
    #[serde(serialize_with = "serialize_u64", deserialize_with = "deserialize_u64")] u64,
);

impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RangeRepr(self.start, self.end).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RangeRepr(start, end) = RangeRepr::deserialize(deserializer)?;
        Range::new(start, end).map_err(serde::de::Error::custom)
    }
}

/// A right-exclusive `[start, end)` range as supplied by sat indexers.
///
/// Deserialization does not validate it; [`HalfOpenRange::to_inclusive`]
/// does, so the caller can attach context (the outpoint) to the error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfOpenRange {
    pub start: u64,
    pub end: u64,
}

impl HalfOpenRange {
    pub fn to_inclusive(&self) -> Result<Range, RangeError> {
        Range::from_half_open(self.start, self.end)
    }
}

impl From<Range> for HalfOpenRange {
    fn from(range: Range) -> Self {
        Self {
            start: range.start,
            end: range.end.saturating_add(1),
        }
    }
}

impl Serialize for HalfOpenRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RangeRepr(self.start, self.end).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HalfOpenRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RangeRepr(start, end) = RangeRepr::deserialize(deserializer)?;
        Ok(HalfOpenRange { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted() {
        assert_eq!(
            Range::new(5, 4),
            Err(RangeError::Inverted { start: 5, end: 4 })
        );
        assert_eq!(
            Range::new(0, u64::MAX),
            Err(RangeError::Unbounded { end: u64::MAX })
        );
        assert_eq!(Range::new(4, 4), Ok(Range::single(4)));
    }

    #[test]
    fn test_from_half_open() {
        assert_eq!(Range::from_half_open(10, 11), Ok(Range::single(10)));
        assert_eq!(
            Range::from_half_open(11, 10),
            Err(RangeError::Inverted { start: 11, end: 10 })
        );
        assert_eq!(
            Range::from_half_open(0, u64::MAX),
            Range::new(0, u64::MAX - 1)
        );
    }

    #[test]
    fn test_size() {
        assert_eq!(Range::single(0).size(), 1);
        assert_eq!(Range::new(0, 4_999_999_999).unwrap().size(), 5_000_000_000);
    }

    #[test]
    fn test_overlaps_and_intersection() {
        let a = Range::new(0, 10).unwrap();
        let b = Range::new(10, 20).unwrap();
        let c = Range::new(11, 20).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));

        assert_eq!(a.intersection(&b), Some(Range::single(10)));
        assert_eq!(a.intersection(&c), None);

        let wide = Range::new(0, 100).unwrap();
        let narrow = Range::new(40, 50).unwrap();
        assert_eq!(wide.intersection(&narrow), Some(narrow));
    }

    #[test]
    fn test_sats_to_ranges() {
        assert_eq!(
            sats_to_ranges([3, 1]),
            vec![Range::single(3), Range::single(1)]
        );
        assert!(sats_to_ranges(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_range_json_accepts_numbers_and_strings() {
        let from_numbers: Range = serde_json::from_str("[0, 4999999999]").unwrap();
        let from_strings: Range = serde_json::from_str(r#"["0", "4999999999"]"#).unwrap();
        assert_eq!(from_numbers, from_strings);
        assert_eq!(
            serde_json::to_string(&from_numbers).unwrap(),
            r#"["0","4999999999"]"#
        );
    }

    #[test]
    fn test_range_json_rejects_inverted_and_floats() {
        assert!(serde_json::from_str::<Range>("[5, 4]").is_err());
        assert!(serde_json::from_str::<Range>("[0, 4999999999.0]").is_err());
    }

    #[test]
    fn test_half_open_json_keeps_precision() {
        // 2^53 + 1 is the first integer an f64 cannot represent.
        let raw: HalfOpenRange =
            serde_json::from_str("[9007199254740993, 9007199254740995]").unwrap();
        assert_eq!(raw.start, 9_007_199_254_740_993);
        assert_eq!(
            raw.to_inclusive().unwrap(),
            Range::new(9_007_199_254_740_993, 9_007_199_254_740_994).unwrap()
        );
        assert_eq!(HalfOpenRange::from(raw.to_inclusive().unwrap()), raw);
    }
}

//! Positions of rare sats inside a UTXO.
//!
//! A UTXO holds its sats in the order of its ranges, so the sat at offset
//! `k` is the `k`-th sat when the ranges are read front to back. Offsets are
//! in that coordinate system, never global ordinals.

use rare_sats_math::{big_max, big_min, safe_add, MathError};
use rare_sats_ranges::{sort_ranges_with_indices, Range};
use serde::{Deserialize, Serialize};

use rare_sats_ranges::serde::{deserialize_u64, serialize_u64};

use crate::merge::TaggedLocation;
use crate::satribute::Satribute;

/// `size` consecutive sats starting `offset` sats into a UTXO.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(serialize_with = "serialize_u64", deserialize_with = "deserialize_u64")]
    pub offset: u64,
    #[serde(serialize_with = "serialize_u64", deserialize_with = "deserialize_u64")]
    pub size: u64,
}

impl Location {
    pub fn tagged(self, satribute: Satribute) -> TaggedLocation {
        TaggedLocation {
            offset: self.offset,
            size: self.size,
            kind: satribute.into(),
        }
    }
}

/// Offset of each range's first sat, in the UTXO's own range order.
fn cumulative_offsets(utxo: &[Range]) -> Result<Vec<u64>, MathError> {
    let mut offsets = Vec::with_capacity(utxo.len());
    let mut total = 0u64;
    for range in utxo {
        offsets.push(total);
        total = safe_add(total, range.size())?;
    }
    Ok(offsets)
}

/// Locates the sats of `rare` inside a UTXO made of `utxo`.
///
/// Neither input needs to be sorted. `rare` should be minimal and `utxo`
/// disjoint; otherwise sats covered twice are located twice. Locations come
/// out in ordinal order, which differs from offset order whenever the UTXO's
/// ranges are not sorted.
///
/// ```rust
/// use rare_sats::location::{get_locations, Location};
/// use rare_sats_ranges::Range;
///
/// let utxo = [Range::new(100, 199).unwrap(), Range::new(0, 49).unwrap()];
/// let rare = [Range::new(0, 0).unwrap(), Range::new(150, 150).unwrap()];
/// assert_eq!(
///     get_locations(&rare, &utxo).unwrap(),
///     vec![Location { offset: 100, size: 1 }, Location { offset: 50, size: 1 }],
/// );
/// ```
pub fn get_locations(rare: &[Range], utxo: &[Range]) -> Result<Vec<Location>, MathError> {
    let offsets = cumulative_offsets(utxo)?;
    let rare_order = sort_ranges_with_indices(rare);
    let utxo_order = sort_ranges_with_indices(utxo);

    let mut locations = Vec::new();
    let mut rare_cursor = rare_order.iter().map(|&index| rare[index]);
    let mut current = rare_cursor.next();
    let mut j = 0;

    while let (Some(rare_range), Some(&utxo_index)) = (current, utxo_order.get(j)) {
        let utxo_range = utxo[utxo_index];
        if rare_range.end < utxo_range.start {
            current = rare_cursor.next();
            continue;
        }
        if utxo_range.end < rare_range.start {
            j += 1;
            continue;
        }

        let start = big_max(rare_range.start, [utxo_range.start]);
        let end = big_min(rare_range.end, [utxo_range.end]);
        locations.push(Location {
            offset: safe_add(offsets[utxo_index], start - utxo_range.start)?,
            size: end - start + 1,
        });

        if rare_range.end <= utxo_range.end {
            current = rare_cursor.next();
        } else {
            // The rest of this rare range lies past the current UTXO range.
            current = Some(Range {
                start: utxo_range.end + 1,
                end: rare_range.end,
            });
            j += 1;
        }
    }

    Ok(locations)
}

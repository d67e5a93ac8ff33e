//! Range-set algebra.

use rare_sats_math::{safe_sum, MathError};

use crate::range::Range;

/// Sorts `ranges` by start and merges every overlapping or adjacent pair.
///
/// Takes ownership because the merge rewrites `end` in place; clone first to
/// keep the original. Sorting is stable.
pub fn minimal_representation(mut ranges: Vec<Range>) -> Vec<Range> {
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_by_key(|range| range.start);

    let mut result: Vec<Range> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match result.last_mut() {
            // `end + 1 >= start`, written so that `end` near `u64::MAX` cannot overflow.
            Some(last) if last.end >= range.start.saturating_sub(1) => {
                last.end = last.end.max(range.end);
            }
            _ => result.push(range),
        }
    }
    result
}

/// `true` if `ranges` is sorted and no two ranges overlap or touch.
pub fn is_minimal(ranges: &[Range]) -> bool {
    ranges
        .windows(2)
        .all(|pair| pair[0].end < pair[1].start && pair[1].start - pair[0].end > 1)
}

/// Does any range of `a` overlap any range of `b`. Both sides must be minimal.
pub fn ranges_overlap_assume_minimal(a: &[Range], b: &[Range]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i].overlaps(&b[j]) {
            return true;
        }
        if a[i].end < b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}

pub fn ranges_overlap(a: &[Range], b: &[Range]) -> bool {
    ranges_overlap_assume_minimal(
        &minimal_representation(a.to_vec()),
        &minimal_representation(b.to_vec()),
    )
}

/// Linear two-pointer intersection. Both sides must be minimal; the result
/// is minimal too.
pub fn ranges_intersection_assume_minimal(a: &[Range], b: &[Range]) -> Vec<Range> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(intersection) = a[i].intersection(&b[j]) {
            result.push(intersection);
        }
        if a[i].end < b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

pub fn ranges_intersection(a: &[Range], b: &[Range]) -> Vec<Range> {
    ranges_intersection_assume_minimal(
        &minimal_representation(a.to_vec()),
        &minimal_representation(b.to_vec()),
    )
}

/// Total number of sats over `ranges`. Overlapping ranges are counted twice.
pub fn ranges_size(ranges: &[Range]) -> Result<u64, MathError> {
    safe_sum(ranges.iter().map(Range::size))
}

pub fn clone_ranges(ranges: &[Range]) -> Vec<Range> {
    ranges.to_vec()
}

/// The permutation of `0..ranges.len()` that orders `ranges` by start.
///
/// ```rust
/// use rare_sats_ranges::{sort_ranges_with_indices, Range};
///
/// let ranges = [Range::new(50, 60).unwrap(), Range::new(0, 9).unwrap(), Range::new(20, 29).unwrap()];
/// assert_eq!(sort_ranges_with_indices(&ranges), vec![1, 2, 0]);
/// ```
pub fn sort_ranges_with_indices(ranges: &[Range]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..ranges.len()).collect();
    indices.sort_by_key(|&index| ranges[index].start);
    indices
}

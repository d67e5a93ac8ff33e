//! # Rare Sats Ranges
//!
//! Closed intervals of sat ordinals and the range-set algebra the classifier
//! is built on.
//!
//! A [`Range`] `[start, end]` covers the sats `start, start + 1, ..., end`.
//! A range set is a plain `Vec<Range>`. It is in **minimal representation**
//! when it is sorted by `start` and no two ranges overlap or touch, i.e. for
//! consecutive ranges `a`, `b` there is always a sat `x` with
//! `a.end < x < b.start`. `[[2, 40], [41, 50]]` is therefore not minimal; its
//! minimal form is `[[2, 50]]`.
//!
//! Several routines only produce correct results on minimal input. Each of
//! them comes in two flavours:
//!
//! - a safe one ([`ranges_intersection`], [`ranges_overlap`]) that normalizes
//!   both operands first,
//! - a fast one (`*_assume_minimal`) that trusts the caller. Feeding it
//!   non-minimal input silently yields incomplete or duplicated output.
//!
//! ## Quick Example
//!
//! ```rust
//! use rare_sats_ranges::{minimal_representation, ranges_intersection, ranges_size, Range};
//!
//! let a = vec![Range::new(10, 20).unwrap(), Range::new(0, 4).unwrap(), Range::new(5, 8).unwrap()];
//! let b = vec![Range::new(3, 12).unwrap()];
//!
//! assert_eq!(
//!     minimal_representation(a.clone()),
//!     vec![Range::new(0, 8).unwrap(), Range::new(10, 20).unwrap()],
//! );
//! let common = ranges_intersection(&a, &b);
//! assert_eq!(common, vec![Range::new(3, 8).unwrap(), Range::new(10, 12).unwrap()]);
//! assert_eq!(ranges_size(&common).unwrap(), 9);
//! ```

mod range;
pub mod serde;
mod set;

pub use range::{sats_to_ranges, HalfOpenRange, Range, RangeError};
pub use set::{
    clone_ranges, is_minimal, minimal_representation, ranges_intersection,
    ranges_intersection_assume_minimal, ranges_overlap, ranges_overlap_assume_minimal,
    ranges_size, sort_ranges_with_indices,
};

//! Consolidation of overlapping, typed locations.

use serde::{Deserialize, Serialize};

use rare_sats_ranges::serde::{deserialize_u64, serialize_u64};

use crate::satribute::{Satribute, SatributeSet};

/// A location labelled with every satribute that claims it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedLocation {
    #[serde(serialize_with = "serialize_u64", deserialize_with = "deserialize_u64")]
    pub offset: u64,
    #[serde(serialize_with = "serialize_u64", deserialize_with = "deserialize_u64")]
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: SatributeSet,
}

impl TaggedLocation {
    /// Offset one past the last sat, saturating at `u64::MAX`.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    End,
    Start,
}

/// Merges `locations` into sorted, non-overlapping segments.
///
/// Every offset covered by the input is covered by exactly one output
/// segment, labelled with all satributes covering that offset. Neighbouring
/// segments with the same label are joined. Locations are treated as
/// half-open `[offset, offset + size)`, so a location ending where another
/// begins never shares a sat with it.
///
/// ```rust
/// use rare_sats::merge::{merge_locations, TaggedLocation};
/// use rare_sats::Satribute;
///
/// let alpha = TaggedLocation { offset: 0, size: 1, kind: Satribute::Alpha.into() };
/// let uncommon = TaggedLocation { offset: 0, size: 1, kind: Satribute::Uncommon.into() };
///
/// let merged = merge_locations(&[alpha, uncommon]);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].kind.to_string(), "uncommon_alpha");
/// ```
pub fn merge_locations(locations: &[TaggedLocation]) -> Vec<TaggedLocation> {
    let mut events: Vec<(u64, Boundary, Satribute)> = Vec::new();
    for location in locations.iter().filter(|location| location.size > 0) {
        for satribute in location.kind.iter() {
            events.push((location.offset, Boundary::Start, satribute));
            events.push((location.end(), Boundary::End, satribute));
        }
    }
    events.sort_unstable();

    // Overlapping locations of one satribute are counted, not just flagged.
    let mut active = [0usize; Satribute::COUNT];
    let mut merged: Vec<TaggedLocation> = Vec::new();
    let mut previous: Option<u64> = None;

    let mut i = 0;
    while i < events.len() {
        let offset = events[i].0;
        if let Some(from) = previous.filter(|from| *from < offset) {
            let kind: SatributeSet = Satribute::ALL
                .into_iter()
                .filter(|satribute| active[satribute.priority()] > 0)
                .collect();
            if !kind.is_empty() {
                push_segment(&mut merged, from, offset, kind);
            }
        }
        // Apply every boundary at this offset before the next segment opens.
        while let Some(&(at, boundary, satribute)) = events.get(i) {
            if at != offset {
                break;
            }
            let count = &mut active[satribute.priority()];
            match boundary {
                Boundary::Start => *count += 1,
                Boundary::End => *count = count.saturating_sub(1),
            }
            i += 1;
        }
        previous = Some(offset);
    }

    merged
}

fn push_segment(merged: &mut Vec<TaggedLocation>, from: u64, to: u64, kind: SatributeSet) {
    if let Some(last) = merged.last_mut() {
        if last.kind == kind && last.end() == from {
            last.size = to - last.offset;
            return;
        }
    }
    merged.push(TaggedLocation {
        offset: from,
        size: to - from,
        kind,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn at(offset: u64, size: u64, kinds: &[Satribute]) -> TaggedLocation {
        TaggedLocation {
            offset,
            size,
            kind: kinds.iter().copied().collect(),
        }
    }

    fn labels(merged: &[TaggedLocation]) -> Vec<(u64, u64, String)> {
        merged
            .iter()
            .map(|location| (location.offset, location.size, location.kind.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_and_zero_sized() {
        assert!(merge_locations(&[]).is_empty());
        assert!(merge_locations(&[at(5, 0, &[Satribute::Alpha])]).is_empty());
    }

    #[test]
    fn test_same_sat_gets_combined_label() {
        let merged = merge_locations(&[
            at(0, 1, &[Satribute::Alpha]),
            at(0, 1, &[Satribute::Uncommon]),
            at(0, 1, &[Satribute::Legendary]),
        ]);
        assert_eq!(
            labels(&merged),
            vec![(0, 1, "legendary_uncommon_alpha".to_string())]
        );
    }

    #[test]
    fn test_partial_overlap_splits_segments() {
        let merged = merge_locations(&[
            at(0, 10, &[Satribute::Vintage]),
            at(4, 1, &[Satribute::Uncommon]),
        ]);
        assert_eq!(
            labels(&merged),
            vec![
                (0, 4, "vintage".to_string()),
                (4, 1, "uncommon_vintage".to_string()),
                (5, 5, "vintage".to_string()),
            ]
        );
    }

    #[test]
    fn test_end_and_start_at_same_offset_of_different_satributes() {
        let merged = merge_locations(&[
            at(0, 5, &[Satribute::Alpha]),
            at(5, 5, &[Satribute::Omega]),
            at(5, 1, &[Satribute::Black]),
        ]);
        assert_eq!(
            labels(&merged),
            vec![
                (0, 5, "alpha".to_string()),
                (5, 1, "black_omega".to_string()),
                (6, 4, "omega".to_string()),
            ]
        );
    }

    #[test]
    fn test_overlapping_locations_of_one_satribute() {
        let merged = merge_locations(&[
            at(0, 5, &[Satribute::Pizza]),
            at(3, 5, &[Satribute::Pizza]),
            at(4, 1, &[Satribute::Pizza]),
        ]);
        assert_eq!(labels(&merged), vec![(0, 8, "pizza".to_string())]);
    }

    #[test]
    fn test_adjacent_same_label_is_coalesced() {
        let merged = merge_locations(&[
            at(10, 2, &[Satribute::Nakamoto]),
            at(0, 10, &[Satribute::Nakamoto]),
            at(13, 1, &[Satribute::Nakamoto]),
        ]);
        assert_eq!(
            labels(&merged),
            vec![
                (0, 12, "nakamoto".to_string()),
                (13, 1, "nakamoto".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_label_input_is_split_into_satributes() {
        let merged = merge_locations(&[
            at(0, 2, &[Satribute::Uncommon, Satribute::Alpha]),
            at(1, 2, &[Satribute::Alpha]),
        ]);
        assert_eq!(
            labels(&merged),
            vec![
                (0, 2, "uncommon_alpha".to_string()),
                (2, 1, "alpha".to_string()),
            ]
        );
    }

    #[test]
    fn test_serializes_with_type_key() {
        let location = at(7, 1, &[Satribute::Alpha, Satribute::Uncommon]);
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(json, r#"{"offset":"7","size":"1","type":"uncommon_alpha"}"#);
        assert_eq!(
            serde_json::from_str::<TaggedLocation>(&json).unwrap(),
            location
        );
    }

    fn arb_location() -> impl Strategy<Value = TaggedLocation> {
        (0u64..200, 0u64..30, 0usize..Satribute::COUNT)
            .prop_map(|(offset, size, i)| at(offset, size, &[Satribute::ALL[i]]))
    }

    fn coverage(locations: &[TaggedLocation]) -> BTreeMap<u64, SatributeSet> {
        let mut covered: BTreeMap<u64, SatributeSet> = BTreeMap::new();
        for location in locations {
            for offset in location.offset..location.end() {
                let set = covered.entry(offset).or_default();
                for satribute in location.kind.iter() {
                    set.insert(satribute);
                }
            }
        }
        covered
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 512, ..ProptestConfig::default() })]

        #[test]
        fn test_merge_is_sorted_disjoint_and_exact(
            locations in proptest::collection::vec(arb_location(), 0..16)
        ) {
            let merged = merge_locations(&locations);

            for pair in merged.windows(2) {
                prop_assert!(pair[0].end() <= pair[1].offset);
                prop_assert!(!(pair[0].end() == pair[1].offset && pair[0].kind == pair[1].kind));
            }
            for location in &merged {
                prop_assert!(location.size > 0);
                prop_assert!(!location.kind.is_empty());
            }
            prop_assert_eq!(coverage(&merged), coverage(&locations));
        }

        #[test]
        fn test_merge_preserves_size_of_disjoint_input(
            sizes in proptest::collection::vec((1u64..20, 0usize..Satribute::COUNT), 0..16)
        ) {
            let mut offset = 0;
            let mut locations = Vec::new();
            for (size, i) in sizes {
                locations.push(at(offset, size, &[Satribute::ALL[i]]));
                offset += size + 1;
            }
            let merged = merge_locations(&locations);
            prop_assert_eq!(
                merged.iter().map(|location| location.size).sum::<u64>(),
                locations.iter().map(|location| location.size).sum::<u64>()
            );
        }
    }
}

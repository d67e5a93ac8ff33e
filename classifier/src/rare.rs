//! Rarity tiers defined by block position.
//!
//! Each tier is the first sat of every block whose height is a multiple of
//! the tier's interval. Block 0 is a multiple of every interval, so sat 0
//! belongs to all four tiers at once.

use rare_sats_ranges::{sats_to_ranges, Range};

use crate::constants::{CYCLE_EPOCHS, DIFFCHANGE_INTERVAL, SUBSIDY_HALVING_INTERVAL};
use crate::epoch::list_first_of_interval;

/// Blocks between legendary sats: one per cycle, where halvings and
/// difficulty adjustments line up again.
pub const LEGENDARY_INTERVAL: u64 = CYCLE_EPOCHS * SUBSIDY_HALVING_INTERVAL;
pub const EPIC_INTERVAL: u64 = SUBSIDY_HALVING_INTERVAL;
pub const RARE_INTERVAL: u64 = DIFFCHANGE_INTERVAL;
pub const UNCOMMON_INTERVAL: u64 = 1;

fn list_first_of_blocks(ranges: &[Range], interval: u64) -> Vec<Range> {
    sats_to_ranges(list_first_of_interval(ranges, interval))
}

/// First sat of each cycle.
pub fn list_legendary(ranges: &[Range]) -> Vec<Range> {
    list_first_of_blocks(ranges, LEGENDARY_INTERVAL)
}

/// First sat of each halving epoch.
pub fn list_epic(ranges: &[Range]) -> Vec<Range> {
    list_first_of_blocks(ranges, EPIC_INTERVAL)
}

/// First sat of each difficulty adjustment period.
pub fn list_rare(ranges: &[Range]) -> Vec<Range> {
    list_first_of_blocks(ranges, RARE_INTERVAL)
}

/// First sat of each block.
pub fn list_uncommon(ranges: &[Range]) -> Vec<Range> {
    list_first_of_blocks(ranges, UNCOMMON_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::{creation_block, first_ordinal_of_block};
    use ordinals::{Rarity, Sat};
    use proptest::prelude::*;

    fn r(start: u64, end: u64) -> Range {
        Range::new(start, end).unwrap()
    }

    #[test]
    fn test_sat_zero_is_in_every_tier() {
        let genesis = [r(0, 4_999_999_999)];
        assert_eq!(list_legendary(&genesis), vec![r(0, 0)]);
        assert_eq!(list_epic(&genesis), vec![r(0, 0)]);
        assert_eq!(list_rare(&genesis), vec![r(0, 0)]);
        assert_eq!(list_uncommon(&genesis), vec![r(0, 0)]);
    }

    #[test]
    fn test_uncommon_across_block_boundaries() {
        // Last sat of block 0 through the first 10 sats of block 2.
        let ranges = [r(4_999_999_999, 10_000_000_009)];
        assert_eq!(
            list_uncommon(&ranges),
            vec![
                r(5_000_000_000, 5_000_000_000),
                r(10_000_000_000, 10_000_000_000),
            ]
        );
        assert!(list_rare(&ranges).is_empty());
    }

    #[test]
    fn test_rare_and_epic_boundaries() {
        let rare = first_ordinal_of_block(2016).unwrap();
        assert_eq!(list_rare(&[r(rare - 5, rare + 5)]), vec![r(rare, rare)]);
        assert!(list_epic(&[r(rare - 5, rare + 5)]).is_empty());

        let epic = first_ordinal_of_block(210_000).unwrap();
        let ranges = [r(epic, epic)];
        assert_eq!(list_epic(&ranges), vec![r(epic, epic)]);
        // 210_000 is not a multiple of 2016, so the first halving starts mid-period.
        assert!(list_rare(&ranges).is_empty());
        assert!(list_legendary(&ranges).is_empty());

        let legendary = first_ordinal_of_block(LEGENDARY_INTERVAL).unwrap();
        let ranges = [r(legendary, legendary)];
        assert_eq!(list_epic(&ranges), vec![r(legendary, legendary)]);
        assert_eq!(list_rare(&ranges), vec![r(legendary, legendary)]);
    }

    #[test]
    fn test_legendary_second_cycle() {
        let legendary = first_ordinal_of_block(LEGENDARY_INTERVAL).unwrap();
        assert_eq!(
            list_legendary(&[r(1, legendary)]),
            vec![r(legendary, legendary)]
        );
        assert_eq!(creation_block(legendary), Some(LEGENDARY_INTERVAL));
    }

    #[test]
    fn test_ranges_are_processed_in_input_order() {
        let ranges = [r(10_000_000_000, 10_000_000_000), r(0, 0)];
        assert_eq!(
            list_uncommon(&ranges),
            vec![r(10_000_000_000, 10_000_000_000), r(0, 0)]
        );
    }

    fn tier_of(sat: u64) -> Option<Rarity> {
        let ranges = [r(sat, sat)];
        if !list_legendary(&ranges).is_empty() {
            Some(Rarity::Legendary)
        } else if !list_epic(&ranges).is_empty() {
            Some(Rarity::Epic)
        } else if !list_rare(&ranges).is_empty() {
            Some(Rarity::Rare)
        } else if !list_uncommon(&ranges).is_empty() {
            Some(Rarity::Uncommon)
        } else {
            None
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

        #[test]
        fn test_tiers_match_ordinals_rarity(height in 1u32..3_000_000, delta in 0u64..3) {
            let first = first_ordinal_of_block(u64::from(height)).unwrap();
            let sat = first + delta;
            let expected = match Sat(sat).rarity() {
                Rarity::Common => None,
                // Mythic is sat 0 only, and heights start at 1 here.
                other => Some(other),
            };
            prop_assert_eq!(tier_of(sat), expected);
        }
    }
}

//! Exotic satributes: block and coin boundaries, palindromes, and the
//! historical tables.

use rare_sats_ranges::{ranges_intersection, sats_to_ranges, Range};

use crate::epoch::{list_first_of_coin, list_last_of_coin, list_last_of_interval};
use crate::palindrome;
use crate::tables::HistoricalRanges;

/// Last sat of each block.
pub fn list_black(ranges: &[Range]) -> Vec<Range> {
    sats_to_ranges(list_last_of_interval(ranges, 1))
}

/// First sat of each whole bitcoin.
pub fn list_alpha(ranges: &[Range]) -> Vec<Range> {
    sats_to_ranges(list_first_of_coin(ranges))
}

/// Last sat of each whole bitcoin.
pub fn list_omega(ranges: &[Range]) -> Vec<Range> {
    sats_to_ranges(list_last_of_coin(ranges))
}

/// Sats whose decimal ordinal reads the same both ways.
pub fn list_palindromes(ranges: &[Range]) -> Vec<Range> {
    sats_to_ranges(palindrome::list_palindromes(ranges))
}

pub fn list_nakamoto(ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
    ranges_intersection(ranges, &tables.nakamoto)
}

pub fn list_first_tx(ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
    ranges_intersection(ranges, &tables.first_tx)
}

pub fn list_block9(ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
    ranges_intersection(ranges, &tables.block9)
}

pub fn list_block78(ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
    ranges_intersection(ranges, &tables.block78)
}

pub fn list_vintage(ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
    ranges_intersection(ranges, &tables.vintage)
}

pub fn list_pizza(ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
    ranges_intersection(ranges, &tables.pizza)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COIN_VALUE, SUPPLY};

    fn r(start: u64, end: u64) -> Range {
        Range::new(start, end).unwrap()
    }

    #[test]
    fn test_black_is_last_sat_of_block() {
        assert_eq!(
            list_black(&[r(0, 5_000_000_000)]),
            vec![r(4_999_999_999, 4_999_999_999)]
        );
        assert!(list_black(&[r(0, 4_999_999_998)]).is_empty());
        assert_eq!(
            list_black(&[r(SUPPLY - 1, SUPPLY + 10)]),
            vec![r(SUPPLY - 1, SUPPLY - 1)]
        );
    }

    #[test]
    fn test_alpha_and_omega() {
        let ranges = [r(COIN_VALUE - 1, 2 * COIN_VALUE)];
        assert_eq!(
            list_alpha(&ranges),
            vec![r(COIN_VALUE, COIN_VALUE), r(2 * COIN_VALUE, 2 * COIN_VALUE)]
        );
        assert_eq!(
            list_omega(&ranges),
            vec![
                r(COIN_VALUE - 1, COIN_VALUE - 1),
                r(2 * COIN_VALUE - 1, 2 * COIN_VALUE - 1),
            ]
        );
        assert_eq!(list_alpha(&[r(0, 0)]), vec![r(0, 0)]);
        assert!(list_omega(&[r(1, COIN_VALUE - 2)]).is_empty());
    }

    #[test]
    fn test_palindromes() {
        assert_eq!(list_palindromes(&[r(7, 7)]), vec![r(7, 7)]);
        assert!(list_palindromes(&[r(19, 21)]).is_empty());
        assert_eq!(
            list_palindromes(&[r(100, 130)]),
            vec![r(101, 101), r(111, 111), r(121, 121)]
        );
    }

    #[test]
    fn test_historical_tables() {
        let tables = HistoricalRanges::mainnet();
        let genesis = [r(0, 4_999_999_999)];
        assert!(list_nakamoto(&genesis, &tables).is_empty());
        assert!(list_block9(&genesis, &tables).is_empty());
        assert_eq!(list_vintage(&genesis, &tables), genesis.to_vec());

        let block9 = [r(44_000_000_000, 46_000_000_000)];
        assert_eq!(
            list_block9(&block9, &tables),
            vec![r(45_000_000_000, 46_000_000_000)]
        );
        assert_eq!(
            list_first_tx(&block9, &tables),
            vec![r(45_000_000_000, 45_999_999_999)]
        );
        assert_eq!(list_nakamoto(&block9, &tables), block9.to_vec());
        assert!(list_block78(&block9, &tables).is_empty());
        assert!(list_pizza(&block9, &tables).is_empty());
    }

    #[test]
    fn test_pizza_uses_configured_table() {
        let tables = HistoricalRanges {
            pizza: vec![r(100, 199)],
            ..HistoricalRanges::mainnet()
        };
        assert_eq!(list_pizza(&[r(150, 300)], &tables), vec![r(150, 199)]);
    }
}

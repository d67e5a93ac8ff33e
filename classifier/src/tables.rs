//! Fixed historical sat ranges.
//!
//! `block9`, `block78`, `firstTx`, `vintage` and `nakamoto` follow from the
//! subsidy schedule and are built in. The pizza transaction's sats are
//! scattered over many early coinbases and can only be traced by an ordinal
//! indexer, so that table ships empty and is loaded from configuration.

use rare_sats_ranges::{minimal_representation, Range};
use serde::{Deserialize, Serialize};

use crate::satribute::Satribute;

/// Sats mined in block 9.
pub const BLOCK_9: [Range; 1] = [Range {
    start: 45_000_000_000,
    end: 49_999_999_999,
}];

/// Sats mined in block 78, the first block attributed to Hal Finney.
pub const BLOCK_78: [Range; 1] = [Range {
    start: 390_000_000_000,
    end: 394_999_999_999,
}];

/// The 10 BTC sent to Hal Finney in the first transaction. Its only input is
/// block 9's coinbase and the payment is output 0, so it carries the first
/// 10 BTC of block 9.
pub const FIRST_TX: [Range; 1] = [Range {
    start: 45_000_000_000,
    end: 45_999_999_999,
}];

/// Sats mined in blocks 0 through 999.
pub const VINTAGE: [Range; 1] = [Range {
    start: 0,
    end: 4_999_999_999_999,
}];

/// Sats mined in blocks 1 through 77, before the first block attributed to
/// another miner. The unspendable genesis coinbase is excluded.
pub const NAKAMOTO: [Range; 1] = [Range {
    start: 5_000_000_000,
    end: 389_999_999_999,
}];

/// Tables for the fixed-range satributes.
///
/// Deserializes from a partial document: missing tables keep their
/// built-in value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoricalRanges {
    pub nakamoto: Vec<Range>,
    pub first_tx: Vec<Range>,
    pub block9: Vec<Range>,
    pub block78: Vec<Range>,
    pub vintage: Vec<Range>,
    pub pizza: Vec<Range>,
}

impl HistoricalRanges {
    pub fn mainnet() -> Self {
        Self {
            nakamoto: NAKAMOTO.to_vec(),
            first_tx: FIRST_TX.to_vec(),
            block9: BLOCK_9.to_vec(),
            block78: BLOCK_78.to_vec(),
            vintage: VINTAGE.to_vec(),
            pizza: Vec::new(),
        }
    }

    /// The table behind `satribute`, or `None` for computed satributes.
    pub fn table(&self, satribute: Satribute) -> Option<&[Range]> {
        match satribute {
            Satribute::Nakamoto => Some(self.nakamoto.as_slice()),
            Satribute::FirstTx => Some(self.first_tx.as_slice()),
            Satribute::Block9 => Some(self.block9.as_slice()),
            Satribute::Block78 => Some(self.block78.as_slice()),
            Satribute::Vintage => Some(self.vintage.as_slice()),
            Satribute::Pizza => Some(self.pizza.as_slice()),
            _ => None,
        }
    }

    /// Brings every table into minimal representation.
    pub fn normalized(self) -> Self {
        Self {
            nakamoto: minimal_representation(self.nakamoto),
            first_tx: minimal_representation(self.first_tx),
            block9: minimal_representation(self.block9),
            block78: minimal_representation(self.block78),
            vintage: minimal_representation(self.vintage),
            pizza: minimal_representation(self.pizza),
        }
    }
}

impl Default for HistoricalRanges {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COIN_VALUE;
    use crate::epoch::block_range;

    #[test]
    fn test_block_tables_match_block_math() {
        assert_eq!(BLOCK_9[0], block_range(9).unwrap());
        assert_eq!(BLOCK_78[0], block_range(78).unwrap());
        assert_eq!(VINTAGE[0].start, block_range(0).unwrap().start);
        assert_eq!(VINTAGE[0].end, block_range(999).unwrap().end);
        assert_eq!(NAKAMOTO[0].start, block_range(1).unwrap().start);
        assert_eq!(NAKAMOTO[0].end, block_range(77).unwrap().end);
    }

    #[test]
    fn test_first_tx_is_ten_coins_of_block_9() {
        assert_eq!(FIRST_TX[0].start, BLOCK_9[0].start);
        assert_eq!(FIRST_TX[0].size(), 10 * COIN_VALUE);
    }

    #[test]
    fn test_table_lookup() {
        let tables = HistoricalRanges::mainnet();
        assert_eq!(tables.table(Satribute::Block9), Some(&BLOCK_9[..]));
        assert_eq!(tables.table(Satribute::Pizza), Some(&[][..]));
        assert_eq!(tables.table(Satribute::Uncommon), None);
    }

    #[test]
    fn test_partial_toml_keeps_builtins() {
        let tables: HistoricalRanges = toml::from_str(
            r#"
            pizza = [["5000000000", "5000000099"], [100, 199]]
            "#,
        )
        .unwrap();
        assert_eq!(
            tables.pizza,
            vec![
                Range::new(5_000_000_000, 5_000_000_099).unwrap(),
                Range::new(100, 199).unwrap(),
            ]
        );
        assert_eq!(tables.block9, BLOCK_9.to_vec());
        assert_eq!(
            tables.normalized().pizza,
            vec![
                Range::new(100, 199).unwrap(),
                Range::new(5_000_000_000, 5_000_000_099).unwrap(),
            ]
        );
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let tables: HistoricalRanges =
            serde_json::from_str(r#"{"firstTx": [["1", "2"]]}"#).unwrap();
        assert_eq!(tables.first_tx, vec![Range::new(1, 2).unwrap()]);
        assert_eq!(tables.nakamoto, NAKAMOTO.to_vec());
    }
}

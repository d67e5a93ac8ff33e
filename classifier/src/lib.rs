//! # Rare Sats
//!
//! Finds rare and exotic sats inside UTXOs.
//!
//! Every sat is numbered by the order it was mined in. Some numbers are
//! collectible: the first sat of a block (`uncommon`), of a halving epoch
//! (`epic`), a sat whose number is a palindrome, a sat from block 9, and so
//! on. Given each outpoint's sat ranges, as reported by an ordinal indexer,
//! this crate reports which sats carry which [`Satribute`], how many there
//! are, and where they sit inside each UTXO.
//!
//! ## Quick Example
//!
//! ```rust
//! use rare_sats::{find_from_known_ranges, OutpointRanges, Satribute};
//!
//! // Indexers report right-exclusive ranges: this is all of block 0.
//! let input: OutpointRanges =
//!     serde_json::from_str(r#"{"abc:0": [["0", "5000000000"]]}"#).unwrap();
//!
//! let result = find_from_known_ranges(&input, None).unwrap();
//! assert_eq!(result.total_count[&Satribute::Uncommon], 1);
//! assert_eq!(result.total_count[&Satribute::Black], 1);
//! assert_eq!(result.total_count[&Satribute::Block9], 0);
//!
//! let locations = &result.utxos["abc:0"].locations;
//! assert_eq!(locations[0].offset, 0);
//! assert!(locations[0].kind.contains(Satribute::Legendary));
//! ```
//!
//! ## Modules
//!
//! - [`epoch`]: block and coin boundaries over the subsidy schedule.
//! - [`rare`] and [`exotic`]: one listing function per satribute.
//! - [`palindrome`]: palindromic ordinals, enumerated and counted.
//! - [`location`] and [`merge`]: offsets of rare sats inside a UTXO.
//! - [`tables`]: historical ranges behind the fixed-range satributes.

pub mod constants;
pub mod epoch;
mod error;
pub mod exotic;
mod find;
pub mod location;
pub mod merge;
pub mod palindrome;
pub mod rare;
mod satribute;
pub mod tables;

pub use error::RareSatsError;
pub use find::{
    find_from_known_ranges, Classifier, ClassifierConfig, FindResult, OutpointRanges,
    OutpointRareSats,
};
pub use location::Location;
pub use merge::TaggedLocation;
pub use satribute::{Satribute, SatributeSet};
pub use tables::HistoricalRanges;

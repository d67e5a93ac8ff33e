//! The rarity categories ("satributes") and their priority order.

use std::fmt;
use std::str::FromStr;

use rare_sats_ranges::Range;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RareSatsError;
use crate::exotic::{
    list_alpha, list_black, list_block78, list_block9, list_first_tx, list_nakamoto, list_omega,
    list_palindromes, list_pizza, list_vintage,
};
use crate::rare::{list_epic, list_legendary, list_rare, list_uncommon};
use crate::tables::HistoricalRanges;

/// A named rarity category.
///
/// Declaration order is priority order: when one sat carries several
/// satributes, combined labels list them in this order. `Ord` follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Satribute {
    // Rare
    Legendary,
    Epic,
    Rare,
    Uncommon,

    // Exotic
    Black,
    Alpha,
    Omega,
    Nakamoto,
    Palindrome,
    FirstTx,
    Block9,
    Block78,
    Vintage,
    Pizza,
}

impl Satribute {
    /// Every satribute, highest priority first.
    pub const ALL: [Satribute; 14] = [
        Satribute::Legendary,
        Satribute::Epic,
        Satribute::Rare,
        Satribute::Uncommon,
        Satribute::Black,
        Satribute::Alpha,
        Satribute::Omega,
        Satribute::Nakamoto,
        Satribute::Palindrome,
        Satribute::FirstTx,
        Satribute::Block9,
        Satribute::Block78,
        Satribute::Vintage,
        Satribute::Pizza,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn name(self) -> &'static str {
        match self {
            Satribute::Legendary => "legendary",
            Satribute::Epic => "epic",
            Satribute::Rare => "rare",
            Satribute::Uncommon => "uncommon",
            Satribute::Black => "black",
            Satribute::Alpha => "alpha",
            Satribute::Omega => "omega",
            Satribute::Nakamoto => "nakamoto",
            Satribute::Palindrome => "palindrome",
            Satribute::FirstTx => "firstTx",
            Satribute::Block9 => "block9",
            Satribute::Block78 => "block78",
            Satribute::Vintage => "vintage",
            Satribute::Pizza => "pizza",
        }
    }

    /// Position in [`Satribute::ALL`]; lower is higher priority.
    pub fn priority(self) -> usize {
        self as usize
    }

    /// The sub-ranges of `ranges` that carry this satribute.
    ///
    /// Pure: `ranges` is only read. The output is minimal whenever the input is.
    pub fn list(self, ranges: &[Range], tables: &HistoricalRanges) -> Vec<Range> {
        match self {
            Satribute::Legendary => list_legendary(ranges),
            Satribute::Epic => list_epic(ranges),
            Satribute::Rare => list_rare(ranges),
            Satribute::Uncommon => list_uncommon(ranges),
            Satribute::Black => list_black(ranges),
            Satribute::Alpha => list_alpha(ranges),
            Satribute::Omega => list_omega(ranges),
            Satribute::Nakamoto => list_nakamoto(ranges, tables),
            Satribute::Palindrome => list_palindromes(ranges),
            Satribute::FirstTx => list_first_tx(ranges, tables),
            Satribute::Block9 => list_block9(ranges, tables),
            Satribute::Block78 => list_block78(ranges, tables),
            Satribute::Vintage => list_vintage(ranges, tables),
            Satribute::Pizza => list_pizza(ranges, tables),
        }
    }

    /// Sorts `requested` into priority order and drops duplicates.
    pub fn by_priority(requested: &[Satribute]) -> Vec<Satribute> {
        Self::ALL
            .into_iter()
            .filter(|satribute| requested.contains(satribute))
            .collect()
    }
}

impl fmt::Display for Satribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Satribute {
    type Err = RareSatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|satribute| satribute.name() == s)
            .ok_or_else(|| RareSatsError::UnknownSatribute(s.to_string()))
    }
}

/// A set of satributes, iterated in priority order.
///
/// Labels a location claimed by several satributes at once; it displays and
/// serializes as the names joined by `_`, e.g. `uncommon_alpha`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SatributeSet(u16);

impl SatributeSet {
    pub const EMPTY: SatributeSet = SatributeSet(0);

    pub fn single(satribute: Satribute) -> Self {
        Self(1 << satribute.priority())
    }

    pub fn insert(&mut self, satribute: Satribute) {
        self.0 |= 1 << satribute.priority();
    }

    pub fn contains(&self, satribute: Satribute) -> bool {
        self.0 & (1 << satribute.priority()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Satribute> + '_ {
        Satribute::ALL
            .into_iter()
            .filter(move |satribute| self.contains(*satribute))
    }
}

impl From<Satribute> for SatributeSet {
    fn from(satribute: Satribute) -> Self {
        Self::single(satribute)
    }
}

impl FromIterator<Satribute> for SatributeSet {
    fn from_iter<I: IntoIterator<Item = Satribute>>(iter: I) -> Self {
        let mut set = SatributeSet::EMPTY;
        for satribute in iter {
            set.insert(satribute);
        }
        set
    }
}

impl fmt::Display for SatributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, satribute) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            f.write_str(satribute.name())?;
        }
        Ok(())
    }
}

impl FromStr for SatributeSet {
    type Err = RareSatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('_').map(Satribute::from_str).collect()
    }
}

impl Serialize for SatributeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SatributeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

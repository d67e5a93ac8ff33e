//! Classification of whole wallets: outpoint ranges in, rare sats out.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use rare_sats_math::safe_add;
use rare_sats_ranges::{minimal_representation, ranges_size, HalfOpenRange, Range};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, trace};

use crate::error::RareSatsError;
use crate::location::get_locations;
use crate::merge::{merge_locations, TaggedLocation};
use crate::satribute::Satribute;
use crate::tables::HistoricalRanges;

/// Validated sat ranges per outpoint, inclusive on both ends.
///
/// Deserializes from the indexer format, where every range is right-exclusive
/// (`[start, end)`), and converts on the way in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<HalfOpenRange>>",
    into = "BTreeMap<String, Vec<HalfOpenRange>>"
)]
pub struct OutpointRanges(BTreeMap<String, Vec<Range>>);

impl OutpointRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts right-exclusive ranges, rejecting any that hold no sat.
    pub fn from_half_open(
        outpoints: BTreeMap<String, Vec<HalfOpenRange>>,
    ) -> Result<Self, RareSatsError> {
        let mut ranges = BTreeMap::new();
        for (outpoint, half_open) in outpoints {
            let inclusive = half_open
                .iter()
                .map(HalfOpenRange::to_inclusive)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| RareSatsError::InvalidRange {
                    outpoint: outpoint.clone(),
                    source,
                })?;
            ranges.insert(outpoint, inclusive);
        }
        Ok(Self(ranges))
    }

    /// Adds an outpoint's inclusive ranges, in the order the UTXO holds them.
    pub fn insert(&mut self, outpoint: impl Into<String>, ranges: Vec<Range>) {
        self.0.insert(outpoint.into(), ranges);
    }

    pub fn get(&self, outpoint: &str) -> Option<&[Range]> {
        self.0.get(outpoint).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Range>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Vec<HalfOpenRange>>> for OutpointRanges {
    type Error = RareSatsError;

    fn try_from(outpoints: BTreeMap<String, Vec<HalfOpenRange>>) -> Result<Self, Self::Error> {
        Self::from_half_open(outpoints)
    }
}

impl From<OutpointRanges> for BTreeMap<String, Vec<HalfOpenRange>> {
    fn from(outpoints: OutpointRanges) -> Self {
        outpoints
            .0
            .into_iter()
            .map(|(outpoint, ranges)| {
                let ranges: Vec<_> = ranges.into_iter().map(HalfOpenRange::from).collect();
                (outpoint, ranges)
            })
            .collect()
    }
}

/// Counts are written as decimal strings so JSON readers never round them.
mod counts {
    use super::*;
    use rare_sats_ranges::serde::{deserialize_u128, serialize_u128};

    #[derive(Serialize, Deserialize)]
    struct Count(
        #[serde(
            serialize_with = "serialize_u128",
            deserialize_with = "deserialize_u128"
        )]
        u128,
    );

    pub fn serialize<T, S>(
        counts: &BTreeMap<Satribute, T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        T: Copy + Into<u128>,
        S: Serializer,
    {
        serializer.collect_map(
            counts
                .iter()
                .map(|(satribute, count)| (satribute, Count((*count).into()))),
        )
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<BTreeMap<Satribute, T>, D::Error>
    where
        T: TryFrom<u128>,
        T::Error: Display,
        D: Deserializer<'de>,
    {
        BTreeMap::<Satribute, Count>::deserialize(deserializer)?
            .into_iter()
            .map(|(satribute, Count(count))| {
                T::try_from(count)
                    .map(|count| (satribute, count))
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}

/// Rare sats held by one outpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpointRareSats {
    /// Ordinal ranges per satribute, minimal and never empty.
    pub rare_ranges: BTreeMap<Satribute, Vec<Range>>,
    #[serde(with = "counts")]
    pub count: BTreeMap<Satribute, u64>,
    pub locations: Vec<TaggedLocation>,
}

impl OutpointRareSats {
    pub fn is_empty(&self) -> bool {
        self.rare_ranges.is_empty()
    }
}

/// Rare sats across a set of outpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindResult {
    /// Sats per requested satribute over all outpoints, zero included.
    #[serde(with = "counts")]
    pub total_count: BTreeMap<Satribute, u128>,
    /// Only outpoints holding at least one rare sat.
    pub utxos: BTreeMap<String, OutpointRareSats>,
}

impl FindResult {
    fn zeroed(satributes: &[Satribute]) -> Self {
        Self {
            total_count: satributes.iter().map(|satribute| (*satribute, 0)).collect(),
            utxos: BTreeMap::new(),
        }
    }

    fn add_outpoint(
        &mut self,
        outpoint: String,
        rare_sats: OutpointRareSats,
    ) -> Result<(), RareSatsError> {
        for (satribute, count) in &rare_sats.count {
            let total = self.total_count.entry(*satribute).or_insert(0);
            *total = safe_add(*total, u128::from(*count))?;
        }
        if !rare_sats.is_empty() {
            self.utxos.insert(outpoint, rare_sats);
        }
        Ok(())
    }

    /// Folds the result of another batch of outpoints into this one.
    ///
    /// An outpoint present in both keeps `other`'s entry, and the totals
    /// drop the counts it replaces.
    pub fn merge(&mut self, other: FindResult) -> Result<(), RareSatsError> {
        for (satribute, count) in other.total_count {
            let total = self.total_count.entry(satribute).or_insert(0);
            *total = safe_add(*total, count)?;
        }
        for (outpoint, rare_sats) in other.utxos {
            if let Some(replaced) = self.utxos.insert(outpoint, rare_sats) {
                for (satribute, count) in replaced.count {
                    if let Some(total) = self.total_count.get_mut(&satribute) {
                        *total = total.saturating_sub(u128::from(count));
                    }
                }
            }
        }
        Ok(())
    }
}

/// What to classify and against which tables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Satributes to evaluate; `None` means all of them.
    pub satributes: Option<Vec<Satribute>>,
    pub tables: HistoricalRanges,
}

#[derive(Clone, Debug)]
pub struct Classifier {
    satributes: Vec<Satribute>,
    tables: HistoricalRanges,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let satributes = match config.satributes {
            Some(requested) => Satribute::by_priority(&requested),
            None => Satribute::ALL.to_vec(),
        };
        Self {
            satributes,
            tables: config.tables.normalized(),
        }
    }

    /// Satributes evaluated by this classifier, in priority order.
    pub fn satributes(&self) -> &[Satribute] {
        &self.satributes
    }

    pub fn tables(&self) -> &HistoricalRanges {
        &self.tables
    }

    /// Classifies one outpoint holding `ranges`, in the UTXO's own order.
    pub fn classify_outpoint(&self, ranges: &[Range]) -> Result<OutpointRareSats, RareSatsError> {
        let mut rare_sats = OutpointRareSats::default();
        let mut locations = Vec::new();

        for &satribute in &self.satributes {
            let rare_ranges = minimal_representation(satribute.list(ranges, &self.tables));
            trace!(%satribute, ranges = rare_ranges.len(), "Evaluated satribute");
            if rare_ranges.is_empty() {
                continue;
            }

            let count = ranges_size(&rare_ranges)?;
            locations.extend(
                get_locations(&rare_ranges, ranges)?
                    .into_iter()
                    .map(|location| location.tagged(satribute)),
            );
            rare_sats.count.insert(satribute, count);
            rare_sats.rare_ranges.insert(satribute, rare_ranges);
        }

        rare_sats.locations = merge_locations(&locations);
        Ok(rare_sats)
    }

    pub fn find(&self, input: &OutpointRanges) -> Result<FindResult, RareSatsError> {
        self.find_cancellable(input, &AtomicBool::new(false))
    }

    /// Like [`Classifier::find`], but gives up with
    /// [`RareSatsError::Cancelled`] once `cancel` is set. The flag is checked
    /// before each outpoint.
    pub fn find_cancellable(
        &self,
        input: &OutpointRanges,
        cancel: &AtomicBool,
    ) -> Result<FindResult, RareSatsError> {
        let mut result = FindResult::zeroed(&self.satributes);

        for (outpoint, ranges) in input.iter() {
            if cancel.load(Ordering::Relaxed) {
                debug!(%outpoint, "Classification cancelled");
                return Err(RareSatsError::Cancelled);
            }
            let rare_sats = self.classify_outpoint(ranges)?;
            debug!(%outpoint, count = ?rare_sats.count, "Classified outpoint");
            result.add_outpoint(outpoint.clone(), rare_sats)?;
        }

        info!(
            outpoints = input.len(),
            kept = result.utxos.len(),
            "Found rare sats"
        );
        Ok(result)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

/// Classifies `input` against the built-in mainnet tables.
///
/// `satributes` restricts the categories evaluated; order and duplicates do
/// not matter.
///
/// The built-in `pizza` table is empty, so this never reports pizza sats. Use
/// [`Classifier::new`] with a [`ClassifierConfig`] whose `tables` carry pizza
/// ranges, for example loaded from a TOML tables file.
pub fn find_from_known_ranges(
    input: &OutpointRanges,
    satributes: Option<&[Satribute]>,
) -> Result<FindResult, RareSatsError> {
    Classifier::new(ClassifierConfig {
        satributes: satributes.map(<[Satribute]>::to_vec),
        tables: HistoricalRanges::mainnet(),
    })
    .find(input)
}

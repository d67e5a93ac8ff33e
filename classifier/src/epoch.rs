//! Block and coin boundary math over the sat supply schedule.
//!
//! Sats are numbered in mint order: block 0's subsidy holds sats
//! `0..5_000_000_000`, block 1's the next `5_000_000_000`, and so on, with the
//! subsidy halving every [`SUBSIDY_HALVING_INTERVAL`] blocks.

use rare_sats_ranges::Range;

use crate::constants::{COIN_VALUE, FIRST_EMPTY_EPOCH, INITIAL_SUBSIDY, SUBSIDY_HALVING_INTERVAL};
use crate::error::RareSatsError;

/// Sats minted by every block of `epoch`.
fn epoch_subsidy(epoch: u64) -> u64 {
    u32::try_from(epoch)
        .ok()
        .and_then(|shift| INITIAL_SUBSIDY.checked_shr(shift))
        .unwrap_or(0)
}

pub fn block_subsidy(height: u64) -> u64 {
    epoch_subsidy(height / SUBSIDY_HALVING_INTERVAL)
}

/// Ordinal of the first sat minted at `height`.
///
/// Sums the whole-epoch rewards that precede `height`, then adds the blocks
/// already mined in its own epoch. Fails once the subsidy has run out,
/// since such a block mints no sat at all.
pub fn first_ordinal_of_block(height: u64) -> Result<u64, RareSatsError> {
    let subsidy = block_subsidy(height);
    if subsidy == 0 {
        return Err(RareSatsError::Exhausted { block: height });
    }
    let epoch = height / SUBSIDY_HALVING_INTERVAL;
    let previous_epochs: u64 = (0..epoch)
        .map(|e| SUBSIDY_HALVING_INTERVAL * epoch_subsidy(e))
        .sum();
    let within_epoch = (height % SUBSIDY_HALVING_INTERVAL) * subsidy;
    Ok(previous_epochs + within_epoch)
}

pub fn last_ordinal_of_block(height: u64) -> Result<u64, RareSatsError> {
    Ok(first_ordinal_of_block(height)? + block_subsidy(height) - 1)
}

pub fn block_range(height: u64) -> Result<Range, RareSatsError> {
    let start = first_ordinal_of_block(height)?;
    Ok(Range {
        start,
        end: start + block_subsidy(height) - 1,
    })
}

/// Height of the block that minted `sat`, or `None` past the last sat.
pub fn creation_block(sat: u64) -> Option<u64> {
    let mut remaining = sat;
    let mut block = 0;
    for epoch in 0..FIRST_EMPTY_EPOCH {
        let subsidy = epoch_subsidy(epoch);
        let epoch_sats = SUBSIDY_HALVING_INTERVAL * subsidy;
        if remaining < epoch_sats {
            return Some(block + remaining / subsidy);
        }
        remaining -= epoch_sats;
        block += SUBSIDY_HALVING_INTERVAL;
    }
    None
}

pub fn first_ordinal_of_coin(sat: u64) -> u64 {
    sat - sat % COIN_VALUE
}

pub fn last_ordinal_of_coin(sat: u64) -> u64 {
    first_ordinal_of_coin(sat).saturating_add(COIN_VALUE - 1)
}

pub fn coin_range(sat: u64) -> Range {
    Range {
        start: first_ordinal_of_coin(sat),
        end: last_ordinal_of_coin(sat),
    }
}

fn list_block_boundaries_in_range<F>(range: &Range, interval: u64, boundary: F) -> Vec<u64>
where
    F: Fn(u64) -> Result<u64, RareSatsError>,
{
    let mut sats = Vec::new();
    let Some(created) = creation_block(range.start) else {
        return sats;
    };
    let mut block = created.div_ceil(interval) * interval;
    // A block past the subsidy schedule mints nothing, so the walk ends there.
    while let Ok(sat) = boundary(block) {
        if sat > range.end {
            break;
        }
        if sat >= range.start {
            sats.push(sat);
        }
        match block.checked_add(interval) {
            Some(next) => block = next,
            None => break,
        }
    }
    sats
}

/// First sat of every block whose height is a multiple of `interval`,
/// across all `ranges`, in input order.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub fn list_first_of_interval(ranges: &[Range], interval: u64) -> Vec<u64> {
    assert!(interval > 0, "block interval must be positive");
    ranges
        .iter()
        .flat_map(|range| list_block_boundaries_in_range(range, interval, first_ordinal_of_block))
        .collect()
}

/// Last sat of every block whose height is a multiple of `interval`.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub fn list_last_of_interval(ranges: &[Range], interval: u64) -> Vec<u64> {
    assert!(interval > 0, "block interval must be positive");
    ranges
        .iter()
        .flat_map(|range| list_block_boundaries_in_range(range, interval, last_ordinal_of_block))
        .collect()
}

fn list_coin_boundaries_in_range(range: &Range, first: u64) -> impl Iterator<Item = u64> + '_ {
    let first = if first < range.start {
        first.checked_add(COIN_VALUE)
    } else {
        Some(first)
    };
    std::iter::successors(first, |sat| sat.checked_add(COIN_VALUE))
        .take_while(move |sat| *sat <= range.end)
}

/// First sat of every whole bitcoin (`sat % COIN_VALUE == 0`) across `ranges`.
pub fn list_first_of_coin(ranges: &[Range]) -> Vec<u64> {
    ranges
        .iter()
        .flat_map(|range| {
            let boundary = first_ordinal_of_coin(range.start);
            list_coin_boundaries_in_range(range, boundary)
        })
        .collect()
}

/// Last sat of every whole bitcoin across `ranges`.
pub fn list_last_of_coin(ranges: &[Range]) -> Vec<u64> {
    ranges
        .iter()
        .flat_map(|range| {
            let boundary = last_ordinal_of_coin(range.start);
            list_coin_boundaries_in_range(range, boundary)
        })
        .collect()
}

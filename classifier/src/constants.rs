// Consensus parameters of the sat supply schedule
pub const COIN_VALUE: u64 = 100_000_000;
pub const SUBSIDY_HALVING_INTERVAL: u64 = 210_000;
pub const DIFFCHANGE_INTERVAL: u64 = 2016;
pub const CYCLE_EPOCHS: u64 = 6; // halvings per cycle, lcm(210_000, 2016) = 6 * 210_000
pub const INITIAL_SUBSIDY: u64 = 50 * COIN_VALUE;

/// First epoch whose block subsidy is zero (`50 BTC >> 33 == 0`).
pub const FIRST_EMPTY_EPOCH: u64 = 33;

/// First block height that mints no sats.
pub const FIRST_UNSUBSIDIZED_HEIGHT: u64 = FIRST_EMPTY_EPOCH * SUBSIDY_HALVING_INTERVAL;

/// Number of sats that will ever exist. Every ordinal is below it.
pub const SUPPLY: u64 = supply();

const fn supply() -> u64 {
    let mut total = 0;
    let mut epoch = 0;
    while epoch < FIRST_EMPTY_EPOCH {
        total += SUBSIDY_HALVING_INTERVAL * (INITIAL_SUBSIDY >> epoch);
        epoch += 1;
    }
    total
}

use rare_sats_math::MathError;
use rare_sats_ranges::RangeError;
use thiserror::Error;

/// Errors raised while validating input or classifying sats.
///
/// Finding no rare sats is not an error: it is an `Ok` result with no
/// outpoints and zeroed totals.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RareSatsError {
    #[error("Invalid sat range for outpoint {outpoint}: {source}")]
    InvalidRange {
        outpoint: String,
        #[source]
        source: RangeError,
    },

    #[error("Unknown satribute `{0}`")]
    UnknownSatribute(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(#[from] MathError),

    #[error("Block {block} mints no sats")]
    Exhausted { block: u64 },

    #[error("Classification was cancelled")]
    Cancelled,
}

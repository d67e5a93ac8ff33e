//! Checked integer arithmetic for sat ordinals and counts.
//!
//! Ordinals never pass through floating point. Every operation that could
//! overflow on malformed input reports a [`MathError`] instead of wrapping.

use num::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Addition overflowed")]
    AdditionOverflow,
    #[error("Subtraction overflowed")]
    SubtractionOverflow,
    #[error("Multiplication overflowed")]
    MultiplicationOverflow,
    #[error("Division overflowed")]
    DivisionOverflow,
}

pub fn safe_add<T>(a: T, b: T) -> Result<T, MathError>
where
    T: CheckedAdd,
{
    a.checked_add(&b).ok_or(MathError::AdditionOverflow)
}

pub fn safe_sub<T>(a: T, b: T) -> Result<T, MathError>
where
    T: CheckedSub,
{
    a.checked_sub(&b).ok_or(MathError::SubtractionOverflow)
}

pub fn safe_mul<T>(a: T, b: T) -> Result<T, MathError>
where
    T: CheckedMul,
{
    a.checked_mul(&b).ok_or(MathError::MultiplicationOverflow)
}

pub fn safe_div<T>(a: T, b: T) -> Result<T, MathError>
where
    T: CheckedDiv,
{
    a.checked_div(&b).ok_or(MathError::DivisionOverflow)
}

/// Sums every value, failing on the first overflow.
pub fn safe_sum<T, I>(values: I) -> Result<T, MathError>
where
    T: CheckedAdd + Zero,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .try_fold(T::zero(), |acc, value| safe_add(acc, value))
}

/// Smallest of `first` and every value in `rest`.
pub fn big_min<T, I>(first: T, rest: I) -> T
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    rest.into_iter().fold(first, |min, value| min.min(value))
}

/// Largest of `first` and every value in `rest`.
pub fn big_max<T, I>(first: T, rest: I) -> T
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    rest.into_iter().fold(first, |max, value| max.max(value))
}

//! Integer array generation and the handful of operations run over it.

use rand::Rng;

use crate::error::{PlaygroundError, Result};

/// Longest array `generate` will build.
pub const MAX_ARRAY_LENGTH: i64 = 10_000;

/// `length` integers drawn uniformly from `min..=max`.
/// Negative or oversized lengths and `min > max` are [`PlaygroundError::InvalidRange`].
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: i64, min: i32, max: i32) -> Result<Vec<i32>> {
    check_range(length, min, max)?;
    Ok((0..length).map(|_| rng.gen_range(min..=max)).collect())
}

pub(crate) fn check_range(length: i64, min: i32, max: i32) -> Result<()> {
    if !(0..=MAX_ARRAY_LENGTH).contains(&length) || min > max {
        return Err(PlaygroundError::InvalidRange { length, min, max });
    }
    Ok(())
}

pub fn sort(values: &[i32]) -> Vec<i32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

pub fn reverse(values: &[i32]) -> Vec<i32> {
    values.iter().rev().copied().collect()
}

/// Sum and arithmetic mean. Empty input has no mean and is rejected.
pub fn sum_and_average(values: &[i32]) -> Result<(i64, f64)> {
    if values.is_empty() {
        return Err(PlaygroundError::EmptyArray);
    }
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    Ok((sum, sum as f64 / values.len() as f64))
}

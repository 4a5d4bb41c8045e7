use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::{Result, SortConfig, SortError};

/// One bucket per decimal digit.
pub const NUM_BUCKETS: usize = 10;

pub type Buckets = [Vec<i64>; NUM_BUCKETS];

/// The `level`-th most significant of `digit_width` decimal digits of `value`.
///
/// `level` is 1-indexed: level 1 is the most significant digit of a
/// `digit_width` wide value, level `digit_width` the least significant one.
/// Shorter values are zero-padded on the left.
#[inline(always)]
pub fn digit(value: i64, digit_width: u32, level: u32) -> usize {
    debug_assert!((1..=digit_width).contains(&level));
    ((value / 10i64.pow(digit_width - level)) % 10) as usize
}

/// Decimal digit count of the largest value, zero for an empty slice.
///
/// Fails on the first negative value.
pub fn max_digit_width(data: &[i64]) -> Result<u32> {
    crate::scope!("max_digit_width");
    let mut max = None;
    for (index, &value) in data.iter().enumerate() {
        if value < 0 {
            return Err(SortError::NegativeValue { index, value });
        }
        max = max.max(Some(value));
    }
    Ok(match max {
        None => 0,
        Some(max) => max.checked_ilog10().map_or(1, |d| d + 1),
    })
}

/// Distributes `data` into buckets by the digit at `level`.
///
/// Chunks of `data` are bucketed concurrently. Each chunk groups its values
/// locally, then appends each group to the shared bucket under that bucket's
/// lock. Values in a bucket keep no particular order.
pub fn place_into_buckets(
    data: &[i64],
    digit_width: u32,
    level: u32,
    config: &SortConfig,
) -> Result<Buckets> {
    crate::scope!("place_into_buckets");
    let shared: [Mutex<Vec<i64>>; NUM_BUCKETS] = Default::default();
    let poisoned = AtomicBool::new(false);

    config.scheduler.par_chunks(
        data,
        &|_, chunk: &[i64]| {
            let mut local: Buckets = Default::default();
            for &value in chunk {
                local[digit(value, digit_width, level)].push(value);
            }
            for (bucket, values) in shared.iter().zip(local) {
                if values.is_empty() {
                    continue;
                }
                if append(bucket, values).is_err() {
                    poisoned.store(true, Ordering::Relaxed);
                }
            }
        },
        config.chunk_size(data.len()),
    )?;

    if poisoned.into_inner() {
        return Err(SortError::BucketPoisoned);
    }
    unlock_buckets(shared)
}

#[inline]
fn append(bucket: &Mutex<Vec<i64>>, values: Vec<i64>) -> Result<()> {
    let mut bucket = bucket.lock().map_err(|_| SortError::BucketPoisoned)?;
    bucket.extend(values);
    Ok(())
}

fn unlock_buckets(shared: [Mutex<Vec<i64>>; NUM_BUCKETS]) -> Result<Buckets> {
    let mut buckets: Buckets = Default::default();
    for (bucket, lock) in buckets.iter_mut().zip(shared) {
        *bucket = lock.into_inner().map_err(|_| SortError::BucketPoisoned)?;
    }
    Ok(buckets)
}

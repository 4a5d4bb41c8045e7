//! Recursive bitonic sorting network.
//!
//! The left half is sorted ascending and the right half descending as two
//! forked tasks, which makes the whole range bitonic. The merge then
//! compare-and-swaps element `i` with `i + middle` for the first half and
//! recurses into both halves concurrently. Every compare stage touches
//! disjoint pairs, so halves never contend.
//!
//! The length must be a power of two. [`pad_to_power_of_two`] and
//! [`strip_padding`] adapt arbitrary lengths, [`sort_padded`] does both.

use crate::{Result, SortConfig, SortError};

/// Value appended by [`pad_to_power_of_two`]. Sorts after every element in
/// ascending order and before every element in descending order.
pub const PAD_SENTINEL: i64 = i64::MAX;

#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    #[inline(always)]
    fn is_ascending(self) -> bool {
        self == Order::Ascending
    }
}

/// Sorts `data`, whose length must be a power of two, using the default configuration.
pub fn sort(data: &mut [i64], order: Order) -> Result<()> {
    sort_with(data, order, &SortConfig::default())
}

pub fn sort_with(data: &mut [i64], order: Order, config: &SortConfig) -> Result<()> {
    crate::scope_print_major!("bitonic::sort");
    log::debug!(
        "bitonic sort: {} elements {:?} on {:?}",
        data.len(),
        order,
        config.scheduler
    );

    if data.len() <= 1 {
        return Ok(());
    }
    if !data.len().is_power_of_two() {
        return Err(SortError::NotPowerOfTwo { len: data.len() });
    }

    config.scheduler.init();
    bitonic_sort(data, order, config)
}

/// Pads `data` with [`PAD_SENTINEL`] up to the next power of two.
///
/// Returns the padded sequence and how many sentinels were appended.
pub fn pad_to_power_of_two(mut data: Vec<i64>) -> (Vec<i64>, usize) {
    let len = data.len();
    if len <= 1 {
        return (data, 0);
    }
    let padded_len = len.next_power_of_two();
    data.resize(padded_len, PAD_SENTINEL);
    (data, padded_len - len)
}

/// Removes `pad_count` sentinels from a sequence sorted in `order`.
pub fn strip_padding(data: &mut Vec<i64>, pad_count: usize, order: Order) {
    let pad_count = pad_count.min(data.len());
    match order {
        Order::Ascending => data.truncate(data.len() - pad_count),
        Order::Descending => {
            data.drain(..pad_count);
        }
    }
}

/// Pads, sorts and un-pads `data`, so any length is accepted.
pub fn sort_padded(data: Vec<i64>, order: Order, config: &SortConfig) -> Result<Vec<i64>> {
    let (mut padded, pad_count) = pad_to_power_of_two(data);
    sort_with(&mut padded, order, config)?;
    strip_padding(&mut padded, pad_count, order);
    Ok(padded)
}

fn bitonic_sort(data: &mut [i64], order: Order, config: &SortConfig) -> Result<()> {
    let len = data.len();
    if len < 2 {
        return Ok(());
    }

    let middle = len / 2;
    let (left, right) = data.split_at_mut(middle);
    config.fork(
        len,
        || bitonic_sort(left, Order::Ascending, config),
        || bitonic_sort(right, Order::Descending, config),
    )?;

    bitonic_merge(data, order, config)
}

fn bitonic_merge(data: &mut [i64], order: Order, config: &SortConfig) -> Result<()> {
    let len = data.len();
    let middle = len / 2;
    let (low, high) = data.split_at_mut(middle);
    compare_and_swap(low, high, order);

    if middle > 1 {
        config.fork(
            len,
            || bitonic_merge(low, order, config),
            || bitonic_merge(high, order, config),
        )?;
    }
    Ok(())
}

#[inline]
fn compare_and_swap(low: &mut [i64], high: &mut [i64], order: Order) {
    let ascending = order.is_ascending();
    for (a, b) in low.iter_mut().zip(high.iter_mut()) {
        if (*a > *b) == ascending {
            std::mem::swap(a, b);
        }
    }
}

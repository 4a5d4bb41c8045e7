//! Top-down merge sort. Both halves are forked while the range is longer than
//! [`PARALLEL_THRESHOLD`], below that the recursion stays on the current task.
//!
//! ## Characteristics
//!
//!  * stable
//!  * O(n) scratch memory per merge, holding the left half of the range

use crate::{par::Scheduler, Result, SortConfig};

/// Ranges at most this long are sorted without forking.
pub const PARALLEL_THRESHOLD: usize = 1 << 11;

/// Sorts `data` ascending using the default configuration.
pub fn sort(data: &mut [i64]) -> Result<()> {
    sort_with(data, &SortConfig::default())
}

pub fn sort_with(data: &mut [i64], config: &SortConfig) -> Result<()> {
    crate::scope_print_major!("merge::sort");
    log::debug!(
        "merge sort: {} elements on {:?}",
        data.len(),
        config.scheduler
    );
    config.scheduler.init();
    merge_sort(data, config.scheduler)
}

fn merge_sort(data: &mut [i64], scheduler: Scheduler) -> Result<()> {
    if data.len() <= PARALLEL_THRESHOLD {
        sequential_merge_sort(data);
        return Ok(());
    }

    let middle = data.len() / 2;
    let (left, right) = data.split_at_mut(middle);
    scheduler.try_join(
        || merge_sort(left, scheduler),
        || merge_sort(right, scheduler),
    )?;

    merge(data, middle);
    Ok(())
}

fn sequential_merge_sort(data: &mut [i64]) {
    let len = data.len();
    if len <= 1 {
        return;
    }
    let middle = len / 2;
    let (left, right) = data.split_at_mut(middle);
    sequential_merge_sort(left);
    sequential_merge_sort(right);
    merge(data, middle);
}

/// Merges the sorted runs `data[..middle]` and `data[middle..]`.
///
/// Only the left run is copied out. The write cursor never overtakes the right
/// read cursor, so once the left run is drained the rest of the right run is
/// already in place.
fn merge(data: &mut [i64], middle: usize) {
    crate::scope!("merge");
    // Already ordered across the seam
    if data[middle - 1] <= data[middle] {
        return;
    }

    let scratch = data[..middle].to_vec();
    let mut left = 0;
    let mut right = middle;
    let mut current = 0;

    while left < scratch.len() && right < data.len() {
        if scratch[left] <= data[right] {
            data[current] = scratch[left];
            left += 1;
        } else {
            data[current] = data[right];
            right += 1;
        }
        current += 1;
    }

    let rest = &scratch[left..];
    data[current..current + rest.len()].copy_from_slice(rest);
}

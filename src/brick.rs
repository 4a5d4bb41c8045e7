//! Brick sort, also known as odd-even transposition sort.
//!
//! Each iteration runs an odd phase comparing the pairs `(0, 1), (2, 3), ...`
//! and an even phase comparing `(1, 2), (3, 4), ...`. The pairs within one
//! phase never overlap, so a phase is split into chunks of an even number of
//! elements and every chunk is swapped by its own task. The chunked pass is
//! the phase barrier: it only returns once every chunk is done.
//!
//! The sort stops after the first iteration where neither phase swapped.
//!
//! ## Characteristics
//!
//!  * in-place
//!  * O(n) iterations of O(n) work in the worst case

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{par::Scheduler, Result, SortConfig};

/// Sorts `data` ascending using the default configuration.
pub fn sort(data: &mut [i64]) -> Result<()> {
    sort_with(data, &SortConfig::default())
}

pub fn sort_with(data: &mut [i64], config: &SortConfig) -> Result<()> {
    crate::scope_print_major!("brick::sort");
    log::debug!(
        "brick sort: {} elements on {:?}",
        data.len(),
        config.scheduler
    );

    if data.len() <= 1 {
        return Ok(());
    }

    let scheduler = if data.len() > config.par_cutoff {
        config.scheduler
    } else {
        Scheduler::Sequential
    };
    scheduler.init();

    // An odd chunk size would split a pair across two tasks
    let chunk_size = config.chunk_size(data.len()).next_multiple_of(2);

    let mut iterations = 0usize;
    loop {
        crate::scope_print!("brick iteration");
        iterations += 1;
        let is_sorted = AtomicBool::new(true);

        for offset in [0, 1] {
            scheduler.par_chunks_mut(
                &mut data[offset..],
                &|_, chunk: &mut [i64]| {
                    if swap_pairs(chunk) {
                        is_sorted.store(false, Ordering::Relaxed);
                    }
                },
                chunk_size,
            )?;
        }

        if is_sorted.load(Ordering::Relaxed) {
            break;
        }
    }

    log::trace!("brick sort: sorted after {iterations} iterations");
    Ok(())
}

/// Swaps every out of order `(2i, 2i + 1)` pair in `chunk`, returning whether any swap happened.
#[inline]
fn swap_pairs(chunk: &mut [i64]) -> bool {
    let mut swapped = false;
    for pair in chunk.chunks_exact_mut(2) {
        if pair[0] > pair[1] {
            pair.swap(0, 1);
            swapped = true;
        }
    }
    swapped
}

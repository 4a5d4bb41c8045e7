use arbitrary_chunks::ArbitraryChunks;

use crate::{
    par::Scheduler,
    radix::sort_utils::{place_into_buckets, Buckets, NUM_BUCKETS},
    SortConfig,
};

/// Sorts `bucket` by the digits from `level` down to the least significant one.
///
/// All placements finish before any bucket recurses, and every bucket is
/// sorted before the buckets are written back in ascending digit order.
pub fn sort_level(
    bucket: &mut [i64],
    level: u32,
    digit_width: u32,
    config: &SortConfig,
) -> crate::Result<()> {
    crate::scope!("sort_level");
    if bucket.len() <= 1 || level > digit_width {
        return Ok(());
    }
    log::trace!(
        "radix level {level}/{digit_width}: {} elements",
        bucket.len()
    );

    // Small buckets are bucketed, recursed and copied back on this thread
    let config = &if bucket.len() > config.par_cutoff {
        *config
    } else {
        SortConfig {
            scheduler: Scheduler::Sequential,
            ..*config
        }
    };

    let mut buckets = place_into_buckets(bucket, digit_width, level, config)?;

    // One task per bucket
    config.scheduler.try_par_map(
        &mut buckets[..],
        &|_, sub_bucket: &mut Vec<i64>| sort_level(sub_bucket, level + 1, digit_width, config),
        NUM_BUCKETS as u32,
    )?;

    concatenate(bucket, &buckets, config)
}

/// Writes the non-empty `buckets` back into `bucket` one after another.
fn concatenate(bucket: &mut [i64], buckets: &Buckets, config: &SortConfig) -> crate::Result<()> {
    crate::scope!("concatenate");
    let sources: Vec<&[i64]> = buckets
        .iter()
        .filter(|b| !b.is_empty())
        .map(Vec::as_slice)
        .collect();
    let lengths: Vec<usize> = sources.iter().map(|s| s.len()).collect();
    let mut copies: Vec<(&mut [i64], &[i64])> = bucket
        .arbitrary_chunks_mut(&lengths)
        .zip(sources)
        .collect();
    config.scheduler.par_map(
        &mut copies[..],
        &|_, copy: &mut (&mut [i64], &[i64])| copy.0.copy_from_slice(copy.1),
        NUM_BUCKETS as u32,
    )
}

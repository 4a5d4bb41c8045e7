//! Quicksort with a uniformly random pivot and one task per partition side.
//!
//! Partitioning is sequential; only the recursive calls on the two disjoint
//! sides run concurrently. Every call forks, whatever its size, unless
//! `SortConfig::par_cutoff` says otherwise. Elements equal to the pivot are
//! gathered next to it and belong to neither side, so runs of duplicates
//! finish in a single pass.
//!
//! Under rayon and raw threads all tasks of the recursion tree are spawned into
//! one scope, and the top-level call returns once the scope has counted every
//! task as finished. Forte only offers pairwise joins, so there each call joins
//! its own two children.

use std::{io, sync::OnceLock, thread};

use rand::Rng;

use crate::{par::Scheduler, Result, SortConfig, SortError};

/// Sorts `data` ascending using the default configuration.
pub fn sort(data: &mut [i64]) -> Result<()> {
    sort_with(data, &SortConfig::default())
}

pub fn sort_with(data: &mut [i64], config: &SortConfig) -> Result<()> {
    crate::scope_print_major!("quick::sort");
    log::debug!(
        "quick sort: {} elements on {:?}",
        data.len(),
        config.scheduler
    );

    if data.len() <= 1 {
        return Ok(());
    }
    config.scheduler.init();

    let cutoff = config.par_cutoff;
    match config.scheduler {
        Scheduler::Sequential => {
            sequential_quicksort(data);
            Ok(())
        }
        Scheduler::Rayon => {
            rayon::scope(|s| rayon_quicksort(s, data, cutoff));
            Ok(())
        }
        Scheduler::Raw => {
            let failure = OnceLock::new();
            thread::scope(|s| raw_quicksort(s, data, cutoff, &failure));
            match failure.into_inner() {
                Some(err) => Err(SortError::ResourceExhausted(err)),
                None => Ok(()),
            }
        }
        Scheduler::Forte => joined_quicksort(data, config),
    }
}

/// Splits `data` around its partition point, leaving the pivot and every
/// element equal to it out of both sides.
#[inline]
fn split(data: &mut [i64]) -> (&mut [i64], &mut [i64]) {
    let q = partition(data);
    let pivot = data[q];
    let (left, right) = data.split_at_mut(q);
    let less = gather_less(left, pivot);
    let (left, _equal) = left.split_at_mut(less);
    (left, &mut right[1..])
}

fn rayon_quicksort<'s>(scope: &rayon::Scope<'s>, data: &'s mut [i64], cutoff: usize) {
    if data.len() <= 1 {
        return;
    }
    if data.len() <= cutoff {
        sequential_quicksort(data);
        return;
    }
    let (left, right) = split(data);
    scope.spawn(move |s| rayon_quicksort(s, left, cutoff));
    scope.spawn(move |s| rayon_quicksort(s, right, cutoff));
}

fn raw_quicksort<'scope, 'env>(
    scope: &'scope thread::Scope<'scope, 'env>,
    data: &'scope mut [i64],
    cutoff: usize,
    failure: &'scope OnceLock<io::Error>,
) {
    if data.len() <= 1 {
        return;
    }
    if data.len() <= cutoff {
        sequential_quicksort(data);
        return;
    }
    let (left, right) = split(data);
    for side in [left, right] {
        if side.len() <= 1 {
            continue;
        }
        let spawned = thread::Builder::new()
            .spawn_scoped(scope, move || raw_quicksort(scope, side, cutoff, failure));
        if let Err(err) = spawned {
            let _ = failure.set(err);
        }
    }
}

fn joined_quicksort(data: &mut [i64], config: &SortConfig) -> Result<()> {
    if data.len() <= 1 {
        return Ok(());
    }
    let len = data.len();
    let (left, right) = split(data);
    config.fork(
        len,
        || joined_quicksort(left, config),
        || joined_quicksort(right, config),
    )
}

/// Recurses into the smaller side and loops on the larger one, so the stack
/// stays O(log n) deep.
fn sequential_quicksort(mut data: &mut [i64]) {
    while data.len() > 1 {
        let (left, right) = split(std::mem::take(&mut data));
        let (smaller, larger) = if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        };
        sequential_quicksort(smaller);
        data = larger;
    }
}

/// Lomuto partition around a random pivot, returning the pivot's final index.
fn partition(data: &mut [i64]) -> usize {
    crate::scope!("partition");
    let last = data.len() - 1;
    let pivot_index = rand::rng().random_range(0..=last);
    data.swap(pivot_index, last);
    let pivot = data[last];

    let mut store = 0;
    for i in 0..last {
        if data[i] <= pivot {
            data.swap(store, i);
            store += 1;
        }
    }
    data.swap(store, last);
    store
}

/// Moves the elements below `pivot` to the front of `data`, returning their count.
fn gather_less(data: &mut [i64], pivot: i64) -> usize {
    let mut store = 0;
    for i in 0..data.len() {
        if data[i] < pivot {
            data.swap(store, i);
            store += 1;
        }
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn sorts_shuffled_input() {
        let mut data = vec![3, 0, 5, 7, 1, 6, 2, 4];
        sort(&mut data).unwrap();
        assert_eq!(data, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn partition_places_pivot() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let mut data: Vec<i64> = (0..20).map(|_| rng.random_range(-5..5)).collect();
            let q = partition(&mut data);
            let pivot = data[q];
            assert!(data[..q].iter().all(|v| *v <= pivot));
            assert!(data[q + 1..].iter().all(|v| *v > pivot));
        }
    }

    #[test]
    fn every_scheduler_sorts_duplicates() {
        let mut rng = rand::rng();
        let input: Vec<i64> = (0..500).map(|_| rng.random_range(-20..20)).collect();
        let mut expected = input.clone();
        expected.sort();
        for scheduler in Scheduler::ALL {
            // Raw threads are one per call, keep them bounded
            let config = SortConfig {
                par_cutoff: if scheduler == Scheduler::Raw { 32 } else { 0 },
                ..SortConfig::with_scheduler(scheduler)
            };
            let mut data = input.clone();
            sort_with(&mut data, &config).unwrap();
            assert_eq!(data, expected, "{scheduler:?}");
        }
    }

    #[test]
    fn split_drops_the_pivot_run() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let mut data: Vec<i64> = (0..40).map(|_| rng.random_range(0..4)).collect();
            let mut expected = data.clone();
            expected.sort();

            let (left, right) = split(&mut data);
            let (left_len, right_len) = (left.len(), right.len());
            let left_max = left.iter().max().copied();
            let right_min = right.iter().min().copied();
            // The middle run holds the pivot and its duplicates
            let middle = &data[left_len..data.len() - right_len];
            let pivot = middle[0];
            assert!(middle.iter().all(|v| *v == pivot));
            assert!(left_max.is_none_or(|v| v < pivot));
            assert!(right_min.is_none_or(|v| v > pivot));

            data.sort();
            assert_eq!(data, expected);
        }
    }

    #[test]
    fn all_equal_input_on_every_scheduler() {
        for scheduler in Scheduler::ALL {
            for par_cutoff in [0, 1 << 20] {
                let config = SortConfig {
                    par_cutoff,
                    ..SortConfig::with_scheduler(scheduler)
                };
                let mut data = vec![5i64; 200_000];
                sort_with(&mut data, &config).unwrap();
                assert!(data.iter().all(|v| *v == 5), "{scheduler:?} {par_cutoff}");
            }
        }
    }

    #[test]
    fn two_distinct_values_on_every_scheduler() {
        let mut rng = rand::rng();
        let input: Vec<i64> = (0..200_000).map(|_| rng.random_range(0..2)).collect();
        let zeros = input.iter().filter(|v| **v == 0).count();
        for scheduler in Scheduler::ALL {
            for par_cutoff in [0, 1 << 20] {
                let config = SortConfig {
                    par_cutoff,
                    ..SortConfig::with_scheduler(scheduler)
                };
                let mut data = input.clone();
                sort_with(&mut data, &config).unwrap();
                assert!(data[..zeros].iter().all(|v| *v == 0), "{scheduler:?} {par_cutoff}");
                assert!(data[zeros..].iter().all(|v| *v == 1), "{scheduler:?} {par_cutoff}");
            }
        }
    }

    #[test]
    fn already_sorted_input_is_unchanged() {
        let mut data: Vec<i64> = (0..2_000).collect();
        sort(&mut data).unwrap();
        assert_eq!(data, (0..2_000).collect::<Vec<i64>>());
    }

    #[test]
    fn empty_and_single() {
        let mut empty: Vec<i64> = vec![];
        sort(&mut empty).unwrap();
        assert!(empty.is_empty());

        let mut single = vec![1];
        sort(&mut single).unwrap();
        assert_eq!(single, vec![1]);
    }
}

use std::{str::FromStr, sync::OnceLock};

use crate::{Result, SortError};

pub mod par_forte;
pub mod par_raw;
pub mod par_rayon;
pub mod par_sequential;

static AVAILABLE_PARALLELISM: OnceLock<usize> = OnceLock::new();

#[inline(always)]
pub fn cached_available_parallelism() -> usize {
    *AVAILABLE_PARALLELISM.get_or_init(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

/// Fork/join backend every engine runs its parallel steps on.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
#[repr(u32)]
pub enum Scheduler {
    Sequential = 0,
    #[default]
    Rayon = 1,
    Forte = 2,
    /// Scoped OS threads, one per forked task. Unbounded.
    Raw = 3,
}

impl FromStr for Scheduler {
    type Err = String;

    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "seq" => Ok(Self::Sequential),
            "rayon" => Ok(Self::Rayon),
            "forte" => Ok(Self::Forte),
            "raw" => Ok(Self::Raw),
            _ => Err(format!(
                "Unknown mode: '{s}', valid modes: 'seq', 'rayon', 'forte', 'raw'"
            )),
        }
    }
}

impl Scheduler {
    pub const ALL: [Scheduler; 4] = [
        Scheduler::Sequential,
        Scheduler::Rayon,
        Scheduler::Forte,
        Scheduler::Raw,
    ];

    pub fn from(value: u32) -> Self {
        match value {
            0 => Scheduler::Sequential,
            1 => Scheduler::Rayon,
            2 => Scheduler::Forte,
            3 => Scheduler::Raw,
            _ => panic!("invalid scheduler enum value: {value}"),
        }
    }

    /// Runs `a` and `b` potentially in parallel and returns once both are done.
    #[inline(always)]
    pub fn join<A, B, RA, RB>(self, a: A, b: B) -> Result<(RA, RB)>
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        match self {
            Scheduler::Sequential => Ok(par_sequential::join(a, b)),
            Scheduler::Rayon => Ok(rayon::join(a, b)),
            Scheduler::Forte => Ok(par_forte::join(a, b)),
            Scheduler::Raw => par_raw::join(a, b).map_err(SortError::ResourceExhausted),
        }
    }

    /// `join` for fallible tasks. Both tasks always run to completion; the
    /// error of `a` is reported first.
    #[inline(always)]
    pub fn try_join<A, B>(self, a: A, b: B) -> Result<()>
    where
        A: FnOnce() -> Result<()> + Send,
        B: FnOnce() -> Result<()> + Send,
    {
        let (ra, rb) = self.join(a, b)?;
        ra.and(rb)
    }

    #[inline(always)]
    pub fn par_map<T, F>(self, data: &mut [T], func: &F, chunks: u32) -> Result<()>
    where
        T: Send + Sync,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        match self {
            Scheduler::Sequential => par_sequential::par_map(data, func),
            Scheduler::Rayon => par_rayon::par_map(data, func),
            Scheduler::Forte => par_forte::par_map(data, func, chunks),
            Scheduler::Raw => {
                return par_raw::par_map(data, func, chunks).map_err(SortError::ResourceExhausted)
            }
        }
        Ok(())
    }

    /// `par_map` for fallible tasks, returning the first error any of them hit.
    #[inline(always)]
    pub fn try_par_map<T, F>(self, data: &mut [T], func: &F, chunks: u32) -> Result<()>
    where
        T: Send + Sync,
        F: Fn(usize, &mut T) -> Result<()> + Send + Sync,
    {
        let failure = OnceLock::new();
        self.par_map(
            data,
            &|index, item| {
                if let Err(err) = func(index, item) {
                    let _ = failure.set(err);
                }
            },
            chunks,
        )?;
        match failure.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Calls `func(chunk_index, chunk)` for every `chunk_size` long chunk of `data`.
    #[inline(always)]
    pub fn par_chunks_mut<T, F>(self, data: &mut [T], func: &F, chunk_size: usize) -> Result<()>
    where
        T: Send + Sync,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        match self {
            Scheduler::Sequential => par_sequential::par_chunks_mut(data, func, chunk_size),
            Scheduler::Rayon => par_rayon::par_chunks_mut(data, func, chunk_size),
            Scheduler::Forte => par_forte::par_chunks_mut(data, func, chunk_size),
            Scheduler::Raw => {
                return par_raw::par_chunks_mut(data, func, chunk_size)
                    .map_err(SortError::ResourceExhausted)
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn par_chunks<T, F>(self, data: &[T], func: &F, chunk_size: usize) -> Result<()>
    where
        T: Send + Sync,
        F: Fn(usize, &[T]) + Send + Sync,
    {
        match self {
            Scheduler::Sequential => par_sequential::par_chunks(data, func, chunk_size),
            Scheduler::Rayon => par_rayon::par_chunks(data, func, chunk_size),
            Scheduler::Forte => par_forte::par_chunks(data, func, chunk_size),
            Scheduler::Raw => {
                return par_raw::par_chunks(data, func, chunk_size)
                    .map_err(SortError::ResourceExhausted)
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn init(self) {
        cached_available_parallelism();
        if self == Scheduler::Forte {
            par_forte::init_forte();
        }
    }

    pub fn current_num_threads(self) -> usize {
        match self {
            Scheduler::Sequential => 1,
            Scheduler::Rayon => rayon::current_num_threads(),
            Scheduler::Forte => cached_available_parallelism(),
            Scheduler::Raw => cached_available_parallelism(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn scheduler_names_parse() {
        assert_eq!("seq".parse::<Scheduler>(), Ok(Scheduler::Sequential));
        assert_eq!("rayon".parse::<Scheduler>(), Ok(Scheduler::Rayon));
        assert_eq!("forte".parse::<Scheduler>(), Ok(Scheduler::Forte));
        assert_eq!("raw".parse::<Scheduler>(), Ok(Scheduler::Raw));
        assert!("chili".parse::<Scheduler>().is_err());
        for scheduler in Scheduler::ALL {
            assert_eq!(Scheduler::from(scheduler as u32), scheduler);
        }
    }

    #[test]
    fn join_returns_both_results() {
        for scheduler in Scheduler::ALL {
            scheduler.init();
            let (a, b) = scheduler.join(|| 1 + 1, || "right").unwrap();
            assert_eq!((a, b), (2, "right"), "{scheduler:?}");
        }
    }

    #[test]
    fn try_join_runs_both_and_reports_error() {
        for scheduler in Scheduler::ALL {
            scheduler.init();
            let ran = AtomicUsize::new(0);
            let result = scheduler.try_join(
                || {
                    ran.fetch_add(1, Ordering::Relaxed);
                    Err(SortError::BucketPoisoned)
                },
                || {
                    ran.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                },
            );
            assert!(matches!(result, Err(SortError::BucketPoisoned)));
            assert_eq!(ran.load(Ordering::Relaxed), 2);
        }
    }

    #[test]
    fn par_chunks_mut_visits_every_chunk_once() {
        for scheduler in Scheduler::ALL {
            scheduler.init();
            for chunk_size in 1..12 {
                for data_len in 0..24 {
                    let mut data: Vec<usize> = vec![0; data_len];
                    scheduler
                        .par_chunks_mut(
                            &mut data,
                            &|chunk_id, chunk: &mut [usize]| {
                                for (i, item) in chunk.iter_mut().enumerate() {
                                    *item = chunk_id * chunk_size + i;
                                }
                            },
                            chunk_size,
                        )
                        .unwrap();
                    let expected: Vec<usize> = (0..data_len).collect();
                    assert_eq!(data, expected, "{scheduler:?} chunk_size {chunk_size}");
                }
            }
        }
    }

    #[test]
    fn par_chunks_sums_every_element() {
        for scheduler in Scheduler::ALL {
            scheduler.init();
            let data: Vec<usize> = (0..1000).collect();
            let total = AtomicUsize::new(0);
            scheduler
                .par_chunks(
                    &data,
                    &|_, chunk: &[usize]| {
                        total.fetch_add(chunk.iter().sum::<usize>(), Ordering::Relaxed);
                    },
                    37,
                )
                .unwrap();
            assert_eq!(total.load(Ordering::Relaxed), 999 * 1000 / 2);
        }
    }

    #[test]
    fn try_par_map_surfaces_error() {
        for scheduler in Scheduler::ALL {
            scheduler.init();
            let mut data = vec![0u32; 10];
            let result = scheduler.try_par_map(
                &mut data,
                &|index, item: &mut u32| {
                    *item = index as u32;
                    if index == 7 {
                        Err(SortError::BucketPoisoned)
                    } else {
                        Ok(())
                    }
                },
                10,
            );
            assert!(matches!(result, Err(SortError::BucketPoisoned)));
            assert_eq!(data, (0..10).collect::<Vec<u32>>());
        }
    }
}

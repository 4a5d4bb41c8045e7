use std::sync::atomic::{AtomicU32, Ordering};

use argh::FromArgs;

use crate::{par::Scheduler, Algorithm};

static DEFAULT_SCHEDULER: AtomicU32 = AtomicU32::new(Scheduler::Rayon as u32);

/// Scheduler used by `SortConfig::default()` and the plain `sort` entry points.
pub fn default_scheduler() -> Scheduler {
    Scheduler::from(DEFAULT_SCHEDULER.load(Ordering::Relaxed))
}

pub fn set_default_scheduler(scheduler: Scheduler) {
    scheduler.init();
    DEFAULT_SCHEDULER.store(scheduler as u32, Ordering::Relaxed);
}

/// Knobs shared by every engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    pub scheduler: Scheduler,
    /// How many chunks each thread gets in chunked phases (brick phases, radix placement).
    /// If chunks take a non-uniform amount of time more chunks per thread can improve cpu utilization.
    pub tasks_per_thread: usize,
    /// Subranges of at most this many elements are not forked any further.
    /// Zero forks every recursive call.
    pub par_cutoff: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            scheduler: default_scheduler(),
            tasks_per_thread: 4,
            par_cutoff: 0,
        }
    }
}

impl SortConfig {
    pub fn with_scheduler(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            ..Self::default()
        }
    }

    /// Size of each chunk when `len` elements are split across the scheduler's threads.
    #[inline]
    pub fn chunk_size(&self, len: usize) -> usize {
        let chunk_count = self.scheduler.current_num_threads() * self.tasks_per_thread.max(1);
        len.div_ceil(chunk_count).max(1)
    }

    /// Forks `a` and `b` if `len` is above `par_cutoff`, otherwise runs them in order.
    #[inline]
    pub(crate) fn fork<A, B>(&self, len: usize, a: A, b: B) -> crate::Result<()>
    where
        A: FnOnce() -> crate::Result<()> + Send,
        B: FnOnce() -> crate::Result<()> + Send,
    {
        if len > self.par_cutoff {
            self.scheduler.try_join(a, b)
        } else {
            a()?;
            b()
        }
    }
}

/// Sort a randomly generated array with one engine.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// sorting engine: 'brick', 'merge', 'quick', 'bitonic', 'radix'
    #[argh(option, default = "Algorithm::Merge")]
    pub algorithm: Algorithm,

    /// scheduler: 'seq', 'rayon', 'forte', 'raw'
    #[argh(option, default = "Scheduler::Rayon")]
    pub scheduler: Scheduler,

    /// number of elements to sort
    #[argh(option, default = "1_000_000")]
    pub len: usize,

    /// largest generated value (values are drawn from 0..=max_value)
    #[argh(option, default = "999")]
    pub max_value: i64,

    /// chunks per thread in chunked phases
    #[argh(option, default = "4")]
    pub tasks_per_thread: usize,

    /// stop forking below this many elements
    #[argh(option, default = "0")]
    pub par_cutoff: usize,

    /// how many times to repeat the sort
    #[argh(option, default = "1")]
    pub runs: usize,
}

impl Args {
    pub fn config(&self) -> SortConfig {
        SortConfig {
            scheduler: self.scheduler,
            tasks_per_thread: self.tasks_per_thread,
            par_cutoff: self.par_cutoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_never_zero() {
        let config = SortConfig::with_scheduler(Scheduler::Sequential);
        assert_eq!(config.chunk_size(0), 1);
        assert_eq!(config.chunk_size(3), 1);
        assert_eq!(config.chunk_size(16), 4);
    }

    #[test]
    fn fork_below_cutoff_runs_in_order() {
        let config = SortConfig {
            par_cutoff: 10,
            ..SortConfig::with_scheduler(Scheduler::Rayon)
        };
        let order = std::sync::Mutex::new(Vec::new());
        config
            .fork(
                4,
                || {
                    order.lock().unwrap().push(1);
                    Ok(())
                },
                || {
                    order.lock().unwrap().push(2);
                    Ok(())
                },
            )
            .unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn args_parse_into_config() {
        let args = Args::from_args(
            &["basic"],
            &["--algorithm", "radix", "--scheduler", "seq", "--par-cutoff", "64"],
        )
        .unwrap();
        assert_eq!(args.algorithm, Algorithm::Radix);
        let config = args.config();
        assert_eq!(config.scheduler, Scheduler::Sequential);
        assert_eq!(config.par_cutoff, 64);
        assert_eq!(config.tasks_per_thread, 4);
    }
}

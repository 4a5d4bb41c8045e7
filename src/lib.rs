use std::{
    str::FromStr,
    time::{Duration, Instant},
};

pub mod bitonic;
pub mod brick;
pub mod config;
pub mod error;
pub mod merge;
pub mod par;
pub mod quick;
pub mod radix;

pub use bitonic::Order;
pub use config::{default_scheduler, set_default_scheduler, Args, SortConfig};
pub use error::{Result, SortError};
pub use par::Scheduler;

/// Profiling scope, compiled out unless the `profile` feature is enabled.
#[macro_export]
macro_rules! scope {
    ($name:expr) => {
        #[cfg(feature = "profile")]
        profiling::scope!($name);
    };
}

/// Profiling scope that also logs its elapsed time with the `scope_print` feature.
#[macro_export]
macro_rules! scope_print {
    ($name:expr) => {
        $crate::scope!($name);
        #[cfg(feature = "scope_print")]
        let _scope_print = $crate::ScopePrint::new($name);
    };
}

/// Like `scope_print!` but only needs `scope_print_major`, for whole-sort scopes.
#[macro_export]
macro_rules! scope_print_major {
    ($name:expr) => {
        $crate::scope!($name);
        #[cfg(feature = "scope_print_major")]
        let _scope_print = $crate::ScopePrint::new($name);
    };
}

/// One of the five sorting engines.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
pub enum Algorithm {
    Brick,
    #[default]
    Merge,
    Quick,
    Bitonic,
    Radix,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Brick,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Bitonic,
        Algorithm::Radix,
    ];

    /// Sorts `data` ascending, doing any preprocessing the engine needs.
    ///
    /// Bitonic sort is run on a padded copy and radix sort computes the digit
    /// width itself, so every engine takes the same input here.
    pub fn sort(self, mut data: Vec<i64>, config: &SortConfig) -> Result<Vec<i64>> {
        match self {
            Algorithm::Brick => brick::sort_with(&mut data, config)?,
            Algorithm::Merge => merge::sort_with(&mut data, config)?,
            Algorithm::Quick => quick::sort_with(&mut data, config)?,
            Algorithm::Bitonic => {
                return bitonic::sort_padded(data, Order::Ascending, config);
            }
            Algorithm::Radix => {
                let digit_width = radix::max_digit_width(&data)?;
                radix::sort_with(&mut data, digit_width, config)?
            }
        }
        Ok(data)
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Brick => "brick",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Bitonic => "bitonic",
            Algorithm::Radix => "radix",
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "brick" => Ok(Self::Brick),
            "merge" => Ok(Self::Merge),
            "quick" => Ok(Self::Quick),
            "bitonic" => Ok(Self::Bitonic),
            "radix" => Ok(Self::Radix),
            _ => Err(format!(
                "Unknown algorithm: '{s}', valid algorithms: 'brick', 'merge', 'quick', 'bitonic', 'radix'"
            )),
        }
    }
}

#[inline]
pub fn is_sorted(data: &[i64]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[inline]
pub fn is_sorted_by_order(data: &[i64], order: Order) -> bool {
    match order {
        Order::Ascending => is_sorted(data),
        Order::Descending => data.windows(2).all(|w| w[0] >= w[1]),
    }
}

#[doc(hidden)]
pub struct ScopePrint {
    name: &'static str,
    start: Instant,
}

impl ScopePrint {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopePrint {
    fn drop(&mut self) {
        log::debug!("{:>10} {}", PrettyDuration(self.start.elapsed()), self.name);
    }
}

/// A wrapper struct for `std::time::Duration` to provide pretty-printing of durations.
#[doc(hidden)]
pub struct PrettyDuration(pub Duration);

impl std::fmt::Display for PrettyDuration {
    /// Durations are formatted as follows:
    /// - If the duration is greater than or equal to 1 second, it is formatted in seconds (s).
    /// - If the duration is greater than or equal to 1 millisecond but less than 1 second, it is formatted in milliseconds (ms).
    /// - If the duration is less than 1 millisecond, it is formatted in microseconds (µs).
    ///   In the case of seconds & milliseconds, the duration is always printed with a precision of two decimal places.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = self.0;
        if duration.as_secs() > 0 {
            let seconds =
                duration.as_secs() as f64 + f64::from(duration.subsec_nanos()) / 1_000_000_000.0;
            write!(f, "{seconds:.2}s ")
        } else if duration.subsec_millis() > 0 {
            let milliseconds =
                duration.as_millis() as f64 + f64::from(duration.subsec_micros() % 1_000) / 1_000.0;
            write!(f, "{milliseconds:.2}ms")
        } else {
            let microseconds = duration.as_micros();
            write!(f, "{microseconds}µs")
        }
    }
}

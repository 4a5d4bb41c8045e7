//! Most-significant-digit radix sort over base 10 digits.
//!
//! Only non-negative values are accepted. The caller passes the digit width of
//! the largest value, which [`max_digit_width`] computes.

use crate::{Result, SortConfig, SortError};

pub mod sort_utils;
pub mod sorter;

pub use sort_utils::{digit, max_digit_width, NUM_BUCKETS};

/// Number of decimal digits in `i64::MAX`.
pub const MAX_DIGIT_WIDTH: u32 = 19;

/// Sorts non-negative `data` whose largest value has `digit_width` digits,
/// using the default configuration.
pub fn sort(data: &mut [i64], digit_width: u32) -> Result<()> {
    sort_with(data, digit_width, &SortConfig::default())
}

pub fn sort_with(data: &mut [i64], digit_width: u32, config: &SortConfig) -> Result<()> {
    crate::scope_print_major!("radix::sort");
    log::debug!(
        "radix sort: {} elements, {} digits on {:?}",
        data.len(),
        digit_width,
        config.scheduler
    );

    let required = max_digit_width(data)?;
    if required > digit_width {
        return Err(SortError::DigitWidthTooSmall {
            digit_width,
            required,
        });
    }

    // By definition, this is already sorted
    if data.len() <= 1 {
        return Ok(());
    }

    // Digits past the width of i64::MAX are always zero
    let digit_width = digit_width.min(MAX_DIGIT_WIDTH);
    config.scheduler.init();
    sorter::sort_level(data, 1, digit_width, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scheduler;

    #[test]
    fn sorts_three_digit_values() {
        let mut data = vec![999, 4, 295, 666, 43, 66, 6, 576];
        sort(&mut data, 3).unwrap();
        assert_eq!(data, vec![4, 6, 43, 66, 295, 576, 666, 999]);
    }

    #[test]
    fn sorts_small_permutations() {
        let cases: [(&[i64], &[i64]); 5] = [
            (&[0, 1, 2, 3, 4, 5, 6, 7], &[0, 1, 2, 3, 4, 5, 6, 7]),
            (&[7, 6, 5, 4, 3, 2, 1, 0], &[0, 1, 2, 3, 4, 5, 6, 7]),
            (&[1, 3, 5, 7, 6, 4, 2, 0], &[0, 1, 2, 3, 4, 5, 6, 7]),
            (&[3, 0, 5, 7, 1, 6, 2, 4], &[0, 1, 2, 3, 4, 5, 6, 7]),
            (
                &[999, 4, 295, 666, 43, 66, 6, 576],
                &[4, 6, 43, 66, 295, 576, 666, 999],
            ),
        ];
        for scheduler in Scheduler::ALL {
            let config = SortConfig::with_scheduler(scheduler);
            for (input, expected) in cases {
                let mut data = input.to_vec();
                let width = max_digit_width(&data).unwrap();
                sort_with(&mut data, width, &config).unwrap();
                assert_eq!(data, expected, "{scheduler:?}");
            }
        }
    }

    #[test]
    fn wider_digit_width_than_needed() {
        let mut data = vec![50, 7, 123, 0, 7];
        sort(&mut data, 6).unwrap();
        assert_eq!(data, vec![0, 7, 7, 50, 123]);

        let mut data = vec![i64::MAX, 0, 1 << 40];
        sort(&mut data, 25).unwrap();
        assert_eq!(data, vec![0, 1 << 40, i64::MAX]);
    }

    #[test]
    fn rejects_negative_values() {
        let mut data = vec![4, 8, -2, 1];
        let err = sort(&mut data, 1).unwrap_err();
        assert!(matches!(err, SortError::NegativeValue { index: 2, value: -2 }));

        let mut single = vec![-1];
        assert!(sort(&mut single, 1).is_err());
    }

    #[test]
    fn rejects_too_small_digit_width() {
        let mut data = vec![1000, 5];
        let err = sort(&mut data, 3).unwrap_err();
        assert!(matches!(
            err,
            SortError::DigitWidthTooSmall {
                digit_width: 3,
                required: 4
            }
        ));
    }

    #[test]
    fn empty_and_single() {
        let mut empty: Vec<i64> = vec![];
        sort(&mut empty, 0).unwrap();
        assert!(empty.is_empty());

        let mut single = vec![31];
        sort(&mut single, 2).unwrap();
        assert_eq!(single, vec![31]);
    }
}

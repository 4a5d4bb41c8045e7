use std::io;

/// Errors returned by the sorting engines.
///
/// A sort that fails may leave the sequence partially reordered; there is no
/// rollback.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// Bitonic sort was handed a sequence that was not padded to a power of two.
    #[error("bitonic sort requires a power of two length, got {len}")]
    NotPowerOfTwo { len: usize },

    #[error("radix sort requires non-negative values, found {value} at index {index}")]
    NegativeValue { index: usize, value: i64 },

    #[error("digit width {digit_width} is too small, the largest value needs {required} digits")]
    DigitWidthTooSmall { digit_width: u32, required: u32 },

    /// An OS thread could not be spawned for a forked task.
    #[error("failed to spawn sort task: {0}")]
    ResourceExhausted(#[source] io::Error),

    #[error("radix bucket lock poisoned by a panicking task")]
    BucketPoisoned,
}

pub type Result<T> = std::result::Result<T, SortError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn resource_exhausted_keeps_the_spawn_error() {
        let err = SortError::ResourceExhausted(io::Error::new(
            io::ErrorKind::WouldBlock,
            "Resource temporarily unavailable",
        ));
        assert!(err.to_string().starts_with("failed to spawn sort task"));
        let source = err.source().and_then(|e| e.downcast_ref::<io::Error>());
        assert_eq!(source.map(io::Error::kind), Some(io::ErrorKind::WouldBlock));
    }
}

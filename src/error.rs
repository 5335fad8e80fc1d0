//! Error types reported by the containers.
//!
//! The taxonomy is deliberately small. [`IndexError`] covers bad positional
//! arguments to checked operations, [`EmptyError`] covers draining an empty
//! container through the checked surfaces, and [`TryReserveError`] covers
//! fallible capacity requests. Allocation failure on the infallible paths is
//! never reported through these types: it goes straight to
//! [`std::alloc::handle_alloc_error`].

use core::alloc::Layout;
use core::fmt;

// ============================================================================
// IndexError
// ============================================================================

/// A positional argument was outside the container's live range.
///
/// Returned by `Array::at`, `Array::insert`, `Array::remove` and friends.
/// Carries the offending index and the length observed at call time so the
/// caller can report the mismatch without re-querying the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    /// The index the caller passed.
    pub index: usize,
    /// The container length at the time of the call.
    pub len: usize,
}

impl IndexError {
    #[inline]
    pub(crate) fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for length {}", self.index, self.len)
    }
}

impl std::error::Error for IndexError {}

// ============================================================================
// EmptyError
// ============================================================================

/// A draining or peeking operation was called on an empty container.
///
/// Returned by `Queue::dequeue`/`peek`, `Stack::pop`/`peek` and
/// `PriorityQueue::pop`/`peek`. Containers whose empty-access surface is
/// precondition-based (`Array::front` and friends) report `None` or use
/// `unsafe` unchecked variants instead; they never produce this error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyError;

impl fmt::Display for EmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("container is empty")
    }
}

impl std::error::Error for EmptyError {}

// ============================================================================
// TryReserveError
// ============================================================================

/// A fallible capacity request could not be satisfied.
///
/// Returned by the `try_reserve` family. The infallible counterparts
/// (`reserve`, plain growth on push) translate `CapacityOverflow` into a
/// panic and `AllocFailed` into [`std::alloc::handle_alloc_error`], so an
/// allocator refusal is never silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryReserveError {
    /// The requested capacity exceeded the maximum valid allocation size.
    CapacityOverflow,
    /// The allocator refused the request.
    AllocFailed {
        /// The layout of the allocation that failed.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => f.write_str("requested capacity exceeds maximum"),
            Self::AllocFailed { layout } => {
                write!(f, "allocation of {} bytes failed", layout.size())
            }
        }
    }
}

impl std::error::Error for TryReserveError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_display() {
        let err = IndexError::new(5, 3);
        assert_eq!(err.to_string(), "index 5 out of range for length 3");
        assert_eq!(err.index, 5);
        assert_eq!(err.len, 3);
    }

    #[test]
    fn empty_error_display() {
        assert_eq!(EmptyError.to_string(), "container is empty");
    }

    #[test]
    fn try_reserve_error_display() {
        assert_eq!(
            TryReserveError::CapacityOverflow.to_string(),
            "requested capacity exceeds maximum"
        );
        let layout = Layout::new::<[u64; 4]>();
        let err = TryReserveError::AllocFailed { layout };
        assert_eq!(err.to_string(), "allocation of 32 bytes failed");
    }

    fn assert_error<T: std::error::Error>() {}

    #[test]
    fn error_types_implement_error_trait() {
        assert_error::<IndexError>();
        assert_error::<EmptyError>();
        assert_error::<TryReserveError>();
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(IndexError::new(1, 0), IndexError::new(1, 0));
        assert_ne!(IndexError::new(1, 0), IndexError::new(2, 0));
        assert_eq!(EmptyError, EmptyError);
        assert_eq!(
            TryReserveError::CapacityOverflow,
            TryReserveError::CapacityOverflow
        );
    }
}

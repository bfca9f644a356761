//! Error type for sorter construction and partial-order sorting.
//!
//! Comparator errors from [`try_sort_by`](crate::try_sort_by) are returned to
//! the caller unchanged and never wrapped in [`SortError`].

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub enum SortError {
    /// Two elements had no defined order (e.g. a NaN was compared).
    Incomparable,

    /// Fork threshold is below the smallest splittable range.
    InvalidForkThreshold {
        /// The threshold provided.
        got: usize,
        /// Smallest accepted threshold.
        min: usize,
    },

    /// A dedicated pool was requested with zero threads.
    InvalidThreadCount,

    /// Rayon could not start the dedicated pool.
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Incomparable => write!(f, "Elements have no total order"),
            Self::InvalidForkThreshold { got, min } => {
                write!(f, "Invalid fork threshold: {got} (must be at least {min})")
            }
            Self::InvalidThreadCount => write!(f, "Thread count must be at least 1"),
            Self::ThreadPool(err) => write!(f, "Failed to build thread pool: {err}"),
        }
    }
}

impl Error for SortError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for SortError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}

//! Stable parallel merge sort built on fork-join recursion.
//!
//! The input is copied into two buffers that swap source/target roles at
//! every recursion level. Each level splits its range in half, sorts both
//! halves concurrently with [`rayon::join`], waits for both, then merges the
//! two runs into its target. Ranges below [`SortConfig::fork_threshold`]
//! recurse sequentially; [`SortConfig::unbounded`] forks all the way down.
//!
//! ```
//! let sorted = fork_join_sort::sort(&[5, 3, 1, 4, 2]);
//! assert_eq!(sorted, [1, 2, 3, 4, 5]);
//! ```

pub mod config;
pub mod errors;
pub mod merge;
pub mod sorter;

mod fork_join;

use std::cmp::Ordering;

pub use config::SortConfig;
pub use errors::SortError;
pub use sorter::ForkJoinSorter;

/// Returns a sorted copy of `input` using the default fork policy.
pub fn sort<T>(input: &[T]) -> Vec<T>
where
    T: Ord + Clone + Send + Sync,
{
    ForkJoinSorter::default().sort(input)
}

/// Returns a copy of `input` sorted by `cmp`. Equal elements keep their order.
pub fn sort_by<T, F>(input: &[T], cmp: F) -> Vec<T>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    ForkJoinSorter::default().sort_by(input, cmp)
}

/// Like [`sort_by`], but the first comparator error fails the whole sort.
pub fn try_sort_by<T, F, E>(input: &[T], cmp: F) -> Result<Vec<T>, E>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Result<Ordering, E> + Sync,
    E: Send,
{
    ForkJoinSorter::default().try_sort_by(input, cmp)
}

/// Sorts a `PartialOrd` type, failing with [`SortError::Incomparable`] when
/// two compared elements have no order (e.g. NaN).
pub fn sort_partial<T>(input: &[T]) -> Result<Vec<T>, SortError>
where
    T: PartialOrd + Clone + Send + Sync,
{
    ForkJoinSorter::default().sort_partial(input)
}

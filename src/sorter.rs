//! Configured entry point.

use std::cmp::Ordering;
use std::convert::Infallible;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::SortConfig;
use crate::errors::SortError;
use crate::fork_join::Coordinator;

/// A fork-join merge sort with a fixed fork policy.
///
/// Every method copies the input into two fresh buffers, so the caller's
/// slice is never touched. Sorting is stable.
pub struct ForkJoinSorter {
    config: SortConfig,
    pool: Option<ThreadPool>,
}

impl ForkJoinSorter {
    /// Validates `config` and starts a dedicated pool if it asks for one.
    pub fn new(config: SortConfig) -> Result<Self, SortError> {
        config.validate()?;
        let pool = match config.num_threads {
            Some(num_threads) => {
                log::debug!("starting dedicated pool with {num_threads} threads");
                Some(
                    ThreadPoolBuilder::new()
                        .num_threads(num_threads)
                        .thread_name(|i| format!("fork-join-sort-{i}"))
                        .build()?,
                )
            }
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Number of threads forks are spread over.
    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    pub fn sort<T>(&self, input: &[T]) -> Vec<T>
    where
        T: Ord + Clone + Send + Sync,
    {
        self.sort_by(input, T::cmp)
    }

    pub fn sort_by<T, F>(&self, input: &[T], cmp: F) -> Vec<T>
    where
        T: Clone + Send + Sync,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        match self.try_sort_by(input, |a, b| Ok::<_, Infallible>(cmp(a, b))) {
            Ok(sorted) => sorted,
            Err(never) => match never {},
        }
    }

    /// Sorts with a comparator that may fail.
    ///
    /// The first error stops any forks that have not started yet and is
    /// returned as is. No partially sorted output is exposed.
    pub fn try_sort_by<T, F, E>(&self, input: &[T], cmp: F) -> Result<Vec<T>, E>
    where
        T: Clone + Send + Sync,
        F: Fn(&T, &T) -> Result<Ordering, E> + Sync,
        E: Send,
    {
        log::debug!(
            "sorting {} elements (fork threshold {}, max fork depth {:?}, {} threads)",
            input.len(),
            self.config.fork_threshold,
            self.config.max_fork_depth,
            self.current_num_threads(),
        );
        let run = || -> Result<Vec<T>, E> {
            let mut source = input.to_vec();
            let mut target = input.to_vec();
            Coordinator::new(&self.config, &cmp).sort(&mut source, &mut target)?;
            Ok(target)
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Sorts a partially ordered type, failing if any two compared elements
    /// are unordered.
    pub fn sort_partial<T>(&self, input: &[T]) -> Result<Vec<T>, SortError>
    where
        T: PartialOrd + Clone + Send + Sync,
    {
        self.try_sort_by(input, |a, b| a.partial_cmp(b).ok_or(SortError::Incomparable))
    }
}

impl Default for ForkJoinSorter {
    /// Default fork policy on the global rayon pool.
    fn default() -> Self {
        Self {
            config: SortConfig::default(),
            pool: None,
        }
    }
}

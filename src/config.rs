//! Fork policy and thread pool settings.

use crate::errors::SortError;

/// Ranges shorter than this are sorted without forking by default.
pub const DEFAULT_FORK_THRESHOLD: usize = 2048;

/// Smallest range that can be split at all.
pub const MIN_FORK_THRESHOLD: usize = 2;

/// Controls when the coordinator forks and which pool runs the forks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    /// Ranges with fewer elements than this recurse sequentially.
    pub fork_threshold: usize,
    /// Recursion levels at or below this depth may fork; deeper ones never do.
    /// `None` means no depth cap.
    pub max_fork_depth: Option<usize>,
    /// Size of a dedicated rayon pool. `None` runs on the global pool.
    pub num_threads: Option<usize>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            fork_threshold: DEFAULT_FORK_THRESHOLD,
            max_fork_depth: None,
            num_threads: None,
        }
    }
}

impl SortConfig {
    /// Forks at every level down to single elements, with no depth cap.
    pub fn unbounded() -> Self {
        Self {
            fork_threshold: MIN_FORK_THRESHOLD,
            ..Self::default()
        }
    }

    pub fn with_fork_threshold(mut self, fork_threshold: usize) -> Self {
        self.fork_threshold = fork_threshold;
        self
    }

    pub fn with_max_fork_depth(mut self, max_fork_depth: usize) -> Self {
        self.max_fork_depth = Some(max_fork_depth);
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Checks the settings without touching any thread pool.
    pub fn validate(&self) -> Result<(), SortError> {
        if self.fork_threshold < MIN_FORK_THRESHOLD {
            return Err(SortError::InvalidForkThreshold {
                got: self.fork_threshold,
                min: MIN_FORK_THRESHOLD,
            });
        }
        if self.num_threads == Some(0) {
            return Err(SortError::InvalidThreadCount);
        }
        Ok(())
    }

    /// Whether a range of `len` elements at recursion `depth` forks.
    #[inline]
    pub(crate) fn should_fork(&self, len: usize, depth: usize) -> bool {
        len >= self.fork_threshold && self.max_fork_depth.is_none_or(|max| depth <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SortConfig::default().validate().is_ok());
        assert!(SortConfig::unbounded().validate().is_ok());
    }

    #[test]
    fn test_unbounded_forks_every_split() {
        let config = SortConfig::unbounded();
        assert!(config.should_fork(2, 0));
        assert!(config.should_fork(2, 64));
        assert!(!config.should_fork(1, 0));
    }

    #[test]
    fn test_threshold_and_depth_cap() {
        let config = SortConfig::default()
            .with_fork_threshold(100)
            .with_max_fork_depth(3);
        assert!(config.should_fork(100, 0));
        assert!(config.should_fork(1000, 3));
        assert!(!config.should_fork(99, 0));
        assert!(!config.should_fork(1000, 4));
    }

    #[test]
    fn test_zero_depth_forks_only_root() {
        let config = SortConfig::unbounded().with_max_fork_depth(0);
        assert!(config.should_fork(10, 0));
        assert!(!config.should_fork(10, 1));
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert!(matches!(
            SortConfig::default().with_fork_threshold(1).validate(),
            Err(SortError::InvalidForkThreshold { got: 1, min: 2 })
        ));
        assert!(matches!(
            SortConfig::default().with_num_threads(0).validate(),
            Err(SortError::InvalidThreadCount)
        ));
    }
}

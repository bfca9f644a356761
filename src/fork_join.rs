//! Fork-join merge sort over a pair of ping-pong buffers.
//!
//! Every invocation owns the same index range in both buffers. Children get
//! the two halves of that range with the buffer roles swapped: they read from
//! the parent's target and write their sorted halves into the parent's source,
//! which the parent then merges back into its target. Sibling ranges never
//! overlap, so the halves can be handed to `rayon::join` as plain `&mut`
//! slices without any locking.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use crate::config::SortConfig;
use crate::merge::try_merge_runs;

/// Why an invocation stopped without producing a sorted range.
#[derive(Debug)]
pub(crate) enum Halt<E> {
    /// The comparator failed in this subtree.
    Failed(E),
    /// Another subtree failed first; this one gave up early.
    Aborted,
}

impl<E> Halt<E> {
    /// Joins two sibling results. A real failure beats an early abort.
    fn join(left: Result<(), Self>, right: Result<(), Self>) -> Result<(), Self> {
        match (left, right) {
            (Err(Halt::Failed(e)), _) | (_, Err(Halt::Failed(e))) => Err(Halt::Failed(e)),
            (Err(Halt::Aborted), _) | (_, Err(Halt::Aborted)) => Err(Halt::Aborted),
            (Ok(()), Ok(())) => Ok(()),
        }
    }
}

pub(crate) struct Coordinator<'a, F> {
    config: &'a SortConfig,
    cmp: &'a F,
    halted: AtomicBool,
}

impl<'a, F> Coordinator<'a, F> {
    pub(crate) fn new(config: &'a SortConfig, cmp: &'a F) -> Self {
        Self {
            config,
            cmp,
            halted: AtomicBool::new(false),
        }
    }

    /// Sorts `source` into `target`.
    ///
    /// Both slices must start out holding the same elements. On success
    /// `target` is sorted; `source` is left in an unspecified order.
    pub(crate) fn sort<T, E>(&self, source: &mut [T], target: &mut [T]) -> Result<(), E>
    where
        T: Clone + Send,
        E: Send,
        F: Fn(&T, &T) -> Result<Ordering, E> + Sync,
    {
        debug_assert_eq!(source.len(), target.len());
        match self.recurse(source, target, 0, true) {
            Ok(()) => Ok(()),
            Err(Halt::Failed(e)) => Err(e),
            // Every abort is caused by a failure on a path that reaches the root.
            Err(Halt::Aborted) => unreachable!("sort aborted without a failure"),
        }
    }

    /// Recursively sorts `source` into `target`.
    ///
    /// The children run with the roles swapped, so their output lands in
    /// `source`, which is then merged into `target`. `forked` tells whether
    /// this invocation was itself started by a fork.
    fn recurse<T, E>(
        &self,
        source: &mut [T],
        target: &mut [T],
        depth: usize,
        forked: bool,
    ) -> Result<(), Halt<E>>
    where
        T: Clone + Send,
        E: Send,
        F: Fn(&T, &T) -> Result<Ordering, E> + Sync,
    {
        let len = source.len();
        // Base case: 0 or 1 elements are already in place in both buffers.
        if len <= 1 {
            return Ok(());
        }
        if self.halted.load(AtomicOrdering::Relaxed) {
            return Err(Halt::Aborted);
        }

        let middle = len / 2;
        let (source_left, source_right) = source.split_at_mut(middle);
        let (target_left, target_right) = target.split_at_mut(middle);

        let (left, right) = if self.config.should_fork(len, depth) {
            rayon::join(
                || self.recurse(target_left, source_left, depth + 1, true),
                || self.recurse(target_right, source_right, depth + 1, true),
            )
        } else {
            if forked {
                log::trace!("sequential from depth {depth} ({len} elements)");
            }
            (
                self.recurse(target_left, source_left, depth + 1, false),
                self.recurse(target_right, source_right, depth + 1, false),
            )
        };
        Halt::join(left, right)?;

        try_merge_runs(source, middle, target, self.cmp).map_err(|e| {
            if !self.halted.swap(true, AtomicOrdering::Relaxed) {
                log::debug!("comparison failed at depth {depth}, halting remaining forks");
            }
            Halt::Failed(e)
        })
    }
}

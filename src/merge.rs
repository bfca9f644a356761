//! Two-run merge.
//!
//! Both functions read two adjacent sorted runs `source[..middle]` and
//! `source[middle..]` and write their stable interleaving into `target`.
//! Ties go to the left run. Every element of `target` is written exactly once
//! and at most `source.len()` comparisons are made.

use std::cmp::Ordering;
use std::convert::Infallible;

/// Merges `source[..middle]` and `source[middle..]` into `target`.
pub fn merge_runs<T, F>(source: &[T], middle: usize, target: &mut [T], cmp: F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    match try_merge_runs(source, middle, target, |a, b| {
        Ok::<_, Infallible>(cmp(a, b))
    }) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Fallible version of [`merge_runs`].
///
/// Stops at the first comparator error. `target` is then only partially
/// written and must be treated as garbage by the caller.
pub fn try_merge_runs<T, F, E>(
    source: &[T],
    middle: usize,
    target: &mut [T],
    cmp: F,
) -> Result<(), E>
where
    T: Clone,
    F: Fn(&T, &T) -> Result<Ordering, E>,
{
    debug_assert_eq!(source.len(), target.len());
    debug_assert!(middle <= source.len());

    let (left, right) = source.split_at(middle);
    let mut i = 0;
    let mut j = 0;
    let mut out = target.iter_mut();

    while i < left.len() && j < right.len() {
        // Both runs are non-empty, so `out` has a slot for this element.
        let Some(slot) = out.next() else { break };
        if cmp(&left[i], &right[j])? != Ordering::Greater {
            slot.clone_from(&left[i]);
            i += 1;
        } else {
            slot.clone_from(&right[j]);
            j += 1;
        }
    }

    // Drain whichever run is left over.
    for (slot, value) in out.zip(left[i..].iter().chain(&right[j..])) {
        slot.clone_from(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_interleaved() {
        let source = [1, 3, 5, 7, 2, 4, 6, 8];
        let mut target = [0; 8];
        merge_runs(&source, 4, &mut target, Ord::cmp);
        assert_eq!(target, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_merge_uneven_runs() {
        let source = [4, 1, 2, 3, 5, 6];
        let mut target = [0; 6];
        merge_runs(&source, 1, &mut target, Ord::cmp);
        assert_eq!(target, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_merge_empty_side() {
        let source = [1, 2, 3];
        let mut target = [0; 3];
        merge_runs(&source, 0, &mut target, Ord::cmp);
        assert_eq!(target, [1, 2, 3]);
        merge_runs(&source, 3, &mut target, Ord::cmp);
        assert_eq!(target, [1, 2, 3]);

        let mut nothing: [i32; 0] = [];
        merge_runs(&[], 0, &mut nothing, Ord::cmp);
    }

    #[test]
    fn test_merge_ties_prefer_left_run() {
        // (key, origin)
        let source = [(1, 'a'), (2, 'a'), (1, 'b'), (2, 'b')];
        let mut target = [(0, ' '); 4];
        merge_runs(&source, 2, &mut target, |x, y| x.0.cmp(&y.0));
        assert_eq!(target, [(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }

    #[test]
    fn test_merge_comparison_count_bounded() {
        use std::cell::Cell;

        let source = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut target = [0; 10];
        let calls = Cell::new(0usize);
        merge_runs(&source, 5, &mut target, |a, b| {
            calls.set(calls.get() + 1);
            a.cmp(b)
        });
        assert_eq!(target, source);
        // Left run drains first, so only its elements are compared.
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_try_merge_stops_on_error() {
        let source = [1, 3, 2, 4];
        let mut target = [0; 4];
        let result = try_merge_runs(&source, 2, &mut target, |a: &i32, b: &i32| {
            if *a == 3 || *b == 3 {
                Err("three")
            } else {
                Ok(a.cmp(b))
            }
        });
        assert_eq!(result, Err("three"));
    }
}

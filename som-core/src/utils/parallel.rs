#[cfg(test)]
#[path = "../../tests/unit/utils/parallel_test.rs"]
mod parallel_test;

use rayon::prelude::*;

/// Maps collection and collects results into vector in parallel.
pub fn parallel_collect<T, F, R>(source: &[T], map_op: F) -> Vec<R>
where
    T: Send + Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    source.par_iter().map(map_op).collect()
}

/// Performs fallible mutable foreach in parallel. Returns only when all items are processed
/// or when the first error is observed.
pub fn parallel_try_foreach_mut<T, F, E>(source: &mut [T], action: F) -> Result<(), E>
where
    T: Send + Sync,
    F: Fn(&mut T) -> Result<(), E> + Send + Sync,
    E: Send,
{
    source.par_iter_mut().try_for_each(action)
}

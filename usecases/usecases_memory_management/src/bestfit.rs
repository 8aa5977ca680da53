//! Best-Fit Search
//!
//! Best-fit picks the smallest free partition that is large enough to
//! satisfy the request. This minimizes the leftover of each split but can
//! leave many slivers too small to be useful.

use entities_memory_partition::Partition;

/// Find the smallest free partition with at least `size` units.
///
/// Among equally small candidates the lowest address wins.
pub fn best_fit(partitions: &[Partition], size: usize) -> Option<usize> {
    // min_by_key keeps the first of several equal minima
    partitions
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_free() && p.size() >= size)
        .min_by_key(|(_, p)| p.size())
        .map(|(index, _)| index)
}

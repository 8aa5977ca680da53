//! Free Partition Coalescing
//!
//! Merges neighbouring free partitions after a release. The pass restarts
//! from the head after every merge and stops once a full scan finds nothing
//! to merge, so runs of three or more free partitions collapse completely.

use entities_memory_partition::Partition;

/// Merge every pair of list-adjacent, physically contiguous free partitions.
///
/// Returns the number of merges performed. A second call on the result
/// always returns 0.
pub fn coalesce(partitions: &mut Vec<Partition>) -> usize {
    let mut merges = 0;
    loop {
        let Some(index) = partitions
            .windows(2)
            .position(|pair| pair[0].can_merge_with(&pair[1]))
        else {
            break;
        };
        let next = partitions.remove(index + 1);
        log::trace!("coalescing {} into {}", next, partitions[index]);
        partitions[index].absorb(next);
        merges += 1;
    }
    merges
}

//! Worst-Fit Search
//!
//! Worst-fit picks the largest free partition that can satisfy the request,
//! so that the remainder left after a split stays as large as possible.

use entities_memory_partition::Partition;

/// Find the largest free partition with at least `size` units.
///
/// Among equally large candidates the lowest address wins.
pub fn worst_fit(partitions: &[Partition], size: usize) -> Option<usize> {
    let mut worst: Option<(usize, usize)> = None;
    for (index, p) in partitions.iter().enumerate() {
        if !p.is_free() || p.size() < size {
            continue;
        }
        // Strictly larger only, so earlier addresses keep ties
        match worst {
            Some((_, largest)) if p.size() <= largest => {}
            _ => worst = Some((index, p.size())),
        }
    }
    worst.map(|(index, _)| index)
}

//! First-Fit Search
//!
//! First-fit picks the first free partition, in address order, that is large
//! enough to satisfy the request. It is the cheapest search but tends to
//! leave small fragments near the low end of the address space.

use entities_memory_partition::Partition;

/// Find the first free partition with at least `size` units.
///
/// The table is scanned in address order and the first match wins.
pub fn first_fit(partitions: &[Partition], size: usize) -> Option<usize> {
    partitions
        .iter()
        .position(|p| p.is_free() && p.size() >= size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Partition> {
        vec![
            Partition::free(0, 30),
            Partition::busy(30, 20, "A"),
            Partition::free(50, 10),
            Partition::busy(60, 10, "B"),
            Partition::free(70, 50),
        ]
    }

    #[test]
    fn test_firstfit_lowest_address() {
        assert_eq!(first_fit(&layout(), 10), Some(0));
    }

    #[test]
    fn test_firstfit_skips_small_blocks() {
        assert_eq!(first_fit(&layout(), 31), Some(4));
    }

    #[test]
    fn test_firstfit_skips_busy_blocks() {
        let partitions = vec![Partition::busy(0, 100, "A"), Partition::free(100, 5)];
        assert_eq!(first_fit(&partitions, 5), Some(1));
    }

    #[test]
    fn test_firstfit_none() {
        assert_eq!(first_fit(&layout(), 51), None);
        assert_eq!(first_fit(&[], 1), None);
    }
}

//! Memory Usage Summary
//!
//! Aggregate figures over a partition table, used for status displays and
//! for judging external fragmentation.

use entities_memory_partition::Partition;

/// Memory usage summary
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryUsage {
    /// Size of the address space
    pub total: usize,
    /// Units owned by processes (external reservations excluded)
    pub used: usize,
    /// Units held by external reservations
    pub reserved: usize,
    /// Units in free partitions
    pub free: usize,
    /// Largest single free partition
    pub largest_free: usize,
    pub free_partitions: usize,
    pub busy_partitions: usize,
}

impl MemoryUsage {
    pub fn from_partitions(partitions: &[Partition], total: usize) -> Self {
        let mut usage = MemoryUsage {
            total,
            ..MemoryUsage::default()
        };
        for p in partitions {
            if p.is_free() {
                usage.free += p.size();
                usage.free_partitions += 1;
                usage.largest_free = usage.largest_free.max(p.size());
            } else if p.is_external() {
                usage.reserved += p.size();
            } else {
                usage.used += p.size();
                usage.busy_partitions += 1;
            }
        }
        usage
    }

    /// Share of free space outside the largest free partition (0.0 to 1.0).
    ///
    /// 0.0 means all free space is in one piece.
    pub fn external_fragmentation(&self) -> f64 {
        if self.free == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free as f64
    }
}

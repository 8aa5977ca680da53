//! Partition Entity
//!
//! Provides the Partition struct and its status type.
//!
//! Addresses and sizes are expressed in abstract units (KB in the simulator
//! front end). A partition never has a zero size once it is part of a table.

use std::fmt;

/// Owner name reserved for address ranges held outside the simulation.
///
/// Pre-fragmented layouts use it to cover the gaps between free segments so
/// that every unit of the address space still belongs to some partition.
pub const EXTERNAL_OWNER: &str = "<external>";

/// Partition status
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartitionStatus {
    /// Available for allocation
    Free,
    /// Owned by the named process
    Busy(String),
}

impl PartitionStatus {
    /// Short label used when rendering tables
    pub fn label(&self) -> &'static str {
        match self {
            PartitionStatus::Free => "free",
            PartitionStatus::Busy(owner) if owner == EXTERNAL_OWNER => "reserved",
            PartitionStatus::Busy(_) => "busy",
        }
    }
}

/// A contiguous range of the simulated address space
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    start: usize,
    size: usize,
    status: PartitionStatus,
}

impl Partition {
    /// Create a free partition covering `[start, start + size)`
    pub fn free(start: usize, size: usize) -> Self {
        Self {
            start,
            size,
            status: PartitionStatus::Free,
        }
    }

    /// Create a partition owned by `owner`
    pub fn busy(start: usize, size: usize, owner: impl Into<String>) -> Self {
        Self {
            start,
            size,
            status: PartitionStatus::Busy(owner.into()),
        }
    }

    /// Create a gap reservation owned by [`EXTERNAL_OWNER`]
    pub fn external(start: usize, size: usize) -> Self {
        Self::busy(start, size, EXTERNAL_OWNER)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the last address of the partition
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    pub fn status(&self) -> &PartitionStatus {
        &self.status
    }

    pub fn is_free(&self) -> bool {
        matches!(self.status, PartitionStatus::Free)
    }

    /// Owning process, `None` when free
    pub fn owner(&self) -> Option<&str> {
        match &self.status {
            PartitionStatus::Free => None,
            PartitionStatus::Busy(owner) => Some(owner.as_str()),
        }
    }

    /// Check whether this partition is busy and owned by `process`
    pub fn is_owned_by(&self, process: &str) -> bool {
        self.owner() == Some(process)
    }

    /// Check whether the partition is an external gap reservation
    pub fn is_external(&self) -> bool {
        self.is_owned_by(EXTERNAL_OWNER)
    }

    /// Check whether `next` begins exactly where this partition ends
    pub fn adjoins(&self, next: &Partition) -> bool {
        self.end() == next.start
    }

    /// Two free partitions may merge only if they are physically contiguous
    pub fn can_merge_with(&self, next: &Partition) -> bool {
        self.is_free() && next.is_free() && self.adjoins(next)
    }

    /// Hand the partition to `owner` without changing its range
    pub fn occupy(&mut self, owner: impl Into<String>) {
        self.status = PartitionStatus::Busy(owner.into());
    }

    /// Return the partition to the free state
    pub fn vacate(&mut self) {
        self.status = PartitionStatus::Free;
    }

    /// Cut `size` units off the low end of the partition.
    ///
    /// Returns the detached low range as a partition owned by `owner` and
    /// leaves `self` covering the remaining high range. The caller guarantees
    /// `size < self.size()`.
    pub fn split_front(&mut self, size: usize, owner: impl Into<String>) -> Partition {
        debug_assert!(size > 0 && size < self.size);
        let front = Partition::busy(self.start, size, owner);
        self.start += size;
        self.size -= size;
        front
    }

    /// Absorb the following contiguous partition into this one
    pub fn absorb(&mut self, next: Partition) {
        debug_assert!(self.adjoins(&next));
        self.size += next.size;
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner() {
            Some(owner) => write!(f, "[{}, {}) busy by {}", self.start, self.end(), owner),
            None => write!(f, "[{}, {}) free", self.start, self.end()),
        }
    }
}

/// Read-only snapshot of one partition, detached from the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionView {
    /// Position in the table (0-based, address order)
    pub index: usize,
    pub start: usize,
    pub size: usize,
    pub end: usize,
    pub status: PartitionStatus,
}

impl PartitionView {
    pub fn from_partition(index: usize, partition: &Partition) -> Self {
        Self {
            index,
            start: partition.start(),
            size: partition.size(),
            end: partition.end(),
            status: partition.status().clone(),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match &self.status {
            PartitionStatus::Free => None,
            PartitionStatus::Busy(owner) => Some(owner.as_str()),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.status, PartitionStatus::Free)
    }
}

//! Entities Layer: Memory Partitions
//!
//! Provides the partition record used by the dynamic partition allocator.
//! A partition is a half-open address range `[start, start + size)` that is
//! either free or owned by a named process.
//!
//! ## Overview
//!
//! The `entities_memory_partition` crate is the innermost layer of the
//! simulator. It knows nothing about placement strategies or tables; it only
//! defines what a partition is and the relations between two partitions
//! (contiguity, merge eligibility) that the use cases layer builds on.
//!
//! ## See Also
//!
//! - [`usecases_memory_management`](../../usecases/usecases_memory_management/index.html): Partition table and fit strategies

pub mod partition;

// Re-export main types for convenience
pub use partition::{Partition, PartitionStatus, PartitionView, EXTERNAL_OWNER};

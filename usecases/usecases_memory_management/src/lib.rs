//! Use Cases Layer: Memory Management
//!
//! Provides the variable-partition memory allocator of the simulator. A single
//! address space is carved into partitions that are either free or owned by a
//! named process; allocations split free partitions and releases coalesce them.
//!
//! ## Overview
//!
//! The `usecases_memory_management` crate sits on top of the Entities layer
//! (`entities_memory_partition`) and holds all of the allocation logic. Callers
//! in the frameworks layer only supply a process name and a size and render
//! the snapshot they get back.
//!
//! ## Placement Strategies
//!
//! - **[`firstfit`](firstfit/index.html)**: First-fit search - first free
//!   partition in address order that is large enough
//!
//! - **[`bestfit`](bestfit/index.html)**: Best-fit search - smallest free
//!   partition that is large enough
//!
//! - **[`worstfit`](worstfit/index.html)**: Worst-fit search - largest free
//!   partition that is large enough
//!
//! - **[`allocator`](allocator/index.html)**: Strategy selection and error types
//!
//! ## Table
//!
//! - **[`partition_table`](partition_table/index.html)**: Allocate, release,
//!   snapshot and reset
//! - **[`coalesce`](coalesce/index.html)**: Fixed-point merge of free neighbours
//! - **[`initialization`](initialization/index.html)**: Single and fragmented
//!   starting layouts
//! - **[`usage`](usage/index.html)**: Usage and fragmentation figures
//!
//! ## See Also
//!
//! - [`entities_memory_partition`](../../entities/entities_memory_partition/index.html): Partition records

pub mod allocator;
pub mod bestfit;
pub mod coalesce;
pub mod config;
pub mod firstfit;
pub mod initialization;
pub mod partition_table;
pub mod usage;
pub mod worstfit;

pub use allocator::{AllocationError, Released, Strategy};
pub use config::{InitMode, TableConfig, DEFAULT_TOTAL_SIZE};
pub use initialization::{verify_layout, LayoutError};
pub use partition_table::PartitionTable;
pub use usage::MemoryUsage;

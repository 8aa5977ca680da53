//! Partition Table
//!
//! The variable-partition allocator. The table owns an address-ordered
//! `Vec<Partition>` that tiles `[0, total_size)` with no gaps or overlaps.
//!
//! ## Operations
//!
//! - **allocate**: pick a free partition with the active strategy, then
//!   either hand it over whole (exact fit) or split off its low end
//! - **release**: free every partition owned by a process, then coalesce
//! - **snapshot**: detached, address-ordered view for display
//! - **reset**: rebuild the initial layout in the configured mode
//!
//! Failed operations leave the table untouched.
//!
//! ## Examples
//!
//! ```rust
//! use usecases_memory_management::{PartitionTable, TableConfig};
//!
//! let mut table = PartitionTable::new(TableConfig::new(200)).unwrap();
//! assert!(table.allocate("P", 40));
//! assert!(table.release("P"));
//! assert_eq!(table.len(), 1);
//! ```

use entities_memory_partition::{Partition, PartitionView};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::allocator::{validate_process, validate_request, AllocationError, Released, Strategy};
use crate::coalesce::coalesce;
use crate::config::TableConfig;
use crate::initialization::{build_layout, verify_layout};
use crate::usage::MemoryUsage;

/// Variable-partition memory table
#[derive(Debug)]
pub struct PartitionTable {
    config: TableConfig,
    partitions: Vec<Partition>,
    rng: SmallRng,
}

impl PartitionTable {
    /// Create a table laid out according to `config.mode`
    pub fn new(config: TableConfig) -> Result<Self, AllocationError> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let partitions = build_layout(config.mode, config.total_size, &mut rng)?;
        log::debug!(
            "initialized {} units as {} partition(s) ({:?}, {})",
            config.total_size,
            partitions.len(),
            config.mode,
            config.strategy
        );
        Ok(Self {
            config,
            partitions,
            rng,
        })
    }

    /// Create a table from an explicit layout.
    ///
    /// `config.total_size` must equal the covered range; the layout is used
    /// as-is until the next [`reset`](Self::reset), which falls back to
    /// `config.mode`.
    pub fn from_partitions(
        config: TableConfig,
        partitions: Vec<Partition>,
    ) -> Result<Self, AllocationError> {
        verify_layout(&partitions, config.total_size)?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            config,
            partitions,
            rng,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    /// Switch the placement strategy used by later allocations
    pub fn set_strategy(&mut self, strategy: Strategy) {
        log::debug!("strategy {} -> {}", self.config.strategy, strategy);
        self.config.strategy = strategy;
    }

    pub fn total_size(&self) -> usize {
        self.config.total_size
    }

    /// Partitions in address order
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Always false for an initialized table
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Index of the partition the active strategy would pick for `size`
    pub fn find_target(&self, size: usize) -> Option<usize> {
        self.config.strategy.select(&self.partitions, size)
    }

    /// Allocate `size` units to `process`.
    ///
    /// Returns the start address of the new busy partition.
    pub fn try_allocate(&mut self, process: &str, size: usize) -> Result<usize, AllocationError> {
        validate_request(process, size)?;

        let Some(index) = self.find_target(size) else {
            let largest_free = self.largest_free();
            log::debug!(
                "{}: no free partition for {} ({} units), largest free is {}",
                self.config.strategy,
                process,
                size,
                largest_free
            );
            return Err(AllocationError::OutOfSpace {
                requested: size,
                largest_free,
            });
        };

        let target = &mut self.partitions[index];
        let start = target.start();
        if target.size() == size {
            target.occupy(process);
            log::debug!("{}: exact fit {} for {}", self.config.strategy, target, process);
            return Ok(start);
        }

        // Reserve before splitting so a failure leaves the table untouched
        self.partitions
            .try_reserve(1)
            .map_err(|_| AllocationError::InternalAllocationFailure)?;

        let busy = self.partitions[index].split_front(size, process);
        log::debug!(
            "{}: split {} for {}, remainder {}",
            self.config.strategy,
            busy,
            process,
            self.partitions[index]
        );
        // The shrunk free partition keeps its slot; the busy part goes in front
        self.partitions.insert(index, busy);
        Ok(start)
    }

    /// Allocate `size` units to `process`, reporting only success
    pub fn allocate(&mut self, process: &str, size: usize) -> bool {
        self.try_allocate(process, size).is_ok()
    }

    /// Free every partition owned by `process` and coalesce
    pub fn try_release(&mut self, process: &str) -> Result<Released, AllocationError> {
        validate_process(process)?;

        let mut released = Released::default();
        for p in self.partitions.iter_mut().filter(|p| p.is_owned_by(process)) {
            released.partitions += 1;
            released.size += p.size();
            p.vacate();
        }

        if released.partitions == 0 {
            log::debug!("release: {} owns no partition", process);
            return Err(AllocationError::NotFound {
                process: process.to_string(),
            });
        }

        released.merges = self.coalesce();
        log::debug!(
            "released {} partition(s), {} units from {}; {} merge(s)",
            released.partitions,
            released.size,
            process,
            released.merges
        );
        Ok(released)
    }

    /// Free every partition owned by `process`, reporting only success
    pub fn release(&mut self, process: &str) -> bool {
        self.try_release(process).is_ok()
    }

    /// Run the coalescing pass; returns the number of merges
    pub fn coalesce(&mut self) -> usize {
        coalesce(&mut self.partitions)
    }

    /// Detached, address-ordered copy of the table
    pub fn snapshot(&self) -> Vec<PartitionView> {
        self.partitions
            .iter()
            .enumerate()
            .map(|(index, p)| PartitionView::from_partition(index, p))
            .collect()
    }

    /// Discard all partitions and rebuild the layout in the configured mode
    pub fn reset(&mut self) -> Result<(), AllocationError> {
        self.partitions = build_layout(self.config.mode, self.config.total_size, &mut self.rng)?;
        log::debug!("reset to {} partition(s)", self.partitions.len());
        Ok(())
    }

    pub fn usage(&self) -> MemoryUsage {
        MemoryUsage::from_partitions(&self.partitions, self.config.total_size)
    }

    /// Size of the largest free partition, 0 when none
    pub fn largest_free(&self) -> usize {
        self.partitions
            .iter()
            .filter(|p| p.is_free())
            .map(Partition::size)
            .max()
            .unwrap_or(0)
    }

    /// Partitions owned by `process`
    pub fn owned_by<'a>(&'a self, process: &'a str) -> impl Iterator<Item = &'a Partition> + 'a {
        self.partitions.iter().filter(move |p| p.is_owned_by(process))
    }
}

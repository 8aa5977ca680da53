//! Table Configuration
//!
//! Holds the settings a partition table is created with. The table keeps its
//! own copy, so several tables with different strategies can coexist.

use crate::allocator::Strategy;
use crate::initialization::DEFAULT_SEGMENTS;

/// Default address space size (KB)
pub const DEFAULT_TOTAL_SIZE: usize = 1024;

/// Initial layout of the address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMode {
    /// One free partition spanning the whole space
    #[default]
    Single,
    /// Three quarters of the space split into jittered free segments separated
    /// by external reservations, plus one trailing free segment
    Fragmented {
        /// Number of jittered free segments
        segments: usize,
    },
}

impl InitMode {
    /// Fragmented layout with the default segment count
    pub fn fragmented() -> Self {
        InitMode::Fragmented {
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Partition table configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Size of the simulated address space
    pub total_size: usize,
    /// Active placement strategy
    pub strategy: Strategy,
    /// Layout used on initialization and reset
    pub mode: InitMode,
    /// Seed for the layout jitter; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            total_size: DEFAULT_TOTAL_SIZE,
            strategy: Strategy::FirstFit,
            mode: InitMode::Single,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn new(total_size: usize) -> Self {
        Self {
            total_size,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_mode(mut self, mode: InitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

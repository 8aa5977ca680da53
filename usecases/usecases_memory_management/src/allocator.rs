//! Strategy and Error Types
//!
//! Defines the placement strategies and the error taxonomy shared by every
//! operation of the partition table.
//!
//! ## Placement Strategies
//!
//! - **FirstFit**: Lowest-address free partition that is large enough
//! - **BestFit**: Smallest free partition that is large enough
//! - **WorstFit**: Largest free partition that is large enough
//!
//! ## Examples
//!
//! ```rust
//! use usecases_memory_management::Strategy;
//!
//! assert_eq!(Strategy::from_code(2), Strategy::BestFit);
//! // Unknown menu codes fall back to first-fit
//! assert_eq!(Strategy::from_code(9), Strategy::FirstFit);
//! ```
//!
//! ## See Also
//!
//! - [`firstfit`](super::firstfit/index.html): First-fit search
//! - [`bestfit`](super::bestfit/index.html): Best-fit search
//! - [`worstfit`](super::worstfit/index.html): Worst-fit search

use std::fmt;

use entities_memory_partition::{Partition, EXTERNAL_OWNER};
use thiserror::Error;

use crate::initialization::LayoutError;

/// Placement strategy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// First-fit placement strategy
    #[default]
    FirstFit,
    /// Best-fit placement strategy
    BestFit,
    /// Worst-fit placement strategy
    WorstFit,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];

    /// Map a menu code (1, 2, 3) to a strategy.
    ///
    /// Anything outside the known range normalizes to `FirstFit` instead of
    /// being rejected.
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => Strategy::BestFit,
            3 => Strategy::WorstFit,
            _ => Strategy::FirstFit,
        }
    }

    /// Menu code of the strategy
    pub fn code(self) -> i64 {
        match self {
            Strategy::FirstFit => 1,
            Strategy::BestFit => 2,
            Strategy::WorstFit => 3,
        }
    }

    /// Parse a strategy name or code, normalizing unknown input to `FirstFit`
    ///
    /// Accepts `first`, `best`, `worst` (optionally suffixed with `-fit` or
    /// `fit`, case-insensitive) and the numeric menu codes.
    pub fn parse_lenient(input: &str) -> Self {
        let normalized = input.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix("-fit")
            .or_else(|| normalized.strip_suffix("_fit"))
            .or_else(|| normalized.strip_suffix("fit"))
            .unwrap_or(&normalized);
        match name {
            "best" => Strategy::BestFit,
            "worst" => Strategy::WorstFit,
            "first" => Strategy::FirstFit,
            other => other
                .parse::<i64>()
                .map(Strategy::from_code)
                .unwrap_or(Strategy::FirstFit),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::FirstFit => "first-fit",
            Strategy::BestFit => "best-fit",
            Strategy::WorstFit => "worst-fit",
        }
    }

    /// Run this strategy's search over `partitions`.
    ///
    /// Returns the index of the chosen free partition, or `None` when no free
    /// partition can hold `size` units.
    pub fn select(self, partitions: &[Partition], size: usize) -> Option<usize> {
        match self {
            Strategy::FirstFit => crate::firstfit::first_fit(partitions, size),
            Strategy::BestFit => crate::bestfit::best_fit(partitions, size),
            Strategy::WorstFit => crate::worstfit::worst_fit(partitions, size),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Allocation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// No single free partition is large enough
    #[error("out of space: requested {requested}, largest free partition is {largest_free}")]
    OutOfSpace { requested: usize, largest_free: usize },
    /// The process owns no partition
    #[error("no partition is owned by process '{process}'")]
    NotFound { process: String },
    /// Malformed request (zero size, blank process name, reserved owner)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A caller-supplied layout breaks the coverage invariant
    #[error("invalid partition layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    /// Backing storage for a new partition record could not be reserved
    #[error("failed to reserve storage for a partition record")]
    InternalAllocationFailure,
}

/// Outcome of a successful release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Released {
    /// Number of partitions returned to the free state
    pub partitions: usize,
    /// Total units returned
    pub size: usize,
    /// Merges performed by the coalescing pass that followed
    pub merges: usize,
}

/// Validate a process name for allocation or release
pub(crate) fn validate_process(process: &str) -> Result<(), AllocationError> {
    if process.trim().is_empty() {
        return Err(AllocationError::InvalidRequest(
            "process name must not be empty".to_string(),
        ));
    }
    if process == EXTERNAL_OWNER {
        return Err(AllocationError::InvalidRequest(format!(
            "process name '{}' is reserved",
            EXTERNAL_OWNER
        )));
    }
    Ok(())
}

/// Validate an allocation request before it reaches the table
pub(crate) fn validate_request(process: &str, size: usize) -> Result<(), AllocationError> {
    validate_process(process)?;
    if size == 0 {
        return Err(AllocationError::InvalidRequest(
            "requested size must be positive".to_string(),
        ));
    }
    Ok(())
}

//! Command-Line Argument Parsing Module
//!
//! Uses clap for type-safe argument parsing.

use std::path::PathBuf;

use clap::Parser;
use usecases_memory_management::{InitMode, Strategy, TableConfig, DEFAULT_TOTAL_SIZE};

/// Partition simulator command-line arguments
#[derive(Parser, Debug)]
#[command(name = "partsim")]
#[command(about = "Dynamic partition memory allocation simulator")]
pub struct SimArgs {
    /// Size of the simulated address space in KB
    #[arg(long, default_value_t = DEFAULT_TOTAL_SIZE)]
    pub total_size: usize,

    /// Placement strategy: first, best, worst or 1-3 (unknown values mean first)
    #[arg(long, default_value = "first")]
    pub strategy: String,

    /// Start from a pre-fragmented layout instead of one free partition
    #[arg(long)]
    pub fragmented: bool,

    /// Number of free segments in the fragmented layout
    #[arg(long, default_value_t = usecases_memory_management::initialization::DEFAULT_SEGMENTS)]
    pub segments: usize,

    /// Seed for the fragmented layout jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SimArgs {
    /// Build the table configuration described by the arguments
    pub fn table_config(&self) -> TableConfig {
        let mode = if self.fragmented {
            InitMode::Fragmented {
                segments: self.segments,
            }
        } else {
            InitMode::Single
        };
        let config = TableConfig::new(self.total_size)
            .with_strategy(Strategy::parse_lenient(&self.strategy))
            .with_mode(mode);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

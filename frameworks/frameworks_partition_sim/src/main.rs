//! Partition Simulator Binary Entry Point
//!
//! Builds a partition table from the command-line arguments and feeds it
//! commands from stdin or a script file:
//! - Command-line argument parsing
//! - Logger installation
//! - Table initialization (single or fragmented layout)
//! - Console loop until end of input or `quit`

use std::fs::File;
use std::io::{self, BufReader};
use std::process;

mod args;

use args::SimArgs;
use clap::Parser;
use frameworks_partition_sim::{logging, Console};
use usecases_memory_management::PartitionTable;

fn main() {
    let args = SimArgs::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Warning: Failed to install logger: {}", e);
    }

    let config = args.table_config();
    log::info!(
        "address space {} KB, {:?}, {}",
        config.total_size,
        config.mode,
        config.strategy
    );

    let table = match PartitionTable::new(config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: Failed to initialize memory: {}", e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut console = Console::new(table, stdout.lock());

    let result = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => console.run(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error: Failed to open {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => console.run(io::stdin().lock()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

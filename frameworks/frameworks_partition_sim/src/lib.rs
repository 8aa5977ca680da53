//! Frameworks Layer: Partition Simulator Driver
//!
//! Provides the outer shell of the dynamic partition simulator: a line-command
//! console over the partition table, text rendering of snapshots, and the
//! stderr logger used by the `partsim` binary.
//!
//! ## Modules
//!
//! - **[`console`](console/index.html)**: Command parsing, execution and table rendering
//! - **[`logging`](logging/index.html)**: `log` backend for the binary
//!
//! ## See Also
//!
//! - [`usecases_memory_management`](../../usecases/usecases_memory_management/index.html): Partition table

pub mod console;
pub mod logging;

pub use console::{parse_line, render_table, render_usage, Command, CommandError, Console};

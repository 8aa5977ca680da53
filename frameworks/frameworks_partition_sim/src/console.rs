//! Line-Command Console
//!
//! Reads simulator commands one per line, applies them to a
//! [`PartitionTable`] and writes the results.
//!
//! ## Commands
//!
//! | command | effect |
//! |---------|--------|
//! | `show` | print the partition table |
//! | `alloc <process> <size>` | allocate `size` KB to `process` |
//! | `free <process>` | release every partition of `process` |
//! | `algo <1\|2\|3\|first\|best\|worst>` | switch strategy (unknown → first-fit) |
//! | `reset` | rebuild the initial layout |
//! | `stats` | print usage and fragmentation |
//! | `help` | list commands |
//! | `quit` / `exit` | stop reading input |
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use entities_memory_partition::PartitionView;
use thiserror::Error;
use usecases_memory_management::{MemoryUsage, PartitionTable, Strategy};

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Alloc { process: String, size: usize },
    Free { process: String },
    Algo(Strategy),
    Reset,
    Stats,
    Help,
    Quit,
}

/// Console input errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
    #[error("size must be a positive integer, got '{0}'")]
    InvalidSize(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let usage = |command: &'static str, expected: &'static str| CommandError::Usage {
            command,
            expected,
        };

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("show" | "list", []) => Ok(Command::Show),
            ("alloc" | "allocate", [process, size]) => Ok(Command::Alloc {
                process: (*process).to_string(),
                size: parse_size(size)?,
            }),
            ("alloc" | "allocate", _) => Err(usage("alloc", "<process> <size>")),
            ("free" | "release", [process]) => Ok(Command::Free {
                process: (*process).to_string(),
            }),
            ("free" | "release", _) => Err(usage("free", "<process>")),
            ("algo" | "strategy", [choice]) => Ok(Command::Algo(Strategy::parse_lenient(choice))),
            ("algo" | "strategy", _) => Err(usage("algo", "<1|2|3|first|best|worst>")),
            ("reset", []) => Ok(Command::Reset),
            ("stats", []) => Ok(Command::Stats),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            ("show" | "list" | "reset" | "stats" | "help" | "?" | "quit" | "exit", _) => {
                Err(usage("this command", "no arguments"))
            }
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

fn parse_size(word: &str) -> Result<usize, CommandError> {
    match word.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(CommandError::InvalidSize(word.to_string())),
    }
}

/// Parse one input line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

const RULE: &str = "+------+----------+----------+----------+--------------+";

/// Render a snapshot as a text table
pub fn render_table(views: &[PartitionView]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("| #    | start    | size(KB) | status   | process      |\n");
    out.push_str(RULE);
    out.push('\n');
    for view in views {
        out.push_str(&format!(
            "| {:<4} | {:<8} | {:<8} | {:<8} | {:<12} |\n",
            view.index + 1,
            view.start,
            view.size,
            view.status.label(),
            view.owner().unwrap_or("-"),
        ));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Render usage figures
pub fn render_usage(usage: &MemoryUsage, strategy: Strategy) -> String {
    format!(
        "strategy: {}\ntotal: {} KB, used: {} KB, reserved: {} KB, free: {} KB in {} partition(s)\n\
         largest free: {} KB, external fragmentation: {:.1}%\n",
        strategy,
        usage.total,
        usage.used,
        usage.reserved,
        usage.free,
        usage.free_partitions,
        usage.largest_free,
        usage.external_fragmentation() * 100.0,
    )
}

const HELP: &str = "\
commands:
  show                         print the partition table
  alloc <process> <size>       allocate <size> KB to <process>
  free <process>               release all memory of <process>
  algo <1|2|3|first|best|worst>  switch placement strategy
  reset                        rebuild the initial layout
  stats                        print usage figures
  help                         print this list
  quit                         leave the simulator
";

/// Applies commands to a table and writes the results to `out`
pub struct Console<W: Write> {
    table: PartitionTable,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(table: PartitionTable, out: W) -> Self {
        Self { table, out }
    }

    pub fn table(&self) -> &PartitionTable {
        &self.table
    }

    /// Consume the console, returning the table and the writer
    pub fn into_parts(self) -> (PartitionTable, W) {
        (self.table, self.out)
    }

    /// Execute one command; returns `false` once the console should stop
    pub fn execute(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Show => self.show()?,
            Command::Alloc { process, size } => {
                match self.table.try_allocate(&process, size) {
                    Ok(start) => writeln!(
                        self.out,
                        "allocation succeeded: {} KB at {} for {}",
                        size, start, process
                    )?,
                    Err(e) => writeln!(self.out, "allocation failed: {}", e)?,
                }
                self.show()?;
            }
            Command::Free { process } => {
                match self.table.try_release(&process) {
                    Ok(released) => writeln!(
                        self.out,
                        "released {} partition(s), {} KB from {}",
                        released.partitions, released.size, process
                    )?,
                    Err(e) => writeln!(self.out, "release failed: {}", e)?,
                }
                self.show()?;
            }
            Command::Algo(strategy) => {
                self.table.set_strategy(strategy);
                writeln!(self.out, "strategy: {}", strategy)?;
            }
            Command::Reset => {
                match self.table.reset() {
                    Ok(()) => writeln!(self.out, "memory reset")?,
                    Err(e) => writeln!(self.out, "reset failed: {}", e)?,
                }
                self.show()?;
            }
            Command::Stats => {
                let text = render_usage(&self.table.usage(), self.table.strategy());
                self.out.write_all(text.as_bytes())?;
            }
            Command::Help => self.out.write_all(HELP.as_bytes())?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Read and execute commands until end of input or `quit`.
    ///
    /// Malformed lines are reported and skipped.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    log::debug!("line {}: {:?}", number + 1, command);
                    if !self.execute(command)? {
                        break;
                    }
                }
                Err(e) => {
                    log::info!("line {}: {}", number + 1, e);
                    writeln!(self.out, "error: {}", e)?;
                }
            }
        }
        self.out.flush()
    }

    fn show(&mut self) -> io::Result<()> {
        let text = render_table(&self.table.snapshot());
        self.out.write_all(text.as_bytes())
    }
}

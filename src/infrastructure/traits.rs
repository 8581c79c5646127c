//! I/O boundary traits for testability
//!
//! The command handler only talks to the terminal and the debugger through
//! these traits, so both can be replaced by test doubles.

use std::io;

/// Line-oriented output sink.
pub trait OutputTerminal: Send + Sync {
    /// Write a line to regular output.
    fn write_line(&self, line: &str);

    /// Write a line to error output.
    fn write_error_line(&self, line: &str);
}

/// Debugger attachment probe and trigger.
pub trait Debugger: Send + Sync {
    /// Whether a debugger is currently attached to this process.
    fn is_attached(&self) -> bool;

    /// Ask the user to attach a debugger and wait for it.
    /// Blocks until a debugger is attached or the wait is given up.
    fn launch(&self, terminal: &dyn OutputTerminal) -> io::Result<()>;
}

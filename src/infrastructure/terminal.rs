//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

use crate::infrastructure::traits::OutputTerminal;

/// Terminal writing to stdout/stderr.
#[derive(Debug, Clone)]
pub struct StdTerminal {
    color: bool,
}

impl StdTerminal {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn styled_error(&self, line: &str) -> String {
        if !self.color {
            return line.to_string();
        }
        match line.strip_prefix("error:") {
            Some(rest) => format!("{}:{}", "error".red().bold(), rest),
            None => line.red().to_string(),
        }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OutputTerminal for StdTerminal {
    fn write_line(&self, line: &str) {
        // broken pipes are not worth a panic
        let _ = writeln!(io::stdout().lock(), "{}", line);
    }

    fn write_error_line(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.styled_error(line));
    }
}

//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::application::command::ExecutorError;
use crate::domain::DomainError;
use crate::exitcode;

/// Application errors wrap domain errors and add parsing and execution failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Parse(#[from] clap::Error),

    #[error("{0}")]
    Executor(ExecutorError),

    #[error("debugger launch failed: {0}")]
    Debugger(#[source] std::io::Error),

    #[error("no command registered for '{0}'")]
    NoCommand(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApplicationError::Parse(_) | ApplicationError::NoCommand(_) => exitcode::USAGE,
            ApplicationError::Domain(_) | ApplicationError::Executor(_) => exitcode::SOFTWARE,
            ApplicationError::Debugger(_) | ApplicationError::Runtime(_) => exitcode::OSERR,
            ApplicationError::Config { .. } => exitcode::CONFIG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;

    #[rstest]
    #[case(ApplicationError::NoCommand("remote".into()), exitcode::USAGE)]
    #[case(ApplicationError::Executor("boom".into()), exitcode::SOFTWARE)]
    #[case(
        ApplicationError::Domain(DomainError::DuplicateAlias("-c".into())),
        exitcode::SOFTWARE
    )]
    #[case(
        ApplicationError::Debugger(io::Error::new(io::ErrorKind::TimedOut, "late")),
        exitcode::OSERR
    )]
    #[case(ApplicationError::Config { message: "bad".into() }, exitcode::CONFIG)]
    fn given_error_when_mapping_then_sysexits_code(
        #[case] err: ApplicationError,
        #[case] expected: i32,
    ) {
        assert_eq!(err.exit_code(), expected);
    }

    #[test]
    fn given_executor_error_when_displayed_then_message_unchanged() {
        let err = ApplicationError::Executor("disk full".into());
        assert_eq!(err.to_string(), "disk full");
    }
}

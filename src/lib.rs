//! Command/parameter framework for command-line applications.
//!
//! Commands declare typed [`Param`]s, the framework registers them with clap,
//! binds the parsed values and runs the command's single executor. Every
//! command gets a `--debug`/`-d` flag (unless its own parameters already use
//! both aliases) that waits for a debugger to attach before executing.
//!
//! ```ignore
//! use cliverb::{CliApp, CliCommand, CliParam, CommandExecutor, Param};
//!
//! struct Count {
//!     count: Param<i32>,
//! }
//!
//! impl CliCommand for Count {
//!     fn params(&self) -> Vec<&dyn CliParam> {
//!         vec![&self.count]
//!     }
//!
//!     fn executor(&self) -> CommandExecutor<'_> {
//!         CommandExecutor::new(move || Ok(self.count.value()?))
//!     }
//! }
//!
//! let app = CliApp::with_command("count", Count {
//!     count: Param::new(["--count"]).with_default(0),
//! });
//! std::process::exit(app.run_from_env());
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod logging;
pub mod util;

pub use application::{
    ApplicationError, ApplicationResult, CliApp, CliCommand, CliParam, CliVerb, CommandExecutor,
    CommandHandler, ExecResult, ExecutorError, Param,
};
pub use config::AppSettings;
pub use domain::{DomainError, ValidationError};
pub use infrastructure::{Debugger, OutputTerminal, ServiceContainer};

//! Application layer: commands, parameters, handlers and the application host
//!
//! This layer binds the domain to clap and depends on the I/O boundary traits.

pub mod app;
pub mod command;
pub mod error;
pub mod handler;
pub mod param;
pub mod registry;
pub mod verb;

pub use app::CliApp;
pub use command::{CliCommand, CommandExecutor, ExecResult, ExecutorError};
pub use error::{ApplicationError, ApplicationResult};
pub use handler::CommandHandler;
pub use param::{join_flag_values, CliParam, Param, ParamValue};
pub use registry::{
    ParamRef, ParamRegistry, ParamRegistryBuilder, DEBUG_ALIASES, DEBUG_PARAM_HELP,
};
pub use verb::CliVerb;

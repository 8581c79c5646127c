//! Command handler: registers a command's parameters with clap, binds the
//! parsed values and runs the executor.

use std::io;
use std::sync::Arc;

use clap::ArgMatches;
use tracing::{debug, info, instrument};

use crate::application::command::CliCommand;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::param::Param;
use crate::application::registry::{ParamRegistry, ParamRegistryBuilder, HELP_ALIASES};
use crate::domain::DomainResult;
use crate::infrastructure::traits::{Debugger, OutputTerminal};

/// Per-invocation handler of one command.
pub struct CommandHandler<'a> {
    command: &'a dyn CliCommand,
    params: ParamRegistry<'a>,
    debug_param: Option<Arc<Param<bool>>>,
    terminal: Arc<dyn OutputTerminal>,
    debugger: Arc<dyn Debugger>,
}

impl<'a> CommandHandler<'a> {
    /// Handler for a command; only clap's help aliases are reserved.
    pub fn new(
        command: &'a dyn CliCommand,
        enable_debug_param: bool,
        terminal: Arc<dyn OutputTerminal>,
        debugger: Arc<dyn Debugger>,
    ) -> DomainResult<Self> {
        Self::with_reserved_aliases(command, enable_debug_param, terminal, debugger, &HELP_ALIASES)
    }

    pub fn with_reserved_aliases(
        command: &'a dyn CliCommand,
        enable_debug_param: bool,
        terminal: Arc<dyn OutputTerminal>,
        debugger: Arc<dyn Debugger>,
        reserved: &[&str],
    ) -> DomainResult<Self> {
        let mut builder = ParamRegistryBuilder::new().with_reserved(reserved.iter().copied());
        for param in command.params() {
            builder.add(param)?;
        }

        let debug_param = if enable_debug_param {
            builder.add_debug_param()?
        } else {
            None
        };

        Ok(Self {
            command,
            params: builder.build(),
            debug_param,
            terminal,
            debugger,
        })
    }

    /// All parameters, the debug parameter last.
    pub fn params(&self) -> &ParamRegistry<'a> {
        &self.params
    }

    pub fn debug_param(&self) -> Option<&Param<bool>> {
        self.debug_param.as_deref()
    }

    /// Aliases of this command's boolean flags, see
    /// [`join_flag_values`](crate::application::join_flag_values).
    pub fn flag_aliases(&self) -> Vec<&str> {
        self.params.flag_aliases()
    }

    /// Register the command's help text and parameters with a clap command.
    pub fn configure(&self, mut cmd: clap::Command) -> DomainResult<clap::Command> {
        if cmd.get_about().is_none() {
            if let Some(help) = self.command.help_text() {
                cmd = cmd.about(help.to_string());
            }
        }
        for param in self.params.iter() {
            cmd = cmd.arg(param.to_arg()?);
        }
        Ok(cmd)
    }

    /// Bind all parameters from `matches`, wait for a debugger if requested,
    /// then run the executor once and return its exit code.
    #[instrument(level = "debug", skip_all, fields(params = self.params.len()))]
    pub async fn invoke(&self, matches: &ArgMatches) -> ApplicationResult<i32> {
        for param in self.params.iter() {
            param.bind(matches)?;
        }
        debug!("all parameters bound");

        if let Some(debug_param) = &self.debug_param {
            if debug_param.value()? && !self.debugger.is_attached() {
                info!("debug parameter set, launching debugger");
                self.wait_for_debugger()
                    .await
                    .map_err(ApplicationError::Debugger)?;
            }
        }

        let code = self
            .command
            .executor()
            .execute()
            .await
            .map_err(ApplicationError::Executor)?;
        debug!(exit_code = code, "command finished");
        Ok(code)
    }

    /// The debugger wait blocks; it runs on tokio's blocking pool.
    async fn wait_for_debugger(&self) -> io::Result<()> {
        let debugger = self.debugger.clone();
        let terminal = self.terminal.clone();
        tokio::task::spawn_blocking(move || debugger.launch(terminal.as_ref()))
            .await
            .map_err(io::Error::other)?
    }
}

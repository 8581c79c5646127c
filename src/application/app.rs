//! Application host: builds the clap command tree, parses the process
//! arguments, routes to the selected command and turns the outcome into an
//! exit code.

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::Write;
use std::iter;

use clap_complete::{generate, Shell};
use itertools::Itertools;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::application::command::CliCommand;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::handler::CommandHandler;
use crate::application::param::join_flag_values;
use crate::application::registry::{HELP_ALIASES, VERSION_ALIASES};
use crate::application::verb::CliVerb;
use crate::config::AppSettings;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

enum AppRoot {
    Command(Box<dyn CliCommand>),
    Verbs(Vec<CliVerb>),
}

/// A command-line application: either a single command taking parameters
/// directly, or a tree of verbs.
pub struct CliApp {
    name: String,
    about: Option<String>,
    version: Option<String>,
    root: AppRoot,
    services: ServiceContainer,
    /// Parameter values live on the commands, so invocations run one at a time.
    invocation: Mutex<()>,
}

/// A handler together with the verb path that selects it.
struct Route<'a> {
    path: Vec<String>,
    handler: CommandHandler<'a>,
}

impl CliApp {
    /// Application whose parameters belong to a single command.
    pub fn with_command(name: impl Into<String>, command: impl CliCommand + 'static) -> Self {
        Self::with_root(name.into(), AppRoot::Command(Box::new(command)))
    }

    /// Application dispatching to verbs; a verb is required.
    pub fn with_verbs(name: impl Into<String>, verbs: Vec<CliVerb>) -> Self {
        Self::with_root(name.into(), AppRoot::Verbs(verbs))
    }

    fn with_root(name: String, root: AppRoot) -> Self {
        Self {
            name,
            about: None,
            version: None,
            root,
            services: ServiceContainer::default(),
            invocation: Mutex::new(()),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Enables `--version`/`-V` on the top-level command.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Replace the default services (real terminal and debugger).
    pub fn services(mut self, services: ServiceContainer) -> Self {
        self.services = services;
        self
    }

    /// Use `settings` with the real terminal and debugger.
    pub fn settings(self, settings: AppSettings) -> Self {
        self.services(ServiceContainer::new(settings))
    }

    /// Load settings from the user's config file and environment.
    pub fn with_loaded_settings(self) -> ApplicationResult<Self> {
        let settings = AppSettings::load(&self.name)?;
        Ok(self.settings(settings))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The complete clap command, including all verbs and parameters.
    pub fn command(&self) -> ApplicationResult<clap::Command> {
        self.build().map(|(cmd, _)| cmd)
    }

    /// Run with `args` (without the program name) on a fresh current-thread
    /// runtime. Returns the process exit code.
    pub fn run<I, T>(&self, args: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.run_async(args)),
            Err(e) => self.report(ApplicationError::Runtime(e)),
        }
    }

    /// Run with the arguments of the current process.
    pub fn run_from_env(&self) -> i32 {
        self.run(std::env::args_os().skip(1))
    }

    /// Like [`run`](Self::run) on an existing runtime.
    pub async fn run_async<I, T>(&self, args: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.try_run_async(args).await {
            Ok(code) => code,
            Err(err) => self.report(err),
        }
    }

    /// Run and hand back unhandled errors instead of reporting them.
    ///
    /// Help and version requests are written to the terminal and yield
    /// [`exitcode::OK`]. Concurrent calls on the same application wait for
    /// each other, from parsing until the executor has finished.
    pub async fn try_run_async<I, T>(&self, args: I) -> ApplicationResult<i32>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let _invocation = self.invocation.lock().await;
        let (cmd, routes) = self.build()?;

        let flag_aliases: HashSet<&str> = routes
            .iter()
            .flat_map(|route| route.handler.flag_aliases())
            .collect();
        let argv = iter::once(OsString::from(&self.name))
            .chain(join_flag_values(args, &flag_aliases));
        let matches = match cmd.try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) if !err.use_stderr() => {
                self.services
                    .terminal
                    .write_line(err.render().to_string().trim_end());
                return Ok(exitcode::OK);
            }
            Err(err) => return Err(ApplicationError::Parse(err)),
        };

        let mut path = Vec::new();
        let mut selected = &matches;
        while let Some((name, sub_matches)) = selected.subcommand() {
            path.push(name.to_string());
            selected = sub_matches;
        }
        debug!(verb = %path.iter().join(" "), "selected command");

        let route = routes
            .iter()
            .find(|route| route.path == path)
            .ok_or_else(|| ApplicationError::NoCommand(path.iter().join(" ")))?;
        route.handler.invoke(selected).await
    }

    /// Write a completion script for `shell`.
    pub fn write_completions(&self, shell: Shell, out: &mut dyn Write) -> ApplicationResult<()> {
        let mut cmd = self.command()?;
        generate(shell, &mut cmd, self.name.clone(), out);
        Ok(())
    }

    /// Print an unhandled error and map it to its exit code.
    fn report(&self, err: ApplicationError) -> i32 {
        let code = err.exit_code();
        match &err {
            ApplicationError::Parse(parse) => {
                debug!(kind = ?parse.kind(), "argument parsing failed");
                self.services
                    .terminal
                    .write_error_line(parse.render().to_string().trim_end());
            }
            other => {
                error!(exit_code = code, "{}", other);
                self.services
                    .terminal
                    .write_error_line(&format!("error: {}", other));
            }
        }
        code
    }

    fn build(&self) -> ApplicationResult<(clap::Command, Vec<Route<'_>>)> {
        let mut root = clap::Command::new(self.name.clone());
        if let Some(about) = &self.about {
            root = root.about(about.clone());
        }
        if let Some(version) = &self.version {
            root = root.version(version.clone());
        }

        let mut routes = Vec::new();
        match &self.root {
            AppRoot::Command(command) => {
                let mut reserved = HELP_ALIASES.to_vec();
                if self.version.is_some() {
                    reserved.extend(VERSION_ALIASES);
                }
                let handler = self.handler(command.as_ref(), &reserved)?;
                root = handler.configure(root)?;
                routes.push(Route {
                    path: Vec::new(),
                    handler,
                });
            }
            AppRoot::Verbs(verbs) => {
                root = root.subcommand_required(true).arg_required_else_help(true);
                for verb in verbs {
                    root = root.subcommand(self.build_verb(verb, &[], &mut routes)?);
                }
            }
        }
        Ok((root, routes))
    }

    fn build_verb<'a>(
        &'a self,
        verb: &'a CliVerb,
        parent: &[String],
        routes: &mut Vec<Route<'a>>,
    ) -> ApplicationResult<clap::Command> {
        verb.validate()?;
        let mut path = parent.to_vec();
        path.push(verb.name().to_string());

        let mut cmd = clap::Command::new(verb.name().to_string())
            .visible_aliases(verb.aliases().iter().cloned());
        if let Some(help) = verb.help_text() {
            cmd = cmd.about(help.to_string());
        }

        match verb.command() {
            Some(command) => {
                let handler = self.handler(command, &HELP_ALIASES)?;
                cmd = handler.configure(cmd)?;
                if !verb.sub_verbs().is_empty() {
                    // selecting a sub-verb must not demand this verb's parameters
                    cmd = cmd.subcommand_negates_reqs(true);
                }
                routes.push(Route {
                    path: path.clone(),
                    handler,
                });
            }
            None => {
                cmd = cmd.subcommand_required(true).arg_required_else_help(true);
            }
        }

        for sub_verb in verb.sub_verbs() {
            cmd = cmd.subcommand(self.build_verb(sub_verb, &path, routes)?);
        }
        Ok(cmd)
    }

    fn handler<'a>(
        &self,
        command: &'a dyn CliCommand,
        reserved: &[&str],
    ) -> ApplicationResult<CommandHandler<'a>> {
        Ok(CommandHandler::with_reserved_aliases(
            command,
            self.services.settings.debug_param,
            self.services.terminal.clone(),
            self.services.debugger.clone(),
            reserved,
        )?)
    }
}

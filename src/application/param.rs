//! Typed command-line parameters and their binding to clap.

use std::collections::HashSet;
use std::ffi::OsString;
use std::sync::{PoisonError, RwLock};

use clap::builder::{ValueParser, ValueParserFactory};
use clap::{Arg, ArgAction, ArgMatches};
use itertools::Itertools;
use tracing::trace;

use crate::domain::{Alias, DomainError, DomainResult};

/// Types a parameter can hold: anything clap has a value parser for.
pub trait ParamValue: Clone + Send + Sync + 'static {
    fn value_parser() -> ValueParser;
}

impl<T> ParamValue for T
where
    T: ValueParserFactory + Clone + Send + Sync + 'static,
    T::Parser: Into<ValueParser>,
{
    fn value_parser() -> ValueParser {
        <T as ValueParserFactory>::value_parser().into()
    }
}

/// Type-erased view of a parameter, as seen by the registry and the handler.
pub trait CliParam: Send + Sync {
    /// All aliases, in declaration order.
    fn aliases(&self) -> &[String];

    fn help_text(&self) -> Option<&str>;

    /// A parameter without a default value must be supplied on the command line.
    fn is_required(&self) -> bool;

    /// Build the clap argument for this parameter.
    fn to_arg(&self) -> DomainResult<Arg>;

    /// Copy the parsed value (or the default) into the value slot.
    fn bind(&self, matches: &ArgMatches) -> DomainResult<()>;

    fn is_bound(&self) -> bool;

    /// Boolean flag: a bare alias means `true`.
    fn is_flag(&self) -> bool {
        false
    }

    /// Identifier used for the clap argument: the first alias.
    fn id(&self) -> &str {
        self.aliases().first().map(String::as_str).unwrap_or_default()
    }

    /// Aliases joined for display, e.g. `--count, -c`.
    fn display_aliases(&self) -> String {
        self.aliases().iter().join(", ")
    }
}

/// A named, typed parameter with a value slot that is filled before the
/// command's executor runs.
///
/// ```ignore
/// let count = Param::<u32>::new(["--count", "-c"])
///     .with_help("How often")
///     .with_default(1);
/// ```
#[derive(Debug)]
pub struct Param<T> {
    aliases: Vec<String>,
    help_text: Option<String>,
    default: Option<T>,
    /// Value used when the alias is given without a value (flags only).
    missing_value: Option<&'static str>,
    value: RwLock<Option<T>>,
}

impl<T: ParamValue> Param<T> {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            help_text: None,
            default: None,
            missing_value: None,
            value: RwLock::new(None),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    /// Make the parameter optional; `default` is bound when it is absent.
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// The bound value.
    ///
    /// Fails with [`DomainError::ParamNotBound`] when read before the
    /// handler has bound the parsed arguments.
    pub fn value(&self) -> DomainResult<T> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| DomainError::ParamNotBound(self.id().to_string()))
    }

    fn store(&self, value: T) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }
}

impl Param<bool> {
    /// Boolean flag: `false` unless given. A bare alias means `true`, an
    /// explicit value is accepted as `--flag=false` or, after
    /// [`join_flag_values`], as `--flag false`.
    pub fn flag<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut param = Self::new(aliases).with_default(false);
        param.missing_value = Some("true");
        param
    }
}

impl<T: ParamValue> CliParam for Param<T> {
    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    fn is_required(&self) -> bool {
        self.default.is_none()
    }

    fn to_arg(&self) -> DomainResult<Arg> {
        let aliases = self
            .aliases
            .iter()
            .map(|raw| Alias::parse(raw))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut arg = Arg::new(self.id().to_string())
            .value_parser(T::value_parser())
            .action(ArgAction::Set)
            .required(self.is_required());

        let mut has_long = false;
        let mut has_short = false;
        for alias in aliases {
            arg = match alias {
                Alias::Long(name) if !has_long => {
                    has_long = true;
                    arg.long(name)
                }
                Alias::Long(name) => arg.visible_alias(name),
                Alias::Short(c) if !has_short => {
                    has_short = true;
                    arg.short(c)
                }
                Alias::Short(c) => arg.visible_short_alias(c),
            };
        }

        if let Some(help) = &self.help_text {
            arg = arg.help(help.clone());
        }
        match self.missing_value {
            Some(missing) => {
                // never consume the following word, it may be a verb
                arg = arg
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value(missing)
                    .value_name("BOOL");
            }
            None => {
                let value_name = self
                    .aliases
                    .first()
                    .map(|a| a.trim_start_matches('-').to_uppercase())
                    .unwrap_or_else(|| "VALUE".to_string());
                arg = arg.value_name(value_name);
            }
        }
        Ok(arg)
    }

    fn bind(&self, matches: &ArgMatches) -> DomainResult<()> {
        let parsed = matches
            .try_get_one::<T>(self.id())
            .map_err(|e| DomainError::Binding {
                alias: self.id().to_string(),
                message: e.to_string(),
            })?;

        let value = match (parsed, &self.default) {
            (Some(value), _) => value.clone(),
            (None, Some(default)) => default.clone(),
            (None, None) => {
                return Err(DomainError::Binding {
                    alias: self.id().to_string(),
                    message: "no value supplied and no default declared".to_string(),
                });
            }
        };
        trace!(param = self.id(), from_args = parsed.is_some(), "bound parameter");
        self.store(value);
        Ok(())
    }

    fn is_flag(&self) -> bool {
        self.missing_value.is_some()
    }

    fn is_bound(&self) -> bool {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Join explicit flag values given as a separate word (`-d true`) into the
/// `-d=true` form the flag arguments require.
///
/// Only `true` and `false` are joined, and nothing after `--`.
pub fn join_flag_values<I, T>(args: I, flag_aliases: &HashSet<&str>) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut joined: Vec<OsString> = Vec::new();
    let mut after_flag = false;
    let mut escaped = false;
    for arg in args {
        let arg: OsString = arg.into();
        if escaped {
            joined.push(arg);
            continue;
        }
        if after_flag {
            after_flag = false;
            if let Some(value) = arg.to_str().filter(|v| *v == "true" || *v == "false") {
                if let Some(flag) = joined.last_mut() {
                    flag.push("=");
                    flag.push(value);
                    continue;
                }
            }
        }
        match arg.to_str() {
            Some("--") => escaped = true,
            Some(word) => after_flag = flag_aliases.contains(word),
            None => {}
        }
        joined.push(arg);
    }
    joined
}

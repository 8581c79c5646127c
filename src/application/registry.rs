//! Parameter registry: collects a command's parameters, guards against alias
//! collisions and adds the optional debug parameter.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use crate::application::param::{CliParam, Param};
use crate::domain::{validate, Alias, DomainError, DomainResult, Origin};

/// Aliases of the debug parameter, in preference order.
pub const DEBUG_ALIASES: [&str; 2] = ["--debug", "-d"];

pub const DEBUG_PARAM_HELP: &str = "Launches a debugger when the application starts.";

/// Aliases clap always claims for itself.
pub const HELP_ALIASES: [&str; 2] = ["--help", "-h"];

/// Aliases clap claims when the application has a version.
pub const VERSION_ALIASES: [&str; 2] = ["--version", "-V"];

/// A registered parameter: either borrowed from its command or owned by the
/// registry (the debug parameter).
#[derive(Clone)]
pub enum ParamRef<'a> {
    Borrowed(&'a dyn CliParam),
    Shared(Arc<dyn CliParam>),
}

impl<'a> Deref for ParamRef<'a> {
    type Target = dyn CliParam + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            ParamRef::Borrowed(param) => *param,
            ParamRef::Shared(param) => param.as_ref(),
        }
    }
}

/// Accepts parameters one at a time and tracks every alias seen so far.
#[derive(Default)]
pub struct ParamRegistryBuilder<'a> {
    params: Vec<ParamRef<'a>>,
    registered: HashSet<String>,
    reserved: HashSet<String>,
}

impl<'a> ParamRegistryBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aliases that no parameter may use (e.g. clap's `--help`).
    pub fn with_reserved<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn add(&mut self, param: &'a dyn CliParam) -> DomainResult<()> {
        self.register(ParamRef::Borrowed(param))
    }

    pub fn add_shared(&mut self, param: Arc<dyn CliParam>) -> DomainResult<()> {
        self.register(ParamRef::Shared(param))
    }

    fn register(&mut self, param: ParamRef<'a>) -> DomainResult<()> {
        validate::not_empty(param.aliases(), "aliases", Origin::Argument)?;

        let mut own = HashSet::new();
        for raw in param.aliases() {
            Alias::parse(raw)?;
            if self.reserved.contains(raw) {
                return Err(DomainError::ReservedAlias(raw.clone()));
            }
            if self.registered.contains(raw) || !own.insert(raw.clone()) {
                return Err(DomainError::DuplicateAlias(raw.clone()));
            }
        }

        debug!(aliases = %param.display_aliases(), "registered parameter");
        self.registered.extend(own);
        self.params.push(param);
        Ok(())
    }

    /// Aliases claimed by parameters added so far (reserved ones excluded).
    pub fn registered_aliases(&self) -> &HashSet<String> {
        &self.registered
    }

    pub fn is_taken(&self, alias: &str) -> bool {
        self.registered.contains(alias) || self.reserved.contains(alias)
    }

    /// Debug aliases not yet taken by another parameter.
    pub fn debug_aliases(&self) -> Vec<&'static str> {
        DEBUG_ALIASES
            .into_iter()
            .filter(|alias| !self.is_taken(alias))
            .collect()
    }

    /// Add the debug flag using whatever debug aliases are still free.
    ///
    /// Returns `None` without error when both aliases are already taken.
    pub fn add_debug_param(&mut self) -> DomainResult<Option<Arc<Param<bool>>>> {
        let available = self.debug_aliases();
        if available.is_empty() {
            debug!("debug aliases taken by command parameters, no debug parameter added");
            return Ok(None);
        }

        let param = Arc::new(Param::flag(available).with_help(DEBUG_PARAM_HELP));
        self.add_shared(param.clone())?;
        Ok(Some(param))
    }

    pub fn build(self) -> ParamRegistry<'a> {
        ParamRegistry {
            params: self.params,
        }
    }
}

/// Immutable, ordered list of all parameters of a command.
pub struct ParamRegistry<'a> {
    params: Vec<ParamRef<'a>>,
}

impl<'a> ParamRegistry<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &(dyn CliParam + 'a)> + '_ {
        self.params.iter().map(|param| param.deref())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// All aliases of all parameters, in registration order.
    pub fn aliases(&self) -> Vec<&str> {
        self.iter()
            .flat_map(|param| param.aliases().iter().map(String::as_str))
            .collect()
    }

    /// Aliases of all boolean flags, the debug parameter included.
    pub fn flag_aliases(&self) -> Vec<&str> {
        self.iter()
            .filter(|param| param.is_flag())
            .flat_map(|param| param.aliases().iter().map(String::as_str))
            .collect()
    }
}

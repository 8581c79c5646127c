//! Verbs: named, nestable sub-commands like `app remote add --name x`.

use crate::application::command::CliCommand;
use crate::domain::{validate, DomainResult, Origin};

pub struct CliVerb {
    name: String,
    aliases: Vec<String>,
    help_text: Option<String>,
    command: Option<Box<dyn CliCommand>>,
    sub_verbs: Vec<CliVerb>,
}

impl CliVerb {
    /// Verb that runs `command`.
    pub fn new(name: impl Into<String>, command: impl CliCommand + 'static) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            help_text: None,
            command: Some(Box::new(command)),
            sub_verbs: Vec::new(),
        }
    }

    /// Verb without a command of its own; one of `sub_verbs` must be given.
    pub fn group(name: impl Into<String>, sub_verbs: Vec<CliVerb>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            help_text: None,
            command: None,
            sub_verbs,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Overrides the command's help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    pub fn with_sub_verb(mut self, verb: CliVerb) -> Self {
        self.sub_verbs.push(verb);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The verb's own help text, falling back to its command's.
    pub fn help_text(&self) -> Option<&str> {
        self.help_text
            .as_deref()
            .or_else(|| self.command.as_ref().and_then(|c| c.help_text()))
    }

    pub fn command(&self) -> Option<&dyn CliCommand> {
        self.command.as_deref()
    }

    pub fn sub_verbs(&self) -> &[CliVerb] {
        &self.sub_verbs
    }

    /// Check name and aliases of this verb (not its sub-verbs).
    pub fn validate(&self) -> DomainResult<()> {
        validate::not_blank(&self.name, "name", Origin::Argument)?;
        for alias in &self.aliases {
            validate::not_blank(alias, "alias", Origin::Argument)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::command::CommandExecutor;
    use crate::domain::DomainError;

    struct Noop;

    impl CliCommand for Noop {
        fn help_text(&self) -> Option<&str> {
            Some("does nothing")
        }

        fn executor(&self) -> CommandExecutor<'_> {
            CommandExecutor::new(|| Ok(0))
        }
    }

    #[test]
    fn given_verb_without_help_when_asked_then_command_help_used() {
        let verb = CliVerb::new("noop", Noop);
        assert_eq!(verb.help_text(), Some("does nothing"));
    }

    #[test]
    fn given_verb_with_help_when_asked_then_override_wins() {
        let verb = CliVerb::new("noop", Noop).with_help("custom");
        assert_eq!(verb.help_text(), Some("custom"));
    }

    #[test]
    fn given_group_when_built_then_has_no_command() {
        let group = CliVerb::group("remote", vec![CliVerb::new("add", Noop)]).with_alias("r");

        assert!(group.command().is_none());
        assert_eq!(group.sub_verbs().len(), 1);
        assert_eq!(group.aliases(), ["r"]);
        assert_eq!(group.help_text(), None);
    }

    #[test]
    fn given_blank_name_when_validating_then_error() {
        let verb = CliVerb::new(" ", Noop);
        assert!(matches!(verb.validate(), Err(DomainError::Validation(_))));
    }
}

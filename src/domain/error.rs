//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

/// Where an invalid value came from.
///
/// Arguments are inputs handed to a function by its caller; values are
/// everything else (state, computed results, configuration entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Argument,
    Value,
}

/// What exactly is wrong with a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    EmptyString,
    WhiteSpaceString,
    EmptyCollection,
    ReadOnlyCollection,
    Invalid(String),
}

impl ViolationKind {
    pub fn message(&self) -> &str {
        match self {
            ViolationKind::Missing => "The value must not be null.",
            ViolationKind::EmptyString => "The string must not be empty.",
            ViolationKind::WhiteSpaceString => {
                "The string must not contain just white space characters."
            }
            ViolationKind::EmptyCollection => "The collection must not be empty.",
            ViolationKind::ReadOnlyCollection => "The collection is read-only.",
            ViolationKind::Invalid(message) => message,
        }
    }
}

/// A failed precondition on an argument or a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub origin: Origin,
    pub kind: ViolationKind,
    pub name: Option<String>,
}

impl ValidationError {
    pub fn argument(kind: ViolationKind, name: impl Into<String>) -> Self {
        Self {
            origin: Origin::Argument,
            kind,
            name: Some(name.into()),
        }
    }

    pub fn value(kind: ViolationKind, name: impl Into<String>) -> Self {
        Self {
            origin: Origin::Value,
            kind,
            name: Some(name.into()),
        }
    }

    /// Error without a name; the message carries no name suffix.
    pub fn unnamed(origin: Origin, kind: ViolationKind) -> Self {
        Self {
            origin,
            kind,
            name: None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.message())?;
        match (&self.name, self.origin) {
            (Some(name), Origin::Argument) if !name.is_empty() => {
                write!(f, " (Parameter '{}')", name)
            }
            (Some(name), Origin::Value) if !name.is_empty() => {
                write!(f, " (Value name: '{}')", name)
            }
            _ => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Domain errors represent violations in command and parameter definitions.
/// These are independent of the parser and the terminal.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("invalid alias '{alias}': {reason}")]
    InvalidAlias { alias: String, reason: String },

    #[error("alias '{0}' is already registered")]
    DuplicateAlias(String),

    #[error("alias '{0}' is reserved")]
    ReservedAlias(String),

    #[error("parameter '{0}' has not been bound yet")]
    ParamNotBound(String),

    #[error("cannot read value of parameter '{alias}': {message}")]
    Binding { alias: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_named_argument_error_when_displayed_then_appends_parameter_name() {
        let err = ValidationError::argument(ViolationKind::EmptyString, "alias");
        assert_eq!(
            err.to_string(),
            "The string must not be empty. (Parameter 'alias')"
        );
    }

    #[test]
    fn given_named_value_error_when_displayed_then_appends_value_name() {
        let err = ValidationError::value(ViolationKind::ReadOnlyCollection, "params");
        assert_eq!(
            err.to_string(),
            "The collection is read-only. (Value name: 'params')"
        );
    }

    #[test]
    fn given_unnamed_error_when_displayed_then_only_message() {
        let err = ValidationError::unnamed(
            Origin::Value,
            ViolationKind::Invalid("The value is invalid.".into()),
        );
        assert_eq!(err.to_string(), "The value is invalid.");
    }
}

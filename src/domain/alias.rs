//! Parameter aliases: the `--long` and `-s` forms a parameter is known by.

use std::fmt;

use crate::domain::error::{DomainError, DomainResult, Origin};
use crate::domain::validate;

/// A single validated alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alias {
    /// `--name`
    Long(String),
    /// `-n`
    Short(char),
}

impl Alias {
    /// Parse an alias string like `--count` or `-c`.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        validate::not_blank(raw, "alias", Origin::Argument)?;

        if let Some(name) = raw.strip_prefix("--") {
            if name.is_empty() {
                return Err(invalid(raw, "long alias needs a name after '--'"));
            }
            if name.starts_with('-') {
                return Err(invalid(raw, "too many leading dashes"));
            }
            if name.chars().any(|c| c.is_whitespace() || c == '=') {
                return Err(invalid(raw, "must not contain white space or '='"));
            }
            return Ok(Alias::Long(name.to_string()));
        }

        if let Some(rest) = raw.strip_prefix('-') {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c != '-' && !c.is_whitespace() => Ok(Alias::Short(c)),
                _ => Err(invalid(raw, "short alias must be a single character after '-'")),
            };
        }

        Err(invalid(raw, "must start with '-' or '--'"))
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Alias::Long(_))
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alias::Long(name) => write!(f, "--{}", name),
            Alias::Short(c) => write!(f, "-{}", c),
        }
    }
}

fn invalid(raw: &str, reason: &str) -> DomainError {
    DomainError::InvalidAlias {
        alias: raw.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--count", Alias::Long("count".into()))]
    #[case("--dry-run", Alias::Long("dry-run".into()))]
    #[case("-c", Alias::Short('c'))]
    #[case("-D", Alias::Short('D'))]
    fn given_well_formed_alias_when_parsing_then_returns_form(
        #[case] raw: &str,
        #[case] expected: Alias,
    ) {
        let alias = Alias::parse(raw).unwrap();
        assert_eq!(alias, expected);
        assert_eq!(alias.to_string(), raw);
    }

    #[rstest]
    #[case("count")]
    #[case("--")]
    #[case("---x")]
    #[case("-")]
    #[case("-ab")]
    #[case("--a b")]
    #[case("--a=b")]
    #[case("- ")]
    fn given_malformed_alias_when_parsing_then_invalid_alias(#[case] raw: &str) {
        let err = Alias::parse(raw).unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidAlias { ref alias, .. } if alias == raw),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn given_blank_alias_when_parsing_then_validation_error() {
        let err = Alias::parse("  ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}

//! Precondition checks used by the command and parameter definitions.

use crate::domain::error::{Origin, ValidationError, ViolationKind};

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str, name: &str, origin: Origin) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(violation(origin, ViolationKind::EmptyString, name));
    }
    if value.trim().is_empty() {
        return Err(violation(origin, ViolationKind::WhiteSpaceString, name));
    }
    Ok(())
}

/// Rejects empty collections.
pub fn not_empty<T>(items: &[T], name: &str, origin: Origin) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(violation(origin, ViolationKind::EmptyCollection, name));
    }
    Ok(())
}

fn violation(origin: Origin, kind: ViolationKind, name: &str) -> ValidationError {
    match origin {
        Origin::Argument => ValidationError::argument(kind, name),
        Origin::Value => ValidationError::value(kind, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ViolationKind::EmptyString)]
    #[case("   ", ViolationKind::WhiteSpaceString)]
    #[case("\t\n", ViolationKind::WhiteSpaceString)]
    fn given_blank_string_when_checking_then_reports_kind(
        #[case] input: &str,
        #[case] expected: ViolationKind,
    ) {
        let err = not_blank(input, "name", Origin::Argument).unwrap_err();
        assert_eq!(err.kind, expected);
        assert_eq!(err.origin, Origin::Argument);
        assert_eq!(err.name.as_deref(), Some("name"));
    }

    #[test]
    fn given_text_when_checking_then_ok() {
        assert!(not_blank(" --x ", "alias", Origin::Value).is_ok());
    }

    #[test]
    fn given_empty_slice_when_checking_then_empty_collection() {
        let items: [&str; 0] = [];
        let err = not_empty(&items, "aliases", Origin::Value).unwrap_err();
        assert_eq!(err.kind, ViolationKind::EmptyCollection);
        assert_eq!(err.origin, Origin::Value);
    }
}

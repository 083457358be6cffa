//! Term module - encoding request values as logic atoms
//!
//! Two encoders live here. [`as_term`] is the one used when building goals:
//! it maps a missing or empty value to the anonymous variable so that the
//! position unifies with anything. [`quote`] wraps a literal in single quotes
//! for callers that need a quoted atom.

use thiserror::Error;

/// The anonymous variable; matches any value under unification
pub const WILDCARD: &str = "_";

/// Errors raised by lexical term validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    /// Term text is empty
    #[error("Empty term")]
    Empty,

    /// Term text is not an atom, number, variable or quoted atom
    #[error("Invalid term '{0}': expected an atom, number, variable or quoted atom")]
    Invalid(String),

    /// Predicate name is not an atom
    #[error("Invalid predicate name '{0}'")]
    InvalidPredicate(String),
}

/// Encode an optional value as a term
///
/// `None` and the empty string both become [`WILDCARD`]; anything else is
/// returned unchanged. Never fails and never returns an empty string.
///
/// # Examples
///
/// ```
/// use augur_domain::term::as_term;
///
/// assert_eq!(as_term(None), "_");
/// assert_eq!(as_term(Some("")), "_");
/// assert_eq!(as_term(Some("xyz")), "xyz");
/// ```
pub fn as_term(value: Option<&str>) -> &str {
    match value {
        None | Some("") => WILDCARD,
        Some(value) => value,
    }
}

/// Surround a value with single quotes
///
/// `None` propagates. Embedded quotes are NOT escaped; whitespace (tabs,
/// carriage returns, newlines) is kept verbatim.
///
/// # Examples
///
/// ```
/// use augur_domain::term::quote;
///
/// assert_eq!(quote(Some("test")).as_deref(), Some("'test'"));
/// assert_eq!(quote(None), None);
/// ```
pub fn quote(value: Option<&str>) -> Option<String> {
    value.map(|v| format!("'{}'", v))
}

/// Check that `text` can stand as a single goal argument
///
/// Accepted shapes: a variable or wildcard (`_`, `User`, `_x`), a plain atom
/// (`alice`, `isUser`), a number (`42`, `-1.5`), or a quoted atom whose
/// content has no quote and no line break (`'hello world'`).
pub fn validate_term(text: &str) -> Result<(), TermError> {
    if text.is_empty() {
        return Err(TermError::Empty);
    }

    if is_identifier(text) || is_number(text) || is_quoted_atom(text) {
        Ok(())
    } else {
        Err(TermError::Invalid(text.to_string()))
    }
}

/// Check that `name` is usable as a predicate (functor) name
pub fn validate_predicate(name: &str) -> Result<(), TermError> {
    if is_atom_name(name) || is_quoted_atom(name) {
        Ok(())
    } else {
        Err(TermError::InvalidPredicate(name.to_string()))
    }
}

/// True when `name` is a plain atom: identifier not starting like a variable
pub fn is_atom_name(name: &str) -> bool {
    match name.chars().next() {
        Some(first) => first.is_alphabetic() && !first.is_uppercase() && is_identifier(name),
        None => false,
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

fn is_quoted_atom(text: &str) -> bool {
    text.len() >= 2
        && text.starts_with('\'')
        && text.ends_with('\'')
        && !text[1..text.len() - 1].contains(['\'', '\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_term_null_is_wildcard() {
        assert_eq!(as_term(None), "_");
    }

    #[test]
    fn test_as_term_empty_is_wildcard() {
        assert_eq!(as_term(Some("")), "_");
    }

    #[test]
    fn test_as_term_returns_value() {
        assert_eq!(as_term(Some("xyz")), "xyz");
    }

    #[test]
    fn test_quote_propagates_null() {
        assert!(quote(None).is_none());
    }

    #[test]
    fn test_quote_keeps_whitespace() {
        assert_eq!(quote(Some(" \t\r\n")).as_deref(), Some("' \t\r\n'"));
    }

    #[test]
    fn test_quote_surrounds_with_single_quotes() {
        assert_eq!(quote(Some("test")).as_deref(), Some("'test'"));
    }

    #[test]
    fn test_quote_does_not_escape() {
        assert_eq!(quote(Some("it's")).as_deref(), Some("'it's'"));
    }

    #[test]
    fn test_validate_term_accepts_simple_terms() {
        for term in ["_", "User", "_Ignored", "alice", "isUser", "42", "-3", "1.5", "'hello world'"] {
            assert!(validate_term(term).is_ok(), "{} should be valid", term);
        }
    }

    #[test]
    fn test_validate_term_rejects_broken_syntax() {
        for term in ["a,b", "x)", "f(", "a.b", "it's", "'open", "two words", "1.", "'a\nb'"] {
            assert!(validate_term(term).is_err(), "{} should be rejected", term);
        }
        assert_eq!(validate_term(""), Err(TermError::Empty));
    }

    #[test]
    fn test_validate_predicate() {
        assert!(validate_predicate("authorised").is_ok());
        assert!(validate_predicate("'has space'").is_ok());
        assert!(validate_predicate("Admin").is_err());
        assert!(validate_predicate("_").is_err());
        assert!(validate_predicate("").is_err());
    }
}

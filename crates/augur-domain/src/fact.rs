//! Fact module - single-line ground statements such as `admin(xyz).`

use crate::term::{validate_predicate, TermError};
use std::fmt;
use thiserror::Error;

/// Reasons a piece of text is not a storable fact
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactError {
    /// Nothing but whitespace
    #[error("Fact is empty")]
    Empty,

    /// Facts are persisted one per line
    #[error("Fact spans multiple lines: {0:?}")]
    MultiLine(String),

    /// Missing the closing period
    #[error("Fact must end with '.': {0}")]
    Unterminated(String),

    /// A clause with a body is a rule, not a fact
    #[error("Rules cannot be stored as facts: {0}")]
    IsRule(String),

    /// The functor is not an atom
    #[error(transparent)]
    Predicate(#[from] TermError),
}

/// A fact as it appears in the fact file
///
/// Equality is textual: `admin(xyz).` and `admin( xyz ).` are different facts
/// even though they unify. Surrounding whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact(String);

impl Fact {
    /// Create a fact from its text
    ///
    /// # Examples
    ///
    /// ```
    /// use augur_domain::Fact;
    ///
    /// let fact = Fact::new("admin(xyz).").unwrap();
    /// assert_eq!(fact.predicate(), "admin");
    /// assert!(Fact::new("admin(xyz)").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, FactError> {
        let text = text.as_ref().trim();

        if text.is_empty() {
            return Err(FactError::Empty);
        }
        if text.contains(['\n', '\r']) {
            return Err(FactError::MultiLine(text.to_string()));
        }
        if !text.ends_with('.') {
            return Err(FactError::Unterminated(text.to_string()));
        }
        if has_neck(text) {
            return Err(FactError::IsRule(text.to_string()));
        }

        validate_predicate(functor_of(text))?;

        Ok(Self(text.to_string()))
    }

    /// Get the fact text, including the closing period
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the predicate name
    pub fn predicate(&self) -> &str {
        functor_of(&self.0)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fact {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn functor_of(text: &str) -> &str {
    let end = text
        .find('(')
        .unwrap_or_else(|| text.len().saturating_sub(1));
    text[..end].trim()
}

/// Does `text` contain a `:-` outside quoted atoms and strings?
fn has_neck(text: &str) -> bool {
    let mut quote = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                ':' if chars.peek() == Some(&'-') => return true,
                _ => {}
            },
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_creation() {
        let fact = Fact::new("  collab(afi).  ").unwrap();
        assert_eq!(fact.as_str(), "collab(afi).");
        assert_eq!(fact.predicate(), "collab");
    }

    #[test]
    fn test_zero_arity_fact() {
        let fact = Fact::new("maintenance.").unwrap();
        assert_eq!(fact.predicate(), "maintenance");
    }

    #[test]
    fn test_textual_equality() {
        let a = Fact::new("admin(xyz).").unwrap();
        let b = Fact::new("admin( xyz ).").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_facts() {
        assert_eq!(Fact::new("   "), Err(FactError::Empty));
        assert!(matches!(Fact::new("admin(xyz)"), Err(FactError::Unterminated(_))));
        assert!(matches!(Fact::new("a(b).\nc(d)."), Err(FactError::MultiLine(_))));
        assert!(matches!(Fact::new("a(X) :- b(X)."), Err(FactError::IsRule(_))));
        assert!(matches!(Fact::new("Admin(xyz)."), Err(FactError::Predicate(_))));
    }

    #[test]
    fn test_neck_inside_quotes_is_data() {
        assert!(Fact::new("note('a:-b').").is_ok());
        assert!(Fact::new("note(\"x :- y\").").is_ok());
        assert!(Fact::new("note('it''s', 'a\\'b:-c').").is_ok());
        assert!(matches!(
            Fact::new("note('a') :- true."),
            Err(FactError::IsRule(_))
        ));
    }
}

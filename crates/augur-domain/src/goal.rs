//! Goal module - typed construction of queries
//!
//! Goals are built against a [`GoalSchema`] (predicate name plus expected
//! arity) so that malformed queries are caught here instead of surfacing as
//! a parse error inside the inference engine.

use crate::term::{as_term, validate_predicate, validate_term, TermError};
use std::fmt;
use thiserror::Error;

/// Predicate that authorization rules must define
pub const DEFAULT_RULE_NAME: &str = "authorised";

/// Arity of the authorization predicate: user, entity, target, access
pub const AUTHORIZATION_ARITY: usize = 4;

/// Errors raised while building a goal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    /// Predicate or argument is not a valid term
    #[error(transparent)]
    Term(#[from] TermError),

    /// Number of arguments does not match the schema
    #[error("Goal {predicate}/{expected} built with {actual} argument(s)")]
    ArityMismatch {
        /// Predicate name
        predicate: String,
        /// Arity declared by the schema
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },
}

/// Predicate name and arity a goal must conform to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoalSchema {
    predicate: String,
    arity: usize,
}

impl GoalSchema {
    /// Create a new schema
    pub fn new(predicate: impl Into<String>, arity: usize) -> Self {
        Self {
            predicate: predicate.into(),
            arity,
        }
    }

    /// Schema of the default authorization rule
    pub fn authorization() -> Self {
        Self::new(DEFAULT_RULE_NAME, AUTHORIZATION_ARITY)
    }

    /// Predicate name
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Expected number of arguments
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for GoalSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.predicate, self.arity)
    }
}

/// A validated goal, ready to hand to an inference engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    predicate: String,
    args: Vec<String>,
}

impl Goal {
    /// Build a goal whose arity is simply the number of arguments given
    ///
    /// # Examples
    ///
    /// ```
    /// use augur_domain::Goal;
    ///
    /// let goal = Goal::from_args("authorisation", &[Some("argument1"), Some("argument2"), None]).unwrap();
    /// assert_eq!(goal.to_string(), "authorisation(argument1, argument2, _).");
    /// ```
    pub fn from_args(predicate: &str, args: &[Option<&str>]) -> Result<Self, GoalError> {
        GoalBuilder::new(GoalSchema::new(predicate, args.len()))
            .args(args.iter().copied())
            .build()
    }

    /// Predicate name
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Encoded arguments in positional order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of arguments
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}.", self.predicate)
        } else {
            write!(f, "{}({}).", self.predicate, self.args.join(", "))
        }
    }
}

/// Incremental goal construction against a schema
#[derive(Debug, Clone)]
pub struct GoalBuilder {
    schema: GoalSchema,
    args: Vec<String>,
}

impl GoalBuilder {
    /// Start a goal for `schema`
    pub fn new(schema: GoalSchema) -> Self {
        let capacity = schema.arity;
        Self {
            schema,
            args: Vec::with_capacity(capacity),
        }
    }

    /// Append one argument; `None` and `""` become the wildcard
    pub fn arg(mut self, value: Option<&str>) -> Self {
        self.args.push(as_term(value).to_string());
        self
    }

    /// Append several arguments
    pub fn args<'a, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        values.into_iter().fold(self, |builder, value| builder.arg(value))
    }

    /// Validate and produce the goal
    pub fn build(self) -> Result<Goal, GoalError> {
        validate_predicate(&self.schema.predicate)?;

        if self.args.len() != self.schema.arity {
            return Err(GoalError::ArityMismatch {
                predicate: self.schema.predicate,
                expected: self.schema.arity,
                actual: self.args.len(),
            });
        }

        for arg in &self.args {
            validate_term(arg)?;
        }

        Ok(Goal {
            predicate: self.schema.predicate,
            args: self.args,
        })
    }
}

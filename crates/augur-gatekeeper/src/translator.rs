//! Permission request to goal translation

use augur_domain::{Goal, GoalBuilder, GoalError, GoalSchema, PermissionRequest};

/// Turns permission requests into goals for one authorization schema
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    schema: GoalSchema,
}

impl RequestTranslator {
    /// Create a translator for `schema`
    pub fn new(schema: GoalSchema) -> Self {
        Self { schema }
    }

    /// The schema goals are checked against
    pub fn schema(&self) -> &GoalSchema {
        &self.schema
    }

    /// Build the authorization goal for `request`
    ///
    /// Arguments are `user, entity, target, access` then the extras; unset
    /// or empty fields become `_`. Fails when the argument count differs
    /// from the schema arity or a value is not a valid term.
    pub fn translate(&self, request: &PermissionRequest) -> Result<Goal, GoalError> {
        GoalBuilder::new(self.schema.clone())
            .args(request.arguments())
            .build()
    }
}

/// Build `predicate(user, entity, target, access[, extra...]).` for a request
///
/// The arity is whatever the request carries, so no arity check happens.
///
/// # Examples
///
/// ```
/// use augur_domain::PermissionRequest;
/// use augur_gatekeeper::build_goal;
///
/// let request = PermissionRequest::for_user("bob").with_access("read");
/// let goal = build_goal("authorised", &request).unwrap();
/// assert_eq!(goal.to_string(), "authorised(bob, _, _, read).");
/// ```
pub fn build_goal(predicate: &str, request: &PermissionRequest) -> Result<Goal, GoalError> {
    Goal::from_args(predicate, &request.arguments())
}

/// Name of the first predicate called by `goal`, if it can be read off
///
/// Quoted names are returned without their quotes.
pub(crate) fn leading_functor(goal: &str) -> Option<&str> {
    let goal = goal.trim_start();

    if let Some(rest) = goal.strip_prefix('\'') {
        let end = rest.find('\'')?;
        return Some(&rest[..end]);
    }

    let end = goal
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(goal.len());
    let name = &goal[..end];

    match name.chars().next() {
        Some(c) if c.is_lowercase() => Some(name),
        _ => None,
    }
}

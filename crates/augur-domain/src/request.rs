//! Permission request - the question "may this user do this?"

/// A structured authorization request
///
/// Fields map positionally onto the authorization predicate:
/// `user, entity, target, access`, followed by any `extra` arguments.
/// An unset field (`None`) and an empty one (`Some("")`) are kept distinct
/// here but both encode to the wildcard, so the rule may match any value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionRequest {
    /// Subject identity
    pub user: Option<String>,

    /// Entity (resource type) being accessed
    pub entity: Option<String>,

    /// Specific target within the entity
    pub target: Option<String>,

    /// Kind of access requested (`read`, `update`, ...)
    pub access: Option<String>,

    /// Trailing arguments for rules with a wider arity
    pub extra: Vec<Option<String>>,
}

impl PermissionRequest {
    /// Create a request for a user with every other field unset
    ///
    /// # Examples
    ///
    /// ```
    /// use augur_domain::PermissionRequest;
    ///
    /// let request = PermissionRequest::for_user("bob").with_access("read");
    /// assert_eq!(request.arguments(), vec![Some("bob"), None, None, Some("read")]);
    /// ```
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Default::default()
        }
    }

    /// Set the entity
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the target
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the access kind
    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access = Some(access.into());
        self
    }

    /// Append a trailing argument
    pub fn with_extra(mut self, value: Option<impl Into<String>>) -> Self {
        self.extra.push(value.map(Into::into));
        self
    }

    /// All arguments in positional order
    pub fn arguments(&self) -> Vec<Option<&str>> {
        [&self.user, &self.entity, &self.target, &self.access]
            .into_iter()
            .chain(self.extra.iter())
            .map(|field| field.as_deref())
            .collect()
    }
}

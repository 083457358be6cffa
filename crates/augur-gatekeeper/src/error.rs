//! Provider error types

use augur_domain::{FactError, GoalError};
use augur_store::StoreError;
use thiserror::Error;

/// Errors that can occur during provider operations
///
/// None of these is ever turned into an allow; see
/// [`PermissionProvider::decide`](crate::PermissionProvider::decide).
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Fact or rule file missing, unreadable or unwritable
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Query issued before the first successful fetch
    #[error("No active session: fetch facts and rules first")]
    NoActiveSession,

    /// Goal could not be built or does not match the requested predicate
    #[error("Malformed goal: {0}")]
    MalformedGoal(String),

    /// Fact text rejected before touching the file
    #[error("Malformed fact: {0}")]
    MalformedFact(#[from] FactError),

    /// Engine parse or solve failure, diagnostic kept verbatim
    #[error("Engine error: {0}")]
    Engine(String),

    /// A caller panicked while holding the provider lock
    #[error("Provider lock poisoned")]
    Poisoned,
}

impl From<GoalError> for ProviderError {
    fn from(err: GoalError) -> Self {
        Self::MalformedGoal(err.to_string())
    }
}

impl ProviderError {
    pub(crate) fn engine<E: std::error::Error>(err: E) -> Self {
        Self::Engine(err.to_string())
    }
}

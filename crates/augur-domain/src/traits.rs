//! Trait definitions for external interactions
//!
//! The inference engine is infrastructure: this crate only states the narrow
//! contract the permission provider relies on.

use crate::Solution;

/// A logic inference session
///
/// Implemented by the infrastructure layer (augur-engine). One value is one
/// session: clauses consulted into it stay until retracted or until the
/// value is dropped.
pub trait InferenceEngine {
    /// Error type for engine operations; its message is the engine diagnostic
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load program text (facts and rules), adding to what is already loaded
    fn consult(&mut self, program: &str) -> Result<(), Self::Error>;

    /// Remove every loaded clause equal to `clause`, returning how many
    fn retract(&mut self, clause: &str) -> Result<usize, Self::Error>;

    /// Does the goal have at least one solution?
    fn solve(&self, goal: &str) -> Result<bool, Self::Error>;

    /// Every solution of the goal, in the order the engine finds them
    fn solve_all(&self, goal: &str) -> Result<Vec<Solution>, Self::Error>;
}

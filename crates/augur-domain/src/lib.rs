//! Augur Domain Layer
//!
//! Core vocabulary of the Augur permission provider. It defines the value
//! objects and the trait boundary that every other crate depends upon, and
//! performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Term**: an encoded value usable inside a goal; `_` matches anything
//! - **Fact**: a ground statement persisted as one line (`admin(xyz).`)
//! - **Goal**: a query validated against a predicate/arity schema
//! - **Permission Request**: user, entity, target, access (+ extras)
//! - **Solution**: one set of variable bindings reported by the engine
//!
//! ## Architecture
//!
//! - No I/O and no engine implementation here
//! - Encoding functions are total: they never fail
//! - The inference engine is reached only through [`traits::InferenceEngine`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fact;
pub mod goal;
pub mod permission;
pub mod request;
pub mod solution;
pub mod term;
pub mod traits;

// Re-exports for convenience
pub use fact::{Fact, FactError};
pub use goal::{Goal, GoalBuilder, GoalError, GoalSchema, AUTHORIZATION_ARITY, DEFAULT_RULE_NAME};
pub use permission::{AccessTypes, Permission};
pub use request::PermissionRequest;
pub use solution::Solution;
pub use term::{as_term, quote, TermError, WILDCARD};
pub use traits::InferenceEngine;

//! Augur Gatekeeper
//!
//! The permission provider: answers "may this user do this?" by evaluating
//! an authorization rule over a fact file and a rule file.
//!
//! The Gatekeeper provides:
//! - Session lifecycle (fetch, atomic replacement, generation counter)
//! - Fact management that keeps the file and the live session in step
//! - Authorization checks built from typed requests, denying on any error
//! - Raw goal evaluation and solution enumeration
//!
//! # Examples
//!
//! ```no_run
//! use augur_domain::PermissionRequest;
//! use augur_gatekeeper::PermissionProvider;
//!
//! let provider = PermissionProvider::new("facts.pl", "rules.pl");
//! provider.fetch().unwrap();
//!
//! let request = PermissionRequest::for_user("bob").with_access("read");
//! if provider.is_authorized(&request).unwrap() {
//!     // ...
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod provider;
mod session;
mod translator;

pub use config::{ConfigError, ProviderConfig};
pub use error::ProviderError;
pub use provider::{Decision, PermissionProvider};
pub use translator::{build_goal, RequestTranslator};

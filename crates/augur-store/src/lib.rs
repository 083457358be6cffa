//! Augur Storage Layer
//!
//! Flat-file persistence for the permission provider.
//!
//! # Architecture
//!
//! - [`FactStore`]: one fact per non-blank line, insertion ordered, set-like
//!   (idempotent add, remove-all-matches)
//! - [`RuleLoader`]: the rule program, read verbatim and never written
//!
//! Neither type touches the file system until asked to.
//!
//! # Examples
//!
//! ```no_run
//! use augur_domain::Fact;
//! use augur_store::FactStore;
//!
//! let mut store = FactStore::new("facts.pl");
//! store.fetch().unwrap();
//! store.add_fact(&Fact::new("admin(xyz).").unwrap()).unwrap();
//! ```

#![warn(missing_docs)]

mod facts;
mod rules;

pub use facts::FactStore;
pub use rules::RuleLoader;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file missing, unreadable or unwritable
    #[error("Store unavailable at {}: {source}", path.display())]
    Unavailable {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn unavailable(path: &Path, source: io::Error) -> Self {
        Self::Unavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the file involved
    pub fn path(&self) -> &Path {
        match self {
            Self::Unavailable { path, .. } => path,
        }
    }
}

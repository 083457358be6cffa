//! Command implementations.

pub mod check;
pub mod eval;
pub mod facts;
pub mod profile;
pub mod solve;

pub use self::check::execute_check;
pub use self::eval::execute_eval;
pub use self::facts::{execute_add_fact, execute_facts, execute_remove_fact};
pub use self::profile::execute_profile;
pub use self::solve::execute_solve;

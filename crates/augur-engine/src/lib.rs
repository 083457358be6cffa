//! Augur Inference Engine
//!
//! Implementation of the `InferenceEngine` trait from `augur-domain`, backed
//! by the Scryer Prolog machine.
//!
//! # Architecture
//!
//! Each `PrologEngine` owns one machine on a dedicated worker thread, so the
//! engine handle is `Send + Sync` whatever the machine is. Programs are
//! staged to a temporary file and read clause by clause; every loaded
//! predicate is dynamic and can be retracted again.
//!
//! Goals run under `call_with_inference_limit/3` with the occurs check on,
//! so cyclic bindings fail instead of building infinite terms. Calling a
//! predicate that was never defined fails instead of raising.
//!
//! # Examples
//!
//! ```
//! use augur_engine::PrologEngine;
//! use augur_domain::traits::InferenceEngine;
//!
//! let mut engine = PrologEngine::default();
//! engine.consult("collab(afi).\ncollab(lma).").unwrap();
//!
//! let solutions = engine.solve_all("collab(Collab)").unwrap();
//! assert_eq!(solutions.len(), 2);
//! assert_eq!(solutions[0].get("Collab"), Some("afi"));
//! assert!(engine.solve("collab(lma).").unwrap());
//! ```

#![warn(missing_docs)]

mod support;
mod term;
mod worker;

use augur_domain::traits::InferenceEngine;
use augur_domain::Solution;
use scryer_prolog::Term;
use std::io::Write;
use support::{COUNT_VAR, LIMIT_EXCEEDED, LIMIT_VAR};
use thiserror::Error;
use tracing::debug;
use worker::{Bindings, Worker};

/// Errors that can occur during engine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Program or goal text does not parse
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A goal used up its inference budget
    #[error("Inference limit of {0} exceeded")]
    LimitExceeded(u64),

    /// A goal was an unbound variable at call time
    #[error("Instantiation error: goal is an unbound variable")]
    Instantiation,

    /// A goal was bound to something that cannot be called
    #[error("Type error: {0} is not callable")]
    NotCallable(String),

    /// Any other uncaught Prolog exception
    #[error("Uncaught exception: {0}")]
    Exception(String),

    /// The program could not be staged for loading
    #[error("Failed to stage program: {0}")]
    Staging(String),

    /// The machine thread is gone
    #[error("Inference worker is not running")]
    Disconnected,
}

/// Configuration for the Prolog engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Inferences a single goal may spend before it is abandoned
    pub inference_limit: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inference_limit: 1_000_000,
        }
    }
}

/// Prolog inference session
///
/// Clauses are kept in the order they were consulted, which is the order
/// solutions are reported in.
#[derive(Debug)]
pub struct PrologEngine {
    config: EngineConfig,
    worker: Worker,
}

impl Default for PrologEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PrologEngine {
    /// Start an empty session with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            worker: Worker::spawn(),
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn query(&self, goal: &str, limit: Option<usize>) -> Result<Vec<Bindings>, EngineError> {
        let query = support::solve_query(goal, self.config.inference_limit);
        let answers = self
            .worker
            .call(move |machine| worker::run(machine, query, limit))?;

        let exceeded = answers.iter().any(|bindings| {
            matches!(bindings.get(LIMIT_VAR), Some(Term::Atom(verdict)) if verdict == LIMIT_EXCEEDED)
        });
        if exceeded {
            return Err(EngineError::LimitExceeded(self.config.inference_limit));
        }
        Ok(answers)
    }
}

impl InferenceEngine for PrologEngine {
    type Error = EngineError;

    fn consult(&mut self, program: &str) -> Result<(), Self::Error> {
        let mut staged = tempfile::Builder::new()
            .prefix("augur-")
            .suffix(".pl")
            .tempfile()
            .map_err(|e| EngineError::Staging(e.to_string()))?;
        staged
            .write_all(program.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| EngineError::Staging(e.to_string()))?;

        let query = support::load_query(&staged.path().to_string_lossy());
        self.worker.call(move |machine| worker::run(machine, query, Some(1)))?;

        debug!(bytes = program.len(), "Consulted program");
        Ok(())
    }

    fn retract(&mut self, clause: &str) -> Result<usize, Self::Error> {
        let query = support::retract_query(clause);
        let answers = self
            .worker
            .call(move |machine| worker::run(machine, query, Some(1)))?;

        let removed = answers
            .first()
            .and_then(|bindings| bindings.get(COUNT_VAR))
            .and_then(|count| term::to_text(count).parse().ok())
            .unwrap_or(0);

        debug!(clause = %clause, removed, "Retracted clause");
        Ok(removed)
    }

    fn solve(&self, goal: &str) -> Result<bool, Self::Error> {
        Ok(!self.query(goal, Some(1))?.is_empty())
    }

    fn solve_all(&self, goal: &str) -> Result<Vec<Solution>, Self::Error> {
        let solutions = self
            .query(goal, None)?
            .into_iter()
            .map(|bindings| {
                bindings
                    .iter()
                    .filter(|(name, _)| name.as_str() != LIMIT_VAR && !name.starts_with('_'))
                    .map(|(name, value)| (name.clone(), term::to_value(value)))
                    .collect()
            })
            .collect();
        Ok(solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(program: &str) -> PrologEngine {
        let mut engine = PrologEngine::default();
        engine.consult(program).unwrap();
        engine
    }

    #[test]
    fn test_default_config() {
        assert_eq!(PrologEngine::default().config().inference_limit, 1_000_000);
    }

    #[test]
    fn test_solve_all_in_order() {
        let engine = engine("answerToLifeTheUniverseAndEverything(42).\ncollab(afi).\ncollab(lma).");
        let solutions = engine.solve_all("collab(Collab)").unwrap();

        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].get("Collab"), Some("afi"));
        assert_eq!(solutions[1].get("Collab"), Some("lma"));
        assert!(engine.solve("answerToLifeTheUniverseAndEverything(42).").unwrap());
    }

    #[test]
    fn test_authorization_rule() {
        let engine = engine(
            "isUser(alice).\nisUser(bob).\nauthorised(User,_,_,_):-isUser(User).",
        );
        assert!(engine.solve("authorised(bob, _, _, _).").unwrap());
        assert!(!engine.solve("authorised(carol, _, _, _).").unwrap());
    }

    #[test]
    fn test_multiple_rules_coexist() {
        let engine = engine(
            "admin(root).\nmember(bob).\n\
             authorised(U,_,_,_) :- admin(U).\n\
             authorised(U,doc,_,read) :- member(U).",
        );
        assert!(engine.solve("authorised(root, doc, x, delete)").unwrap());
        assert!(engine.solve("authorised(bob, doc, x, read)").unwrap());
        assert!(!engine.solve("authorised(bob, doc, x, delete)").unwrap());
        assert_eq!(engine.solve_all("authorised(U, doc, x, read)").unwrap().len(), 2);
    }

    #[test]
    fn test_anonymous_variables_not_reported() {
        let engine = engine("pair(a, b).");
        let solutions = engine.solve_all("pair(X, _Ignored)").unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].len(), 1);
    }

    #[test]
    fn test_ground_goal_yields_empty_solution() {
        let engine = engine("admin(xyz).");
        let solutions = engine.solve_all("admin(xyz)").unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_empty());
    }

    #[test]
    fn test_unknown_predicate_fails() {
        let engine = engine("admin(xyz).");
        assert!(!engine.solve("nobody(here)").unwrap());
    }

    #[test]
    fn test_consult_is_atomic() {
        let mut engine = engine("admin(xyz).");
        let result = engine.consult("admin(abc).\nbroken(");
        assert!(matches!(result, Err(EngineError::Syntax(_))));
        assert!(!engine.solve("admin(abc)").unwrap());
        assert!(engine.solve("admin(xyz)").unwrap());
    }

    #[test]
    fn test_retract_removes_every_copy() {
        let mut engine = engine("admin(xyz).\nadmin(xyz).\nadmin(abc).");
        assert_eq!(engine.retract("admin(xyz).").unwrap(), 2);
        assert!(!engine.solve("admin(xyz)").unwrap());
        assert!(engine.solve("admin(abc)").unwrap());
        assert_eq!(engine.retract("admin(none).").unwrap(), 0);
    }

    #[test]
    fn test_retract_leaves_more_general_clauses() {
        let mut engine = engine("admin(X).\nadmin(abc).");
        assert_eq!(engine.retract("admin(abc).").unwrap(), 1);
        assert!(engine.solve("admin(anyone)").unwrap());
        assert_eq!(engine.solve_all("admin(Who)").unwrap().len(), 1);
    }

    #[test]
    fn test_retract_rule_modulo_variable_names() {
        let mut engine = engine("ok(X) :- admin(X).\nadmin(root).");
        assert_eq!(engine.retract("ok(Y) :- admin(Y).").unwrap(), 1);
        assert!(!engine.solve("ok(root)").unwrap());
    }

    #[test]
    fn test_syntax_error_in_goal() {
        let engine = engine("admin(xyz).");
        assert!(engine.solve("admin(x), evil(").is_err());
    }

    #[test]
    fn test_cyclic_binding_fails() {
        let engine = engine("eq(Y, f(Y)).");
        assert!(engine.solve_all("eq(X, X)").unwrap().is_empty());
    }

    #[test]
    fn test_inference_limit_is_configurable() {
        let mut engine = PrologEngine::new(EngineConfig { inference_limit: 64 });
        engine.consult("loop :- loop.").unwrap();
        assert_eq!(engine.solve("loop"), Err(EngineError::LimitExceeded(64)));
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PrologEngine>();
    }
}

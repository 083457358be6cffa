//! Loaded inference session

use crate::ProviderError;
use augur_domain::{Fact, InferenceEngine, Solution};
use tracing::debug;

/// One engine populated from a fetch of the fact and rule files
pub(crate) struct Session<E> {
    engine: E,
    generation: u64,
}

impl<E: InferenceEngine> Session<E> {
    /// Consult facts then rules into a fresh engine
    pub(crate) fn build(
        mut engine: E,
        facts: &str,
        rules: &str,
        generation: u64,
    ) -> Result<Self, ProviderError> {
        engine.consult(facts).map_err(ProviderError::engine)?;
        engine.consult(rules).map_err(ProviderError::engine)?;
        Ok(Self { engine, generation })
    }

    /// Check that `fact` loads, using a throwaway engine
    pub(crate) fn check_fact(mut scratch: E, fact: &Fact) -> Result<(), ProviderError> {
        scratch.consult(fact.as_str()).map_err(ProviderError::engine)
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn assert_fact(&mut self, fact: &Fact) -> Result<(), ProviderError> {
        self.engine.consult(fact.as_str()).map_err(ProviderError::engine)
    }

    pub(crate) fn retract_fact(&mut self, fact: &Fact) -> Result<usize, ProviderError> {
        self.engine.retract(fact.as_str()).map_err(ProviderError::engine)
    }

    pub(crate) fn solve(&self, goal: &str) -> Result<bool, ProviderError> {
        let found = self.engine.solve(goal).map_err(ProviderError::engine)?;
        debug!(goal = %goal, found, generation = self.generation, "Evaluated goal");
        Ok(found)
    }

    pub(crate) fn solve_all(&self, goal: &str) -> Result<Vec<Solution>, ProviderError> {
        let solutions = self.engine.solve_all(goal).map_err(ProviderError::engine)?;
        debug!(goal = %goal, solutions = solutions.len(), "Enumerated solutions");
        Ok(solutions)
    }
}

//! The permission provider

use crate::session::Session;
use crate::translator::{leading_functor, RequestTranslator};
use crate::{ProviderConfig, ProviderError};
use augur_domain::{AccessTypes, Fact, Goal, InferenceEngine, Permission, PermissionRequest, Solution};
use augur_engine::PrologEngine;
use augur_store::{FactStore, RuleLoader};
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Outcome of [`PermissionProvider::decide`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The rule holds for the request
    Allow,
    /// The rule does not hold, or it could not be evaluated
    Deny,
}

impl Decision {
    /// Is this an allow?
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type EngineFactory<E> = Box<dyn Fn(&ProviderConfig) -> E + Send + Sync>;

struct State<E> {
    facts: FactStore,
    rules: RuleLoader,
    session: Option<Session<E>>,
    generation: u64,
}

impl<E: InferenceEngine> State<E> {
    fn session(&self) -> Result<&Session<E>, ProviderError> {
        self.session.as_ref().ok_or(ProviderError::NoActiveSession)
    }
}

/// Answers authorization questions from a fact file and a rule file
///
/// Nothing is read until [`fetch`](Self::fetch). Every operation holds one
/// provider-wide lock for its whole duration, so callers on other threads
/// never see a half-built session or a file mid-write.
pub struct PermissionProvider<E: InferenceEngine = PrologEngine> {
    config: ProviderConfig,
    translator: RequestTranslator,
    factory: EngineFactory<E>,
    state: Mutex<State<E>>,
}

impl PermissionProvider<PrologEngine> {
    /// Provider over the two files with the default configuration
    pub fn new<F: AsRef<Path>, R: AsRef<Path>>(facts_path: F, rules_path: R) -> Self {
        Self::with_config(ProviderConfig::new(facts_path, rules_path))
    }

    /// Provider using the built-in Prolog engine
    pub fn with_config(config: ProviderConfig) -> Self {
        Self::with_engine(config, |config| PrologEngine::new(config.engine_config()))
    }
}

impl<E: InferenceEngine> PermissionProvider<E> {
    /// Provider that builds each session's engine with `factory`
    pub fn with_engine<F>(config: ProviderConfig, factory: F) -> Self
    where
        F: Fn(&ProviderConfig) -> E + Send + Sync + 'static,
    {
        let state = State {
            facts: FactStore::new(&config.facts_path),
            rules: RuleLoader::new(&config.rules_path),
            session: None,
            generation: 0,
        };

        Self {
            translator: RequestTranslator::new(config.schema()),
            config,
            factory: Box::new(factory),
            state: Mutex::new(state),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<E>>, ProviderError> {
        self.state.lock().map_err(|_| ProviderError::Poisoned)
    }

    /// Load facts and rules into a new session, replacing the current one
    ///
    /// The replacement only happens once the new session is complete; on
    /// any error the previous session stays active. Returns the number of
    /// facts loaded.
    pub fn fetch(&self) -> Result<usize, ProviderError> {
        let mut state = self.lock()?;

        // the store is committed together with the session
        let mut facts = state.facts.clone();
        let count = facts.fetch()?.len();
        let program = facts.program_text();
        let rules = state.rules.load_rules()?;

        let generation = state.generation + 1;
        let session = Session::build((self.factory)(&self.config), &program, &rules, generation)?;

        state.facts = facts;
        state.session = Some(session);
        state.generation = generation;

        info!(facts = count, generation, "Session loaded");
        Ok(count)
    }

    /// Has a fetch succeeded yet?
    pub fn is_loaded(&self) -> Result<bool, ProviderError> {
        Ok(self.lock()?.session.is_some())
    }

    /// Number of sessions built so far; zero before the first fetch
    pub fn session_generation(&self) -> Result<u64, ProviderError> {
        let state = self.lock()?;
        Ok(state.session.as_ref().map_or(0, Session::generation))
    }

    /// Facts held in memory, in file order
    pub fn facts(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.lock()?.facts.facts().to_vec())
    }

    /// Persist a fact and make it queryable
    ///
    /// The fact is loaded into a scratch engine first, so text the engine
    /// rejects never reaches the file. The file is appended to only if no
    /// identical line is already there. With an active session the fact is
    /// consulted into it at once. Returns `true` when the file changed.
    pub fn add_fact(&self, text: &str) -> Result<bool, ProviderError> {
        let fact = Fact::new(text)?;
        let mut state = self.lock()?;

        let known = state.facts.contains(&fact);
        if !known {
            Session::check_fact((self.factory)(&self.config), &fact)?;
        }
        let appended = state.facts.add_fact(&fact)?;

        if !known {
            if let Some(session) = state.session.as_mut() {
                session.assert_fact(&fact)?;
            }
        }

        info!(fact = %fact, appended, "Fact added");
        Ok(appended)
    }

    /// Delete every occurrence of a fact from the file and the session
    ///
    /// Only the copy loaded from the fact file leaves the session; an
    /// identical clause from the rule file stays. Removing an absent fact
    /// is not an error. Returns the number of lines removed from the file.
    pub fn remove_fact(&self, text: &str) -> Result<usize, ProviderError> {
        let fact = Fact::new(text)?;
        let mut state = self.lock()?;

        let listed = state.facts.contains(&fact);
        let removed = state.facts.remove_fact(&fact)?;

        if listed {
            if let Some(session) = state.session.as_mut() {
                let retracted = session.retract_fact(&fact)?;
                // retract takes every variant; restore the rule file's copies
                for _ in 1..retracted {
                    session.assert_fact(&fact)?;
                }
            }
        }

        info!(fact = %fact, removed, "Fact removed");
        Ok(removed)
    }

    /// Does `predicate(args...)` hold?
    ///
    /// `None` and empty arguments are wildcards.
    pub fn eval(&self, predicate: &str, args: &[Option<&str>]) -> Result<bool, ProviderError> {
        let goal = Goal::from_args(predicate, args)?;
        let state = self.lock()?;
        state.session()?.solve(&goal.to_string())
    }

    /// Does the authorization rule hold for `request`?
    pub fn is_authorized(&self, request: &PermissionRequest) -> Result<bool, ProviderError> {
        let state = self.lock()?;
        self.authorized_in(&state, request)
    }

    fn authorized_in(
        &self,
        state: &State<E>,
        request: &PermissionRequest,
    ) -> Result<bool, ProviderError> {
        let goal = self.translator.translate(request)?;
        let allowed = state.session()?.solve(&goal.to_string())?;

        debug!(goal = %goal, allowed, "Authorization checked");
        Ok(allowed)
    }

    /// Does `user` hold `permission`?
    ///
    /// Every access kind in the permission must be authorized on its own;
    /// an empty set leaves the access argument as a wildcard. All kinds are
    /// checked against the same session.
    pub fn is_permitted(&self, user: &str, permission: &Permission) -> Result<bool, ProviderError> {
        let base = PermissionRequest {
            user: Some(user.to_string()),
            entity: permission.entity.clone(),
            target: permission.target.clone(),
            ..Default::default()
        };

        let kinds: Vec<&str> = [
            AccessTypes::CREATE,
            AccessTypes::READ,
            AccessTypes::UPDATE,
            AccessTypes::DELETE,
        ]
        .into_iter()
        .filter(|kind| permission.access_types.contains(*kind))
        .filter_map(|kind| kind.as_atom())
        .collect();

        let state = self.lock()?;
        if kinds.is_empty() {
            return self.authorized_in(&state, &base);
        }

        for kind in kinds {
            if !self.authorized_in(&state, &base.clone().with_access(kind))? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Authorization answer that never fails open
    ///
    /// Any error is logged and becomes [`Decision::Deny`].
    pub fn decide(&self, request: &PermissionRequest) -> Decision {
        match self.is_authorized(request) {
            Ok(true) => Decision::Allow,
            Ok(false) => Decision::Deny,
            Err(e) => {
                warn!(error = %e, user = ?request.user, "Authorization failed, denying");
                Decision::Deny
            }
        }
    }

    /// Every solution of `goal`, in engine order
    ///
    /// When `predicate` is given the goal must call it first.
    pub fn get_all_solutions(
        &self,
        predicate: Option<&str>,
        goal: &str,
    ) -> Result<Vec<Solution>, ProviderError> {
        if let Some(expected) = predicate {
            let found = leading_functor(goal);
            if found != Some(expected) {
                return Err(ProviderError::MalformedGoal(format!(
                    "goal '{}' does not call predicate '{}'",
                    goal.trim(),
                    expected
                )));
            }
        }

        let state = self.lock()?;
        state.session()?.solve_all(goal)
    }
}

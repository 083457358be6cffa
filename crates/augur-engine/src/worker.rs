//! Thread that owns the Prolog machine
//!
//! Callers hand closures to the worker over a channel and block on the
//! reply. The machine never leaves its thread.

use crate::support::{BOOTSTRAP, CLAUSES};
use crate::term::to_text;
use crate::EngineError;
use scryer_prolog::{LeafAnswer, Machine, MachineBuilder, Term};
use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{error, trace};

type Job = Box<dyn FnOnce(&mut Machine) + Send>;

/// Bindings of one answer, keyed by variable name
pub(crate) type Bindings = BTreeMap<String, Term>;

/// Handle to the machine thread
#[derive(Debug)]
pub(crate) struct Worker {
    jobs: Sender<Job>,
}

impl Worker {
    /// Start a thread with a fresh machine
    pub(crate) fn spawn() -> Self {
        let (jobs, queue) = mpsc::channel::<Job>();
        let spawned = thread::Builder::new()
            .name("augur-prolog".to_string())
            .spawn(move || serve(queue));

        if let Err(e) = spawned {
            error!(error = %e, "Failed to start Prolog worker");
        }
        Self { jobs }
    }

    /// Run `f` against the machine and wait for its result
    pub(crate) fn call<T, F>(&self, f: F) -> Result<T, EngineError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Machine) -> Result<T, EngineError> + Send + 'static,
    {
        let (reply, answer) = mpsc::channel();
        self.jobs
            .send(Box::new(move |machine| {
                let _ = reply.send(f(machine));
            }))
            .map_err(|_| EngineError::Disconnected)?;
        answer.recv().map_err(|_| EngineError::Disconnected)?
    }
}

fn serve(queue: Receiver<Job>) {
    let mut machine = MachineBuilder::default().build();
    if let Err(e) = bootstrap(&mut machine) {
        error!(error = %e, "Prolog worker failed to bootstrap");
        return;
    }

    for job in queue {
        job(&mut machine);
    }
    trace!("Prolog worker stopped");
}

fn bootstrap(machine: &mut Machine) -> Result<(), EngineError> {
    for query in BOOTSTRAP {
        run(machine, format!("{}.", query), None)?;
    }
    for clause in CLAUSES {
        run(machine, format!("assertz(({})).", clause), None)?;
    }
    Ok(())
}

/// Run a query and collect its answers
///
/// Stops after `limit` answers when one is given. Failure yields no answers.
pub(crate) fn run(
    machine: &mut Machine,
    query: String,
    limit: Option<usize>,
) -> Result<Vec<Bindings>, EngineError> {
    trace!(query = %query, "Running query");
    let mut answers = Vec::new();

    for answer in machine.run_query(query) {
        match answer {
            Ok(LeafAnswer::True) => answers.push(Bindings::new()),
            Ok(LeafAnswer::LeafAnswer { bindings, .. }) => answers.push(bindings),
            Ok(LeafAnswer::False) => break,
            Ok(LeafAnswer::Exception(term)) | Err(term) => return Err(exception(&term)),
        }
        if limit.is_some_and(|n| answers.len() >= n) {
            break;
        }
    }
    Ok(answers)
}

/// Classify an uncaught Prolog exception
fn exception(term: &Term) -> EngineError {
    if let Term::Compound(name, args) = term {
        if name == "error" && args.len() == 2 {
            match &args[0] {
                Term::Compound(kind, _) if kind == "syntax_error" => {
                    return EngineError::Syntax(to_text(term));
                }
                Term::Atom(kind) if kind == "instantiation_error" => {
                    return EngineError::Instantiation;
                }
                Term::Compound(kind, detail)
                    if kind == "type_error"
                        && detail.len() == 2
                        && matches!(&detail[0], Term::Atom(t) if t == "callable") =>
                {
                    return EngineError::NotCallable(to_text(&detail[1]));
                }
                _ => {}
            }
        }
    }
    EngineError::Exception(to_text(term))
}

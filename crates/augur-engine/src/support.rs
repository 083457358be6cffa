//! Prolog-side support predicates
//!
//! Programs are read term by term from a staged file and asserted, so every
//! loaded predicate is dynamic and can be retracted later. A program with a
//! syntax error raises before anything is asserted.

/// Queries run once when a machine starts
pub(crate) const BOOTSTRAP: &[&str] = &[
    "use_module(library(iso_ext))",
    "set_prolog_flag(occurs_check, true)",
];

/// Clauses asserted once when a machine starts
pub(crate) const CLAUSES: &[&str] = &[
    "augur_load(Path) :- \
        open(Path, read, S), \
        catch(augur_read_all(S, Cs), E, (close(S), throw(E))), \
        close(S), \
        augur_assert_all(Cs)",
    "augur_read_all(S, Cs) :- \
        read_term(S, T, []), \
        (   T == end_of_file -> Cs = [] \
        ;   nonvar(T), T = (:- D) -> call(D), augur_read_all(S, Cs) \
        ;   Cs = [T|Rest], augur_read_all(S, Rest) \
        )",
    "augur_assert_all([])",
    "augur_assert_all([C|Cs]) :- assertz(C), augur_assert_all(Cs)",
    "augur_solve(G, Limit, R) :- \
        catch(call_with_inference_limit(G, Limit, R), \
              error(existence_error(procedure, _), _), \
              fail)",
    "augur_retract(C, N) :- \
        augur_clause(C, H0, B0), \
        functor(H0, Name, Arity), \
        functor(H, Name, Arity), \
        findall((H :- B), catch(clause(H, B), _, fail), All), \
        augur_split(All, (H0 :- B0), Keep, 0, N), \
        (   N =:= 0 -> true \
        ;   retractall(H), augur_assert_all(Keep) \
        )",
    "augur_clause((H :- B), H, B) :- !",
    "augur_clause(H, H, true)",
    "augur_split([], _, [], N, N)",
    "augur_split([C|Cs], T, Keep, N0, N) :- \
        (   augur_variant(C, T) -> N1 is N0 + 1, Keep = Rest \
        ;   N1 = N0, Keep = [C|Rest] \
        ), \
        augur_split(Cs, T, Rest, N1, N)",
    "augur_variant(A, B) :- subsumes_term(A, B), subsumes_term(B, A)",
];

/// Variable that carries the inference-limit verdict of a solve
pub(crate) const LIMIT_VAR: &str = "Augur_Limit";

/// Variable that carries the number of retracted clauses
pub(crate) const COUNT_VAR: &str = "Augur_Count";

/// Value bound to [`LIMIT_VAR`] when the limit ran out
pub(crate) const LIMIT_EXCEEDED: &str = "inference_limit_exceeded";

/// Goal or clause text with its terminating full stop removed
pub(crate) fn body(text: &str) -> &str {
    let text = text.trim_end();
    text.strip_suffix('.').unwrap_or(text).trim_end()
}

/// Query that loads the program staged at `path`
pub(crate) fn load_query(path: &str) -> String {
    format!("augur_load({}).", quoted(path))
}

/// Query that solves `goal` under an inference limit
pub(crate) fn solve_query(goal: &str, limit: u64) -> String {
    format!("augur_solve(({}), {}, {}).", body(goal), limit, LIMIT_VAR)
}

/// Query that retracts every variant of `clause`
pub(crate) fn retract_query(clause: &str) -> String {
    format!("augur_retract(({}), {}).", body(clause), COUNT_VAR)
}

/// Quote text as a Prolog atom
fn quoted(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_strips_full_stop() {
        assert_eq!(body("admin(xyz). "), "admin(xyz)");
        assert_eq!(body("admin(xyz)"), "admin(xyz)");
    }

    #[test]
    fn test_solve_query_wraps_goal() {
        assert_eq!(
            solve_query("collab(C).", 100),
            "augur_solve((collab(C)), 100, Augur_Limit)."
        );
    }

    #[test]
    fn test_load_query_quotes_path() {
        assert_eq!(load_query("/tmp/it's.pl"), "augur_load('/tmp/it\\'s.pl').");
    }
}

//! Command tests against real fact and rule files

use augur_cli::cli::{CheckArgs, EvalArgs, FactArgs, SolveArgs};
use augur_cli::commands;
use augur_cli::config::OutputFormat;
use augur_cli::Formatter;
use augur_gatekeeper::{Decision, PermissionProvider};
use std::fs;
use tempfile::TempDir;

fn setup(facts: &str, rules: &str) -> (TempDir, PermissionProvider) {
    let dir = TempDir::new().unwrap();
    let facts_path = dir.path().join("facts.pl");
    let rules_path = dir.path().join("rules.pl");
    fs::write(&facts_path, facts).unwrap();
    fs::write(&rules_path, rules).unwrap();

    let provider = PermissionProvider::new(facts_path, rules_path);
    provider.fetch().unwrap();
    (dir, provider)
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[test]
fn test_check_allows_and_denies() {
    let (_dir, provider) = setup(
        "isUser(alice).\nisUser(bob).\n",
        "authorised(User,_,_,_):-isUser(User).\n",
    );

    let bob = CheckArgs {
        user: Some("bob".to_string()),
        ..Default::default()
    };
    assert_eq!(commands::execute_check(bob, &provider, &quiet()).unwrap(), Decision::Allow);

    let carol = CheckArgs {
        user: Some("carol".to_string()),
        ..Default::default()
    };
    assert_eq!(commands::execute_check(carol, &provider, &quiet()).unwrap(), Decision::Deny);
}

#[test]
fn test_check_with_bad_term_denies() {
    let (_dir, provider) = setup("isUser(bob).\n", "authorised(User,_,_,_):-isUser(User).\n");

    let args = CheckArgs {
        user: Some("bob) ; true".to_string()),
        ..Default::default()
    };
    assert_eq!(commands::execute_check(args, &provider, &quiet()).unwrap(), Decision::Deny);
}

#[test]
fn test_eval_and_solve() {
    let (_dir, provider) = setup("collab(afi).\ncollab(lma).\n", "");

    let eval = EvalArgs {
        predicate: "collab".to_string(),
        args: vec!["-".to_string()],
    };
    assert!(commands::execute_eval(eval, &provider, &quiet()).unwrap());

    let solve = SolveArgs {
        goal: "collab(Collab)".to_string(),
        predicate: Some("collab".to_string()),
    };
    assert_eq!(commands::execute_solve(solve, &provider, &quiet()).unwrap(), 2);
}

#[test]
fn test_add_and_remove_fact() {
    let (dir, provider) = setup("", "");
    let facts_path = dir.path().join("facts.pl");

    commands::execute_add_fact(
        FactArgs {
            fact: "admin(xyz).".to_string(),
        },
        &provider,
        &quiet(),
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&facts_path).unwrap(), "admin(xyz).\n");

    commands::execute_remove_fact(
        FactArgs {
            fact: "admin(xyz).".to_string(),
        },
        &provider,
        &quiet(),
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&facts_path).unwrap(), "");
}

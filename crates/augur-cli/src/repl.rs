//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{CheckArgs, Command, EvalArgs, FactArgs, ProfileAction, ProfileArgs, SolveArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use augur_gatekeeper::PermissionProvider;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Augur REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut provider = open_provider(config, formatter);

    loop {
        let prompt = format!("augur [{}]> ", config.active_profile);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Fetch) => match provider.fetch() {
                        Ok(count) => println!(
                            "{}",
                            formatter.success(&format!("Loaded {} fact(s)", count))
                        ),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, &mut provider, config, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Provider for the active profile, loaded if its files are readable.
fn open_provider(config: &Config, formatter: &Formatter) -> PermissionProvider {
    let profile = config
        .get_active_profile()
        .cloned()
        .unwrap_or_else(|_| augur_gatekeeper::ProviderConfig::new("facts.pl", "rules.pl"));

    let provider = PermissionProvider::with_config(profile);
    match provider.fetch() {
        Ok(count) => println!("{}", formatter.info(&format!("Loaded {} fact(s)", count))),
        Err(e) => eprintln!("{}", formatter.warning(&format!("{} (use 'fetch' to retry)", e))),
    }
    provider
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Fetch,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    if let Some(goal) = line.strip_prefix("?-") {
        return solve_command(goal.trim());
    }

    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    // everything after the command word, spacing kept
    let rest = line[parts[0].len()..].trim();

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "fetch" | "reload" => Ok(ReplCommand::Fetch),
        "facts" => Ok(ReplCommand::Command(Command::Facts)),
        "solve" => solve_command(rest),
        "check" => parse_check_command(&parts[1..]),
        "eval" => parse_eval_command(&parts[1..]),
        "add-fact" | "remove-fact" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput(format!("Usage: {} <fact>", parts[0])));
            }
            let args = FactArgs {
                fact: rest.to_string(),
            };
            Ok(ReplCommand::Command(if parts[0] == "add-fact" {
                Command::AddFact(args)
            } else {
                Command::RemoveFact(args)
            }))
        }
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn solve_command(goal: &str) -> Result<ReplCommand> {
    if goal.is_empty() {
        return Err(CliError::InvalidInput("Usage: ?- <goal>.".to_string()));
    }
    Ok(ReplCommand::Command(Command::Solve(SolveArgs {
        goal: goal.to_string(),
        predicate: None,
    })))
}

fn parse_check_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: check <user> [entity] [target] [access] [extra...]".to_string(),
        ));
    }

    let field = |i: usize| {
        args.get(i)
            .filter(|value| **value != crate::cli::CLI_WILDCARD)
            .map(|value| value.to_string())
    };

    Ok(ReplCommand::Command(Command::Check(CheckArgs {
        user: field(0),
        entity: field(1),
        target: field(2),
        access: field(3),
        extra: args.iter().skip(4).map(|s| s.to_string()).collect(),
    })))
}

fn parse_eval_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: eval <predicate> [arg...]".to_string()));
    }

    Ok(ReplCommand::Command(Command::Eval(EvalArgs {
        predicate: args[0].to_string(),
        args: args[1..].iter().map(|s| s.to_string()).collect(),
    })))
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Command(Command::Profile(ProfileArgs {
            action: ProfileAction::Show,
        })));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Command(Command::Profile(ProfileArgs { action })))
}

/// Execute a REPL command.
fn execute_repl_command(
    cmd: Command,
    provider: &mut PermissionProvider,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        Command::Check(args) => {
            commands::execute_check(args, provider, formatter)?;
        }
        Command::Eval(args) => {
            commands::execute_eval(args, provider, formatter)?;
        }
        Command::Solve(args) => {
            commands::execute_solve(args, provider, formatter)?;
        }
        Command::AddFact(args) => commands::execute_add_fact(args, provider, formatter)?,
        Command::RemoveFact(args) => commands::execute_remove_fact(args, provider, formatter)?,
        Command::Facts => commands::execute_facts(provider, formatter)?,
        Command::Profile(args) => {
            let switching = matches!(args.action, ProfileAction::Switch { .. });
            commands::execute_profile(args, config, formatter)?;
            if switching {
                debug!(profile = %config.active_profile, "Reopening provider");
                *provider = open_provider(config, formatter);
            }
        }
        Command::Repl => {
            println!("{}", formatter.info("Already in the REPL"));
        }
    }

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let augur_dir = Config::home_dir()?;
    std::fs::create_dir_all(&augur_dir)?;
    Ok(augur_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  ?- <goal>.                     - List every solution of a goal");
    println!("  solve <goal>                   - Same as ?-");
    println!("  check <user> [e] [t] [a] [x..] - Ask the authorization rule (- = any)");
    println!("  eval <predicate> [arg...]      - Does the predicate hold? (- = any)");
    println!("  add-fact <fact>                - Append a fact, e.g. admin(xyz).");
    println!("  remove-fact <fact>             - Remove every copy of a fact");
    println!("  facts                          - List loaded facts");
    println!("  fetch, reload                  - Reload facts and rules from disk");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_prefix() {
        match parse_repl_command("?- collab(Collab).").unwrap() {
            ReplCommand::Command(Command::Solve(args)) => assert_eq!(args.goal, "collab(Collab)."),
            other => panic!("Expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn test_check_with_wildcards() {
        match parse_repl_command("check bob - doc read").unwrap() {
            ReplCommand::Command(Command::Check(args)) => {
                assert_eq!(args.user.as_deref(), Some("bob"));
                assert!(args.entity.is_none());
                assert_eq!(args.target.as_deref(), Some("doc"));
                assert_eq!(args.access.as_deref(), Some("read"));
                assert!(args.extra.is_empty());
            }
            other => panic!("Expected Check, got {:?}", other),
        }
    }

    #[test]
    fn test_fact_keeps_inner_spacing() {
        match parse_repl_command("add-fact   grant(bob, doc).").unwrap() {
            ReplCommand::Command(Command::AddFact(args)) => assert_eq!(args.fact, "grant(bob, doc)."),
            other => panic!("Expected AddFact, got {:?}", other),
        }
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse_repl_command("?-").is_err());
        assert!(parse_repl_command("check").is_err());
        assert!(parse_repl_command("remove-fact").is_err());
        assert!(parse_repl_command("frobnicate").is_err());
    }

    #[test]
    fn test_control_words() {
        assert!(matches!(parse_repl_command("quit"), Ok(ReplCommand::Exit)));
        assert!(matches!(parse_repl_command("reload"), Ok(ReplCommand::Fetch)));
        assert!(matches!(
            parse_repl_command("profile"),
            Ok(ReplCommand::Command(Command::Profile(_)))
        ));
    }
}

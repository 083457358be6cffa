//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Placeholder accepted on the command line for an unbound argument.
pub const CLI_WILDCARD: &str = "-";

/// Augur CLI - Ask and manage rule-based permissions.
#[derive(Debug, Parser)]
#[command(name = "augur")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AUGUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare answers)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether a user is authorised
    Check(CheckArgs),

    /// Evaluate a predicate with positional arguments
    Eval(EvalArgs),

    /// List every solution of a goal
    Solve(SolveArgs),

    /// Append a fact to the fact file
    AddFact(FactArgs),

    /// Remove a fact from the fact file
    RemoveFact(FactArgs),

    /// List the facts in the fact file
    Facts,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the check command.
#[derive(Debug, Default, Parser)]
pub struct CheckArgs {
    /// User asking for access
    #[arg(short, long)]
    pub user: Option<String>,

    /// Entity (resource type)
    #[arg(short, long)]
    pub entity: Option<String>,

    /// Target within the entity
    #[arg(short, long)]
    pub target: Option<String>,

    /// Access kind (create, read, update, delete, ...)
    #[arg(short, long)]
    pub access: Option<String>,

    /// Extra trailing arguments, in order; "-" leaves one unbound
    #[arg(short = 'x', long = "extra")]
    pub extra: Vec<String>,
}

/// Arguments for the eval command.
#[derive(Debug, Parser)]
pub struct EvalArgs {
    /// Predicate name
    pub predicate: String,

    /// Arguments in order; "-" leaves one unbound
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the solve command.
#[derive(Debug, Parser)]
pub struct SolveArgs {
    /// Goal text, e.g. "collab(Collab)"
    pub goal: String,

    /// Require the goal to call this predicate first
    #[arg(long)]
    pub predicate: Option<String>,
}

/// Arguments for add-fact and remove-fact.
#[derive(Debug, Parser)]
pub struct FactArgs {
    /// Fact text, e.g. "admin(xyz)."
    pub fact: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Fact file
        #[arg(long)]
        facts: PathBuf,
        /// Rule file
        #[arg(long)]
        rules: PathBuf,
        /// Authorization predicate name
        #[arg(long)]
        rule_name: Option<String>,
        /// Authorization predicate arity
        #[arg(long)]
        rule_arity: Option<usize>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// Map the command-line placeholder to an unbound argument.
pub fn cli_arg(value: &str) -> Option<&str> {
    if value == CLI_WILDCARD {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["augur"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from([
            "augur", "check", "--user", "bob", "--access", "read", "-x", "eu", "-x", "-",
        ]);
        match cli.command {
            Some(Command::Check(args)) => {
                assert_eq!(args.user.as_deref(), Some("bob"));
                assert!(args.entity.is_none());
                assert_eq!(args.extra, vec!["eu", "-"]);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_eval_with_wildcards() {
        let cli = Cli::parse_from(["augur", "eval", "authorised", "bob", "-", "-", "read"]);
        match cli.command {
            Some(Command::Eval(args)) => {
                assert_eq!(args.predicate, "authorised");
                let parsed: Vec<Option<&str>> = args.args.iter().map(|a| cli_arg(a)).collect();
                assert_eq!(parsed, vec![Some("bob"), None, None, Some("read")]);
            }
            _ => panic!("Expected Eval command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["augur", "facts", "--format", "json", "-vv"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Facts)));
    }
}

//! Augur CLI - Command-line front end for the Augur permission provider.

use augur_cli::commands;
use augur_cli::repl;
use augur_cli::{Cli, Command, Config, Formatter};
use augur_gatekeeper::PermissionProvider;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Exit status for a negative answer from `check` or `eval`.
const EXIT_DENIED: i32 = 2;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_DENIED),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8, default_level: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("AUGUR_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug,rustyline=warn"),
        _ => EnvFilter::new("trace,rustyline=warn"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `false` when the command answered in the negative.
fn run() -> augur_cli::Result<bool> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    init_tracing(cli.verbose, &config.settings.log_level);

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter)?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(cmd) => {
            let provider = PermissionProvider::with_config(config.get_active_profile()?.clone());
            return execute(cmd, &provider, &formatter);
        }
    }

    Ok(true)
}

/// Run a command against the active profile's provider.
///
/// Fact mutations only need the file; everything else needs a session.
fn execute(cmd: Command, provider: &PermissionProvider, formatter: &Formatter) -> augur_cli::Result<bool> {
    match cmd {
        Command::AddFact(args) => commands::execute_add_fact(args, provider, formatter).map(|_| true),
        Command::RemoveFact(args) => {
            commands::execute_remove_fact(args, provider, formatter).map(|_| true)
        }
        Command::Check(args) => {
            provider.fetch()?;
            Ok(commands::execute_check(args, provider, formatter)?.is_allowed())
        }
        Command::Eval(args) => {
            provider.fetch()?;
            commands::execute_eval(args, provider, formatter)
        }
        Command::Solve(args) => {
            provider.fetch()?;
            commands::execute_solve(args, provider, formatter).map(|_| true)
        }
        Command::Facts => {
            provider.fetch()?;
            commands::execute_facts(provider, formatter).map(|_| true)
        }
        Command::Profile(_) | Command::Repl => Ok(true),
    }
}

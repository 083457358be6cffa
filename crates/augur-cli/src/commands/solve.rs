//! Solve command implementation.

use crate::cli::SolveArgs;
use crate::error::Result;
use crate::output::Formatter;
use augur_gatekeeper::PermissionProvider;

/// Execute the solve command.
pub fn execute_solve(
    args: SolveArgs,
    provider: &PermissionProvider,
    formatter: &Formatter,
) -> Result<usize> {
    let solutions = provider.get_all_solutions(args.predicate.as_deref(), &args.goal)?;

    println!("{}", formatter.format_solutions(&solutions)?);
    Ok(solutions.len())
}

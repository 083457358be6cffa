//! Eval command implementation.

use crate::cli::{cli_arg, EvalArgs};
use crate::error::Result;
use crate::output::Formatter;
use augur_gatekeeper::PermissionProvider;

/// Execute the eval command.
pub fn execute_eval(
    args: EvalArgs,
    provider: &PermissionProvider,
    formatter: &Formatter,
) -> Result<bool> {
    let values: Vec<Option<&str>> = args.args.iter().map(|a| cli_arg(a)).collect();
    let answer = provider.eval(&args.predicate, &values)?;

    println!("{}", formatter.format_answer(answer)?);
    Ok(answer)
}

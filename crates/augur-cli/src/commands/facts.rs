//! Fact management commands.

use crate::cli::FactArgs;
use crate::error::Result;
use crate::output::Formatter;
use augur_gatekeeper::PermissionProvider;

/// Execute the add-fact command.
pub fn execute_add_fact(
    args: FactArgs,
    provider: &PermissionProvider,
    formatter: &Formatter,
) -> Result<()> {
    if provider.add_fact(&args.fact)? {
        println!("{}", formatter.success(&format!("Added {}", args.fact.trim())));
    } else {
        println!(
            "{}",
            formatter.warning(&format!("{} is already present", args.fact.trim()))
        );
    }
    Ok(())
}

/// Execute the remove-fact command.
pub fn execute_remove_fact(
    args: FactArgs,
    provider: &PermissionProvider,
    formatter: &Formatter,
) -> Result<()> {
    let removed = provider.remove_fact(&args.fact)?;
    if removed > 0 {
        println!(
            "{}",
            formatter.success(&format!("Removed {} line(s) of {}", removed, args.fact.trim()))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("{} was not present", args.fact.trim()))
        );
    }
    Ok(())
}

/// Execute the facts command.
///
/// Lists the facts read by the last fetch plus later mutations.
pub fn execute_facts(provider: &PermissionProvider, formatter: &Formatter) -> Result<()> {
    let facts = provider.facts()?;
    println!("{}", formatter.format_facts(&facts)?);
    Ok(())
}

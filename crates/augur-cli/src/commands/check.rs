//! Check command implementation.

use crate::cli::{cli_arg, CheckArgs};
use crate::error::Result;
use crate::output::Formatter;
use augur_domain::PermissionRequest;
use augur_gatekeeper::{Decision, PermissionProvider, RequestTranslator};

/// Execute the check command.
///
/// Evaluation errors are reported and then count as a denial.
pub fn execute_check(
    args: CheckArgs,
    provider: &PermissionProvider,
    formatter: &Formatter,
) -> Result<Decision> {
    let request = build_request(&args);
    let goal = match RequestTranslator::new(provider.config().schema()).translate(&request) {
        Ok(goal) => goal.to_string(),
        Err(e) => {
            eprintln!("{}", formatter.error(&e.to_string()));
            String::new()
        }
    };

    let decision = provider.decide(&request);
    println!("{}", formatter.format_decision(&goal, decision)?);

    Ok(decision)
}

/// Build the permission request described by the arguments.
pub fn build_request(args: &CheckArgs) -> PermissionRequest {
    let mut request = PermissionRequest {
        user: args.user.clone(),
        entity: args.entity.clone(),
        target: args.target.clone(),
        access: args.access.clone(),
        extra: Vec::new(),
    };
    for extra in &args.extra {
        request = request.with_extra(cli_arg(extra));
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request() {
        let args = CheckArgs {
            user: Some("bob".to_string()),
            access: Some("read".to_string()),
            extra: vec!["eu".to_string(), "-".to_string()],
            ..Default::default()
        };

        let request = build_request(&args);
        assert_eq!(
            request.arguments(),
            vec![Some("bob"), None, None, Some("read"), Some("eu"), None]
        );
    }
}

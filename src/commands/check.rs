use super::Host;
use super::common::{CommonArgs, format_verdict, report_policy_problems};
use crate::Result;
use crate::expression::parse_expression;
use crate::policy::{ConflictSeverity, UsagePolicy};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// License expressions to check, such as "MIT OR Apache-2.0"
    #[arg(value_name = "EXPRESSION", required = true)]
    pub expressions: Vec<String>,

    /// Exit with status 1 if any expression resolves to deny
    #[arg(long)]
    pub error_if_denied: bool,
}

/// Resolve each expression against the policy database and print its verdict
#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn check_expressions<H: Host>(host: &mut H, common: &CommonArgs, args: &CheckArgs) -> Result<()> {
    let cell = common.policy_cell(ConflictSeverity::Warn);
    let db = cell.database();

    if let Some(e) = cell.load_error() {
        let _ = writeln!(host.error(), "⚠️  Unable to load license policies, every expression resolves as undefined: {e}");
    }

    report_policy_problems(host, &db);

    let use_colors = common.color.use_colors();
    let mut denied = 0;

    for expression in &args.expressions {
        let parsed = parse_expression(&db, expression);
        let verdict = parsed.verdict();

        let _ = write!(host.output(), "{}  {expression}", format_verdict(verdict, use_colors));
        if let Some(e) = parsed.error() {
            let _ = write!(host.output(), "  ({e})");
        }
        let _ = writeln!(host.output());

        if verdict == UsagePolicy::Deny {
            denied += 1;
        }
    }

    if args.error_if_denied && denied > 0 {
        let _ = writeln!(host.error(), "❌ {denied} of {} expressions resolved to deny", args.expressions.len());
        host.exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::commands::host::TestHost;
    use crate::run;

    #[test]
    fn test_check_prints_verdicts() {
        let mut host = TestHost::new();
        run(
            &mut host,
            ["license-policy", "--color", "never", "check", "MIT OR GPL-3.0-only", "MPL-2.0 AND Zlib"],
        )
        .unwrap();

        let output = host.output_str();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "allow         MIT OR GPL-3.0-only");
        assert_eq!(lines[1], "needs-review  MPL-2.0 AND Zlib");
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_check_reports_parse_errors() {
        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "--color", "never", "check", "MIT"]).unwrap();

        let output = host.output_str();
        assert!(output.starts_with("undefined"), "got: {output}");
        assert!(output.contains("missing conjunction"), "got: {output}");
    }

    #[test]
    fn test_check_error_if_denied() {
        let mut host = TestHost::new();
        run(
            &mut host,
            ["license-policy", "--color", "never", "check", "--error-if-denied", "MIT AND GPL-2.0-only"],
        )
        .unwrap();

        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().contains("1 of 1 expressions resolved to deny"));
    }

    #[test]
    fn test_check_denied_without_flag_does_not_exit() {
        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "--color", "never", "check", "MIT AND GPL-2.0-only"]).unwrap();

        assert!(host.output_str().starts_with("deny"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_check_with_missing_policy_file_fails_open() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.json");
        let missing = missing.to_str().unwrap();

        let mut host = TestHost::new();
        run(
            &mut host,
            ["license-policy", "--color", "never", "--policies", missing, "check", "MIT OR Apache-2.0"],
        )
        .unwrap();

        assert!(host.output_str().starts_with("undefined"));
        assert!(host.error_str().contains("Unable to load license policies"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_check_reports_policy_problems() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("policies.json");
        std::fs::write(
            &path,
            r#"{"policies": [
                {"id": "Good", "family": "Shared", "usagePolicy": "allow"},
                {"id": "Bad", "family": "Shared", "usagePolicy": "deny"},
                {"id": "Broken id", "family": "Broken", "usagePolicy": "allow"}
            ]}"#,
        )
        .unwrap();
        let path = path.to_str().unwrap();

        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "--color", "never", "--policies", path, "check", "Good OR Bad"]).unwrap();

        assert!(host.output_str().starts_with("allow"));

        let errors = host.error_str();
        assert!(errors.contains("Skipped records"), "got: {errors}");
        assert!(errors.contains("Broken id"), "got: {errors}");
        assert!(errors.contains("Family conflicts"), "got: {errors}");
    }

    #[test]
    fn test_check_builtin_policies_report_nothing() {
        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "--color", "never", "check", "MIT OR Zlib"]).unwrap();

        assert!(host.error_str().is_empty());
    }
}

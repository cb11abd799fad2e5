use super::Host;
use super::common::{CommonArgs, report_policy_problems};
use crate::Result;
use crate::policy::spdx_check::cross_check;
use crate::policy::{ConflictSeverity, PolicyConfig, PolicyDatabase};
use camino::Utf8Path;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Fail when records of one family disagree on their usage policy
    #[arg(long)]
    pub strict: bool,
}

/// Loads a policy file and builds the database from it
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, or on a family conflict when `strict` is set
fn validate_policies_inner(policies: Option<&Utf8Path>, strict: bool) -> Result<PolicyDatabase> {
    let config = PolicyConfig::load(policies)?;
    let severity = if strict { ConflictSeverity::Error } else { ConflictSeverity::Warn };
    PolicyDatabase::from_config(&config, severity)
}

pub fn validate_policies<H: Host>(host: &mut H, common: &CommonArgs, args: &ValidateArgs) -> Result<()> {
    let policies = common.policies.as_deref();

    let db = match validate_policies_inner(policies, args.strict) {
        Ok(db) => db,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Policy validation failed: {e}");
            host.exit(1);
            return Err(e);
        }
    };

    {
        let mut out = host.output();
        let _ = writeln!(out, "Policy file is valid");
        if let Some(path) = policies {
            let _ = writeln!(out, "Policy file: {path}");
        } else {
            let _ = writeln!(out, "Using the built-in policies");
        }
        let _ = writeln!(out, "{} records in {} families", db.len(), db.families().len());
    }

    report_policy_problems(host, &db);

    let findings = cross_check(db.records());
    if !findings.is_empty() {
        let mut err = host.error();
        let _ = writeln!(err, "\n⚠️  Differences from the SPDX license list:");
        for finding in &findings {
            let _ = writeln!(err, "   {finding}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::commands::host::TestHost;
    use crate::run;
    use camino::Utf8PathBuf;
    use std::fs;

    fn write_policies(dir: &tempfile::TempDir, json: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("policies.json")).unwrap();
        fs::write(&path, json).unwrap();
        path
    }

    const CONFLICTING: &str = r#"{
        "policies": [
            {"id": "Good", "family": "Shared", "usagePolicy": "allow"},
            {"id": "Bad", "family": "Shared", "usagePolicy": "deny"},
            {"id": "Broken id", "family": "Broken", "usagePolicy": "allow"}
        ]
    }"#;

    #[test]
    fn test_builtin_policies_are_valid() {
        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "validate", "--strict"]).unwrap();

        let output = host.output_str();
        assert!(output.contains("Policy file is valid"));
        assert!(output.contains("Using the built-in policies"));
        assert!(!host.error_str().contains("Family conflicts"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_conflicts_and_skipped_records_are_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_policies(&tmp, CONFLICTING);

        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "--policies", path.as_str(), "validate"]).unwrap();

        let output = host.output_str();
        assert!(output.contains("2 records in 1 families"), "got: {output}");

        let errors = host.error_str();
        assert!(errors.contains("Skipped records"));
        assert!(errors.contains("Broken id"));
        assert!(errors.contains("Family conflicts"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_strict_fails_on_conflict() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_policies(&tmp, CONFLICTING);

        let mut host = TestHost::new();
        let result = run(&mut host, ["license-policy", "--policies", path.as_str(), "validate", "--strict"]);

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().contains("Policy validation failed"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_malformed_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_policies(&tmp, "{\"policies\": [");

        let mut host = TestHost::new();
        let result = run(&mut host, ["license-policy", "--policies", path.as_str(), "validate"]);

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_spdx_differences_are_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_policies(
            &tmp,
            r#"{"policies": [{"id": "Made-Up-License", "family": "MadeUp", "usagePolicy": "allow"}]}"#,
        );

        let mut host = TestHost::new();
        run(&mut host, ["license-policy", "--policies", path.as_str(), "validate"]).unwrap();

        let errors = host.error_str();
        assert!(errors.contains("Differences from the SPDX license list"));
        assert!(errors.contains("'Made-Up-License' is not on the SPDX license list"));
    }
}

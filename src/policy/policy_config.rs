use super::PolicyEntry;
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

/// The default policy file, embedded from `default_policies.json`
pub const DEFAULT_POLICIES_JSON: &str = include_str!("../../default_policies.json");

const LOG_TARGET: &str = "    policy";

/// The contents of a policy configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Policy entries in file order
    #[serde(default)]
    pub policies: Vec<PolicyEntry>,

    /// Annotation text keyed by the names used in `annotationRefs`
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl PolicyConfig {
    /// Load a policy file, or the embedded default when no path is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid policy document
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!(target: LOG_TARGET, "Using the embedded default policies");
            return Self::embedded();
        };

        log::info!(target: LOG_TARGET, "Loading policies from '{path}'");
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading policy file '{path}'"))?;
        Self::from_json(&text).into_app_err_with(|| format!("parsing policy file '{path}'"))
    }

    /// Parse the embedded default policies
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document is malformed
    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_POLICIES_JSON).into_app_err("parsing the embedded default policies")
    }

    /// Parse a policy document from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or does not have the policy document shape
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).into_app_err("deserializing policy document")?;
        log::debug!(
            target: LOG_TARGET,
            "Read {} policy entries and {} annotations",
            config.policies.len(),
            config.annotations.len()
        );
        Ok(config)
    }

    /// Write the embedded default policies to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_POLICIES_JSON).into_app_err_with(|| format!("writing default policies to {output_path}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_embedded_policies_parse() {
        let config = PolicyConfig::embedded().unwrap();
        assert!(!config.policies.is_empty());
        assert!(!config.annotations.is_empty());
    }

    #[test]
    fn test_load_without_path_uses_embedded() {
        let config = PolicyConfig::load(None).unwrap();
        assert_eq!(config.policies.len(), PolicyConfig::embedded().unwrap().policies.len());
    }

    #[test]
    fn test_from_json_keeps_unknown_usage_values() {
        let config = PolicyConfig::from_json(r#"{"policies": [{"id": "MIT", "family": "MIT", "usagePolicy": "sometimes"}]}"#).unwrap();
        assert_eq!(config.policies.len(), 1);
        assert_eq!(config.policies[0].usage_policy, "sometimes");
        assert!(config.annotations.is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let _ = PolicyConfig::from_json("{\"policies\": [").unwrap_err();
        let _ = PolicyConfig::from_json(r#"{"policies": {"id": "MIT"}}"#).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing.json")).unwrap();
        let _ = PolicyConfig::load(Some(&path)).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("policies.json")).unwrap();
        PolicyConfig::save_default(&path).unwrap();

        let loaded = PolicyConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.policies, PolicyConfig::embedded().unwrap().policies);
    }
}

use super::{ConflictSeverity, PolicyConfig, PolicyDatabase};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::{Arc, OnceLock};

const LOG_TARGET: &str = "    policy";

/// Builds the policy database on first use and hands out the same shared handle afterwards.
///
/// A failure to load or build never propagates: the cell logs a warning, remembers the error
/// and installs an empty database so that every lookup resolves to `Undefined`.
#[derive(Debug)]
pub struct PolicyCell {
    source: Option<Utf8PathBuf>,
    severity: ConflictSeverity,
    database: OnceLock<Arc<PolicyDatabase>>,
    load_error: OnceLock<String>,
}

impl PolicyCell {
    /// Create a cell that will load `source`, or the embedded default policies when `None`
    #[must_use]
    pub const fn new(source: Option<Utf8PathBuf>) -> Self {
        Self {
            source,
            severity: ConflictSeverity::Warn,
            database: OnceLock::new(),
            load_error: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: ConflictSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the shared database, building it if this is the first call
    #[must_use]
    pub fn database(&self) -> Arc<PolicyDatabase> {
        Arc::clone(self.database.get_or_init(|| self.initialize()))
    }

    fn initialize(&self) -> Arc<PolicyDatabase> {
        let built = PolicyConfig::load(self.source.as_deref()).and_then(|config| PolicyDatabase::from_config(&config, self.severity));

        match built {
            Ok(db) => Arc::new(db),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Unable to load license policies, all licenses will resolve as undefined: {e:#}");
                let _ = self.load_error.set(format!("{e:#}"));
                Arc::new(PolicyDatabase::default())
            }
        }
    }

    #[must_use]
    pub fn source(&self) -> Option<&Utf8Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.database.get().is_some()
    }

    /// The reason the database is empty, if loading failed
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.get().map(String::as_str)
    }
}

impl Default for PolicyCell {
    fn default() -> Self {
        Self::new(None)
    }
}

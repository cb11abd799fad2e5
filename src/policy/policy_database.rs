//! Indexed, read-only view over a set of policy records

use super::{InvalidRecord, PolicyConfig, PolicyEntry, PolicyRecord, UsagePolicy, keywords, policy_record};
use crate::Result;
use core::fmt::{Display, Formatter, Result as FmtResult};
use ohno::app_err;
use std::collections::HashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "    policy";

/// The outcome of a lookup: the resolved policy and the record that produced it, if any.
pub type Resolution = (UsagePolicy, Option<Arc<PolicyRecord>>);

/// Two records of the same family that disagree on their usage policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyConflict {
    pub family: String,
    pub existing_id: String,
    pub existing_policy: UsagePolicy,
    pub conflicting_id: String,
    pub conflicting_policy: UsagePolicy,
}

impl Display for FamilyConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "family '{}' has conflicting usage policies: '{}' is {} but '{}' is {}",
            self.family,
            display_id(&self.existing_id),
            self.existing_policy,
            display_id(&self.conflicting_id),
            self.conflicting_policy
        )
    }
}

/// A policy entry that was left out of the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: String,
    pub family: String,
    pub reason: InvalidRecord,
}

impl Display for SkippedRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "skipped policy '{}' (family '{}'): {}", display_id(&self.id), self.family, self.reason)
    }
}

/// How a family conflict affects building the database.
///
/// This is the only place that decides whether a conflict is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictSeverity {
    /// Log the conflict and keep both records
    #[default]
    Warn,

    /// Abort the build
    Error,
}

impl ConflictSeverity {
    fn handle(self, conflict: &FamilyConflict) -> Result<()> {
        match self {
            Self::Warn => {
                log::warn!(target: LOG_TARGET, "{conflict}");
                Ok(())
            }
            Self::Error => Err(app_err!("{conflict}")),
        }
    }
}

/// Policy records indexed by SPDX identifier, alias and family.
///
/// Built once and never mutated afterwards; lookups only read.
#[derive(Debug, Default)]
pub struct PolicyDatabase {
    records: Vec<Arc<PolicyRecord>>,
    by_id: HashMap<String, Vec<Arc<PolicyRecord>>>,
    by_alias: HashMap<String, Vec<Arc<PolicyRecord>>>,
    by_family: HashMap<String, Vec<Arc<PolicyRecord>>>,
    family_order: Vec<String>,
    annotations: HashMap<String, String>,
    conflicts: Vec<FamilyConflict>,
    skipped: Vec<SkippedRecord>,
}

impl PolicyDatabase {
    /// Build a database from policy entries, warning about family conflicts
    #[must_use]
    pub fn build(entries: &[PolicyEntry]) -> Self {
        let mut db = Self::default();
        for entry in entries {
            // Warn never fails
            let _ = db.ingest(entry, ConflictSeverity::Warn);
        }

        db
    }

    /// Build a database from policy entries, treating family conflicts as `severity` dictates
    ///
    /// # Errors
    ///
    /// Returns an error on the first family conflict when `severity` is [`ConflictSeverity::Error`]
    pub fn build_with_severity(entries: &[PolicyEntry], severity: ConflictSeverity) -> Result<Self> {
        let mut db = Self::default();
        for entry in entries {
            db.ingest(entry, severity)?;
        }

        Ok(db)
    }

    /// Build a database from a loaded policy file, including its annotations
    ///
    /// # Errors
    ///
    /// Returns an error on the first family conflict when `severity` is [`ConflictSeverity::Error`]
    pub fn from_config(config: &PolicyConfig, severity: ConflictSeverity) -> Result<Self> {
        let mut db = Self::build_with_severity(&config.policies, severity)?;
        db.annotations.clone_from(&config.annotations);

        log::info!(
            target: LOG_TARGET,
            "Built policy database with {} records in {} families ({} skipped, {} conflicts)",
            db.records.len(),
            db.family_order.len(),
            db.skipped.len(),
            db.conflicts.len()
        );

        Ok(db)
    }

    fn ingest(&mut self, entry: &PolicyEntry, severity: ConflictSeverity) -> Result<()> {
        let record = match PolicyRecord::try_from(entry) {
            Ok(record) => record,
            Err(reason) => {
                self.skip(&entry.id, &entry.family, reason);
                return Ok(());
            }
        };

        let children: Vec<PolicyRecord> = record.children().iter().map(|child_id| record.child(child_id.as_str())).collect();
        self.insert(record, severity)?;

        for child in children {
            if policy_record::is_spdx_id(child.id()) {
                log::trace!(target: LOG_TARGET, "Expanding child '{}' of family '{}'", child.id(), child.family());
                self.insert(child, severity)?;
            } else {
                let reason = InvalidRecord::MalformedId(child.id().to_string());
                self.skip(child.id(), child.family(), reason);
            }
        }

        Ok(())
    }

    fn skip(&mut self, id: &str, family: &str, reason: InvalidRecord) {
        let skipped = SkippedRecord {
            id: id.to_string(),
            family: family.to_string(),
            reason,
        };

        log::warn!(target: LOG_TARGET, "{skipped}");
        self.skipped.push(skipped);
    }

    fn insert(&mut self, record: PolicyRecord, severity: ConflictSeverity) -> Result<()> {
        let record = Arc::new(record);

        if !record.id().is_empty() {
            self.by_id.entry(record.id().to_string()).or_default().push(Arc::clone(&record));
        }

        for alias in record.aliases() {
            self.by_alias.entry(alias.clone()).or_default().push(Arc::clone(&record));
        }

        let conflict = self
            .by_family
            .get(record.family())
            .and_then(|members| members.iter().find(|member| member.usage_policy() != record.usage_policy()))
            .map(|existing| FamilyConflict {
                family: record.family().to_string(),
                existing_id: existing.id().to_string(),
                existing_policy: existing.usage_policy(),
                conflicting_id: record.id().to_string(),
                conflicting_policy: record.usage_policy(),
            });

        if let Some(conflict) = conflict {
            severity.handle(&conflict)?;
            self.conflicts.push(conflict);
        }

        if !self.by_family.contains_key(record.family()) {
            self.family_order.push(record.family().to_string());
        }

        self.by_family.entry(record.family().to_string()).or_default().push(Arc::clone(&record));
        self.records.push(record);

        Ok(())
    }

    /// Look up the policy for an exact SPDX identifier
    ///
    /// The first record registered under `id` wins.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Resolution {
        if id.is_empty() {
            return (UsagePolicy::Undefined, None);
        }

        let resolution = first_match(self.by_id.get(id));
        log::debug!(target: LOG_TARGET, "Policy for id '{id}' resolved to {}", resolution.0);
        resolution
    }

    /// Look up the policy for a license name by the family it belongs to
    ///
    /// A name belongs to a family when it contains the family key, as in `BSD-3-Clause`
    /// containing `BSD`. When several keys match, the longest one wins so that `LGPL-2.1`
    /// resolves through `LGPL` rather than `GPL`. Names that look like expressions resolve
    /// to [`UsagePolicy::Undefined`] without a lookup.
    #[must_use]
    pub fn find_by_family(&self, name: &str) -> Resolution {
        if name.is_empty() {
            return (UsagePolicy::Undefined, None);
        }

        if keywords::contains_keyword(name) {
            log::debug!(target: LOG_TARGET, "Family name '{name}' contains an expression keyword, not resolving");
            return (UsagePolicy::Undefined, None);
        }

        let family = self
            .family_order
            .iter()
            .filter(|family| name.contains(family.as_str()))
            .fold(None::<&String>, |best, family| {
                if best.is_none_or(|best| family.len() > best.len()) {
                    Some(family)
                } else {
                    best
                }
            });

        let resolution = family.map_or((UsagePolicy::Undefined, None), |family| first_match(self.by_family.get(family)));
        log::debug!(target: LOG_TARGET, "Policy for family name '{name}' resolved to {}", resolution.0);
        resolution
    }

    /// Look up the policy for a license known by one of its aliases
    #[must_use]
    pub fn find_by_alias(&self, alias: &str) -> Resolution {
        if alias.is_empty() {
            return (UsagePolicy::Undefined, None);
        }

        first_match(self.by_alias.get(alias))
    }

    /// Look up the text behind an annotation reference
    #[must_use]
    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }

    /// All ingested records, children included, in ingestion order
    #[must_use]
    pub fn records(&self) -> &[Arc<PolicyRecord>] {
        &self.records
    }

    /// Family keys in the order they were first seen
    #[must_use]
    pub fn families(&self) -> &[String] {
        &self.family_order
    }

    #[must_use]
    pub fn family_members(&self, family: &str) -> &[Arc<PolicyRecord>] {
        self.by_family.get(family).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn conflicts(&self) -> &[FamilyConflict] {
        &self.conflicts
    }

    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn first_match(records: Option<&Vec<Arc<PolicyRecord>>>) -> Resolution {
    records
        .and_then(|records| records.first())
        .map_or((UsagePolicy::Undefined, None), |record| (record.usage_policy(), Some(Arc::clone(record))))
}

fn display_id(id: &str) -> &str {
    if id.is_empty() { "<family>" } else { id }
}

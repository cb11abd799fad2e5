//! Advisory comparison of policy records against the SPDX license list

use super::PolicyRecord;
use core::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// A disagreement between a policy record and the SPDX license list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpdxFinding {
    /// The identifier is not on the SPDX license list
    UnknownId { id: String },

    /// A flag recorded in the policy differs from the SPDX license list
    FlagMismatch {
        id: String,
        flag: &'static str,
        recorded: bool,
        listed: bool,
    },
}

impl Display for SpdxFinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnknownId { id } => write!(f, "'{id}' is not on the SPDX license list"),
            Self::FlagMismatch { id, flag, recorded, listed } => {
                write!(f, "'{id}' records {flag}={recorded} but the SPDX license list says {listed}")
            }
        }
    }
}

/// Compare every identified record with the SPDX license list
///
/// Family-only records are ignored. An identifier carrying the `+` suffix is checked as-is
/// first and then without the suffix.
#[must_use]
pub fn cross_check(records: &[Arc<PolicyRecord>]) -> Vec<SpdxFinding> {
    let mut findings = Vec::new();

    for record in records.iter().filter(|record| !record.id().is_empty()) {
        let id = record.id();
        let listed = spdx::license_id(id).or_else(|| id.strip_suffix('+').and_then(spdx::license_id));

        let Some(listed) = listed else {
            findings.push(SpdxFinding::UnknownId { id: id.to_string() });
            continue;
        };

        let flags = [
            ("osi", record.osi_approved(), listed.is_osi_approved()),
            ("fsf", record.fsf_libre(), listed.is_fsf_free_libre()),
            ("deprecated", record.deprecated(), listed.is_deprecated()),
        ];

        for (flag, recorded, listed) in flags {
            if recorded != listed {
                findings.push(SpdxFinding::FlagMismatch {
                    id: id.to_string(),
                    flag,
                    recorded,
                    listed,
                });
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PolicyDatabase, PolicyEntry};

    fn entry(id: &str, osi: bool, fsf: bool) -> PolicyEntry {
        PolicyEntry {
            id: id.to_string(),
            family: "Test".to_string(),
            usage_policy: "allow".to_string(),
            osi,
            fsf,
            ..PolicyEntry::default()
        }
    }

    #[test]
    fn test_matching_flags_produce_no_findings() {
        let db = PolicyDatabase::build(&[entry("MIT", true, true), entry("Apache-2.0", true, true)]);
        assert!(cross_check(db.records()).is_empty());
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let db = PolicyDatabase::build(&[entry("Not-A-Real-License-1.0", false, false)]);
        assert_eq!(
            cross_check(db.records()),
            vec![SpdxFinding::UnknownId {
                id: "Not-A-Real-License-1.0".to_string()
            }]
        );
    }

    #[test]
    fn test_flag_mismatch_is_reported() {
        let db = PolicyDatabase::build(&[entry("MIT", false, true)]);
        let findings = cross_check(db.records());

        assert_eq!(findings.len(), 1);
        assert!(matches!(&findings[0], SpdxFinding::FlagMismatch { flag: "osi", recorded: false, listed: true, .. }));
    }

    #[test]
    fn test_family_only_records_are_ignored() {
        let db = PolicyDatabase::build(&[entry("", false, false)]);
        assert!(cross_check(db.records()).is_empty());
    }
}

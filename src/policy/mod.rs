//! License policy records and the database they are resolved against
//!
//! A policy file lists records that map SPDX license identifiers to an organizational
//! [`UsagePolicy`]. Records are grouped into families, such as all GPL variants, and every
//! member of a family is expected to share one usage policy.
//!
//! # Implementation Model
//!
//! Loading is split into three stages:
//!
//! 1. [`PolicyConfig`] deserializes the JSON document leniently, keeping raw strings.
//! 2. [`PolicyRecord`] construction validates each entry. Invalid entries are skipped
//!    with a warning rather than failing the load.
//! 3. [`PolicyDatabase`] indexes the valid records by identifier, alias and family, expands
//!    family children into records of their own, and detects family conflicts.
//!
//! [`PolicyCell`] wraps the whole pipeline behind a build-once barrier, falling back to an
//! empty database when the policy file cannot be loaded.

pub mod keywords;
mod policy_cell;
mod policy_config;
mod policy_database;
mod policy_record;
pub mod spdx_check;
mod usage_policy;

pub use policy_cell::PolicyCell;
pub use policy_config::{DEFAULT_POLICIES_JSON, PolicyConfig};
pub use policy_database::{ConflictSeverity, FamilyConflict, PolicyDatabase, Resolution, SkippedRecord};
pub use policy_record::{InvalidRecord, PolicyEntry, PolicyRecord, is_spdx_id, is_valid, validate};
pub use usage_policy::UsagePolicy;

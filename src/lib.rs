//! license-policy crate
//!
//! Resolves SPDX-style license expressions into organizational usage policies.
//!
//! The [`policy`] module loads a policy file into a [`PolicyDatabase`](policy::PolicyDatabase),
//! and the [`expression`] module parses expressions such as `MIT OR (GPL-2.0-only AND Zlib)`
//! and resolves them against that database.
//!
//! ```
//! use license_policy::expression::parse_expression;
//! use license_policy::policy::{PolicyConfig, PolicyDatabase, UsagePolicy};
//!
//! let config = PolicyConfig::embedded().unwrap();
//! let db = PolicyDatabase::build(&config.policies);
//!
//! let parsed = parse_expression(&db, "MIT OR GPL-3.0-only");
//! assert_eq!(parsed.verdict(), UsagePolicy::Allow);
//! ```
//!
//! The `commands` module behind the `license-policy` binary is an implementation detail and
//! may change without warning.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod expression;
pub mod policy;

#[doc(hidden)]
pub mod commands;

pub use commands::{Host, run};

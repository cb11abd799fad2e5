//! Command-line interface for license-policy
//!
//! # Implementation Model
//!
//! The `run` function parses command-line arguments using clap and routes to one of four
//! handlers:
//!
//! - **check**: resolve license expressions and print a verdict for each
//! - **lookup**: show the record an identifier, family or alias resolves to
//! - **validate**: load a policy file and report skipped records, family conflicts and
//!   differences from the SPDX license list
//! - **init**: write the built-in policy file to disk
//!
//! Every handler writes through a [`Host`] so tests can capture output and exit codes.
//! The global `--policies`, `--color` and `--log-level` flags live in `common`.

mod check;
mod common;
mod host;
mod init;
mod lookup;
mod run;
mod validate;

pub use check::{CheckArgs, check_expressions};
pub use host::Host;
pub use init::{InitArgs, init_policies};
pub use lookup::{LookupArgs, lookup_policies};
pub use run::run;
pub use validate::{ValidateArgs, validate_policies};

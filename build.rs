//!! This build script validates the built-in policy file (`default_policies.json`)

#![allow(
    clippy::redundant_pub_crate,
    reason = "pub(crate) is correct in library context but appears redundant in build script"
)]
#![allow(dead_code, reason = "Some items may be unused in this build script context")]
#![allow(unused_imports, reason = "Some items may be unused in this build script context")]

use std::process;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[path = "src/policy/mod.rs"]
mod policy;

use policy::{ConflictSeverity, PolicyConfig, PolicyDatabase};

fn main() {
    println!("cargo:rerun-if-changed=default_policies.json");
    println!("cargo:rerun-if-changed=src/policy");

    match inner_main() {
        Ok(problems) => {
            if !problems.is_empty() {
                for problem in problems {
                    eprintln!("cargo:warning=Policy validation problem: {problem}");
                }

                process::exit(1);
            }

            process::exit(0);
        }
        Err(e) => {
            eprintln!("unable to load default_policies.json: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<Vec<String>> {
    let config = PolicyConfig::embedded()?;
    let db = PolicyDatabase::from_config(&config, ConflictSeverity::Warn)?;

    let mut problems: Vec<String> = db.skipped().iter().map(ToString::to_string).collect();
    problems.extend(db.conflicts().iter().map(ToString::to_string));

    Ok(problems)
}

//! Command dispatch logic for license-policy

use super::common::{CommonArgs, init_logging};
use super::{
    CheckArgs, InitArgs, LookupArgs, ValidateArgs, check_expressions, init_policies, lookup_policies, validate_policies,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "license-policy", version, author, long_about = None)]
#[command(about = "Check license expressions against an organizational license policy")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: PolicySubcommand,
}

#[derive(Subcommand, Debug)]
enum PolicySubcommand {
    /// Resolve license expressions to a usage policy
    Check(CheckArgs),
    /// Show the policy record matching an identifier, family or alias
    Lookup(LookupArgs),
    /// Validate a policy file
    Validate(ValidateArgs),
    /// Generate a policy file from the built-in policies
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.common.log_level);

    match &cli.command {
        PolicySubcommand::Check(check_args) => check_expressions(host, &cli.common, check_args),
        PolicySubcommand::Lookup(lookup_args) => lookup_policies(host, &cli.common, lookup_args),
        PolicySubcommand::Validate(validate_args) => validate_policies(host, &cli.common, validate_args),
        PolicySubcommand::Init(init_args) => init_policies(host, init_args),
    }
}

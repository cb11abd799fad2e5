use super::Host;
use crate::Result;
use crate::policy::PolicyConfig;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output policy file path
    #[arg(value_name = "PATH", default_value = "license-policies.json")]
    pub output: Utf8PathBuf,
}

pub fn init_policies<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    PolicyConfig::save_default(&args.output)?;
    let _ = writeln!(host.output(), "Generated default policy file: {}", args.output);
    Ok(())
}

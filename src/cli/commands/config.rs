//! Print the effective configuration

use crate::cli::Output;
use crate::config::SieveConfig;
use anyhow::Result;

pub fn execute(config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = SieveConfig::load(config_path)?;
    output.verbose("Merged from defaults, user, repository, custom file and GITSIEVE_* variables");
    print!("{}", config.to_toml()?);
    Ok(())
}

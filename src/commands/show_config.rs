use anyhow::Result;

use ondo::config::Config;

/// Print the effective configuration as TOML
pub fn show_config(config: &Config) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

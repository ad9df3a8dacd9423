//! Inspect or write the configuration file.

use clap::Subcommand;
use client_config_and_utils::{Config, CoreError, Paths};

use crate::app::CliResult;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(command: ConfigCommand, paths: &Paths, config: &Config) -> CliResult<()> {
    match command {
        ConfigCommand::Show => {
            println!("# {}", paths.config_file().display());
            let rendered = serde_json::to_string_pretty(config).map_err(CoreError::from)?;
            println!("{rendered}");
            println!("# admin API: {}", config.admin_base_url()?);
        }
        ConfigCommand::Init { force } => {
            let path = paths.config_file();
            if path.exists() && !force {
                println!("{} already exists; pass --force to overwrite.", path.display());
                return Ok(());
            }
            config.save(paths)?;
            println!("Wrote {}.", path.display());
        }
    }
    Ok(())
}

//! Configuration commands.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::QuickDevError;
use crate::output::to_json;

/// Execute config subcommands
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(paths: &Paths, cmd: ConfigCommands, format: OutputFormat) -> Result<String, QuickDevError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load(paths)?;
            match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => config.to_yaml(),
            }
        }
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(QuickDevError::Config(format!(
                    "{} already exists, use --force to overwrite",
                    paths.config_file.display()
                )));
            }
            Config::default().save(paths)?;
            Ok(format!("Wrote {}", paths.config_file.display()))
        }
    }
}

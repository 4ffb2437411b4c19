//! `scaffold config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.value(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.value(&serialise(&config)?)?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path().ok_or_else(no_config_dir)?;
            output.value(&path.display().to_string())?;
        }
    }

    Ok(())
}

pub(crate) fn serialise(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

pub(crate) fn no_config_dir() -> CliError {
    CliError::ConfigError {
        message: "No configuration directory is available on this platform".into(),
        source: None,
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `compliance.images.lint`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let root = toml::Value::try_from(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let mut node = &root;
    for part in key.split('.') {
        node = node.get(part).ok_or_else(unknown)?;
    }

    match node {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Table(_) => Err(CliError::ConfigError {
            message: format!("'{key}' is a section; use a full key or 'scaffold config list'"),
            source: None,
        }),
        other => Ok(other.to_string()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

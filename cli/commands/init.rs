use anyhow::{Context, Result};
use colored::*;
use std::fs;

use crate::cli_args::InitArgs;
use routegen_core::Config;
use routegen_core::config::{
    DEFAULT_BASE_PREFIX, DEFAULT_CONFIG_FILENAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_FILE,
    DEFAULT_ROUTES_NAME, DEFAULT_WATCH_DELAY,
};

pub fn handle_init_command(args: &InitArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_root.as_ref())
        .context("Failed to determine project root")?;
    let config_path = project_root.join(DEFAULT_CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        if !quiet {
            println!(
                "{} {} already exists at {} (use --force to overwrite).",
                "⚠️".yellow(),
                DEFAULT_CONFIG_FILENAME,
                config_path.display().to_string().cyan()
            );
        }
        return Ok(());
    }

    fs::write(&config_path, starter_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    if !quiet {
        println!(
            "{} Created {}",
            "✅".green(),
            config_path.display().to_string().blue()
        );
    }
    Ok(())
}

fn starter_config() -> String {
    format!(
        r#"# routegen configuration

# Route directory to scan, relative to the project root.
input = "{DEFAULT_INPUT_DIR}"

# Path of the generated module.
output = "{DEFAULT_OUTPUT_FILE}"

# Prefix prepended to every generated path.
base_prefix = "{DEFAULT_BASE_PREFIX}"

# Identifier of the generated routes constant.
routes_name = "{DEFAULT_ROUTES_NAME}"

# Extra import lines copied verbatim into the generated module.
# imports = ["use uuid::Uuid;"]

# Module the parameter types below are imported from.
# param_types_module = "crate::params"

# Parameter name -> Rust type used in generated signatures.
# Unlisted parameters accept `impl std::fmt::Display`.
# [param_types]
# userId = "Uuid"
# postId = "u64"

[watch]
delay = "{DEFAULT_WATCH_DELAY}"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_config_parses_back_into_defaults() {
        let config: Config = toml::from_str(&starter_config()).unwrap();
        assert_eq!(config, Config::default());
    }
}

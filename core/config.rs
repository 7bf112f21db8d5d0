use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILENAME: &str = "routegen.toml";
pub const DEFAULT_INPUT_DIR: &str = "./app/api";
pub const DEFAULT_OUTPUT_FILE: &str = "./src/generated/routes.rs";
pub const DEFAULT_BASE_PREFIX: &str = "/api";
pub const DEFAULT_ROUTES_NAME: &str = "ROUTES";
pub const DEFAULT_WATCH_DELAY: &str = "300ms";

/// Generation settings, loaded from `routegen.toml` and overridden by CLI
/// flags at the call site.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Route directory to scan, relative to the project root.
    #[serde(default = "default_input")]
    pub input: String,

    /// Path of the generated module, relative to the project root.
    #[serde(default = "default_output")]
    pub output: String,

    /// Prefix prepended to every generated path.
    #[serde(default = "default_base_prefix")]
    pub base_prefix: String,

    /// Identifier of the generated constant; the root builder type takes
    /// the PascalCase form of the same name.
    #[serde(default = "default_routes_name")]
    pub routes_name: String,

    /// Module the configured parameter types are imported from.
    #[serde(default)]
    pub param_types_module: Option<String>,

    /// Extra import lines copied verbatim into the generated module.
    #[serde(default)]
    pub imports: Vec<String>,

    /// Parameter name -> Rust type, substituted verbatim into generated
    /// signatures. Absent names fall back to `impl std::fmt::Display`.
    #[serde(default)]
    pub param_types: IndexMap<String, String>,

    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Debounce quiet period, as a human-readable duration ("300ms", "2s").
    #[serde(default = "default_watch_delay")]
    pub delay: String,
}

fn default_input() -> String {
    DEFAULT_INPUT_DIR.to_string()
}
fn default_output() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}
fn default_base_prefix() -> String {
    DEFAULT_BASE_PREFIX.to_string()
}
fn default_routes_name() -> String {
    DEFAULT_ROUTES_NAME.to_string()
}
fn default_watch_delay() -> String {
    DEFAULT_WATCH_DELAY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            base_prefix: default_base_prefix(),
            routes_name: default_routes_name(),
            param_types_module: None,
            imports: Vec::new(),
            param_types: IndexMap::new(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            delay: default_watch_delay(),
        }
    }
}

impl Config {
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_str_opt = cli_project_root
            .map(|p| p.to_string_lossy().to_string())
            .or_else(|| env::var("PROJECT_ROOT").ok().filter(|s| !s.is_empty()));

        let path_to_resolve = match path_str_opt {
            Some(p_str) => PathBuf::from(shellexpand::tilde(&p_str).as_ref()),
            None => env::current_dir()?,
        };

        path_to_resolve.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize project root '{}': {}",
                    path_to_resolve.display(),
                    e
                ),
            ))
        })
    }

    /// Locate the config file to use, if any.
    ///
    /// An explicitly named file must exist; the default
    /// `<root>/routegen.toml` is optional.
    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(p_str) => {
                let expanded = shellexpand::tilde(p_str);
                let mut path = PathBuf::from(expanded.as_ref());
                if !path.is_absolute() {
                    path = project_root.join(path);
                }
                if !path.exists() && path.extension().is_none() {
                    path.set_extension("toml");
                }
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Specified config file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified config file path: {}", path.display());
                Ok(Some(path))
            }
            None => {
                let default_path = project_root.join(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        toml::from_str::<Config>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })
    }

    /// Input directory with `~` expanded, resolved against the project root.
    pub fn resolved_input(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.input)
    }

    /// Output file with `~` expanded, resolved against the project root.
    pub fn resolved_output(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.output)
    }

    pub fn get_watch_delay(&self) -> Result<Duration> {
        parse_duration::parse(&self.watch.delay).map_err(|e| {
            AppError::InvalidArgument(format!(
                "Invalid watch delay duration '{}': {}. Use format like '500ms', '2s'.",
                self.watch.delay, e
            ))
        })
    }
}

fn resolve_against(project_root: &Path, configured: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(configured).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        project_root.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_constants() {
        let config = Config::default();
        assert_eq!(config.input, DEFAULT_INPUT_DIR);
        assert_eq!(config.output, DEFAULT_OUTPUT_FILE);
        assert_eq!(config.base_prefix, DEFAULT_BASE_PREFIX);
        assert_eq!(config.routes_name, DEFAULT_ROUTES_NAME);
        assert_eq!(config.watch.delay, DEFAULT_WATCH_DELAY);
        assert!(config.param_types.is_empty());
    }

    #[test]
    fn parses_a_full_config_file() {
        let toml_content = r#"
            input = "./app/api"
            output = "./src/routes.rs"
            base_prefix = "/v1"
            routes_name = "API"
            param_types_module = "crate::params"
            imports = ["use uuid::Uuid;"]

            [param_types]
            userId = "Uuid"
            postId = "u64"

            [watch]
            delay = "1s"
        "#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.base_prefix, "/v1");
        assert_eq!(config.routes_name, "API");
        assert_eq!(config.param_types["userId"], "Uuid");
        assert_eq!(config.param_types["postId"], "u64");
        assert_eq!(config.get_watch_delay().unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str(r#"base_prefix = "/v2""#).unwrap();
        assert_eq!(config.base_prefix, "/v2");
        assert_eq!(config.input, DEFAULT_INPUT_DIR);
        assert_eq!(config.watch.delay, DEFAULT_WATCH_DELAY);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>(r#"inptu = "typo""#).is_err());
    }

    #[test]
    fn bad_watch_delay_is_an_invalid_argument() {
        let config: Config = toml::from_str(r#"watch = { delay = "soon" }"#).unwrap();
        assert!(matches!(
            config.get_watch_delay(),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn relative_paths_resolve_against_the_project_root() {
        let config = Config::default();
        let root = Path::new("/work/project");
        assert_eq!(
            config.resolved_input(root),
            PathBuf::from("/work/project/./app/api")
        );
    }
}

use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_STAGING_FOLDER: &str = "Old_Files";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Explicit staging directory. When unset, a folder under the system
    /// temp directory is used.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
    #[serde(default = "default_staging_folder_name")]
    pub staging_folder_name: String,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_staging_folder_name() -> String {
    DEFAULT_STAGING_FOLDER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            staging_dir: None,
            staging_folder_name: default_staging_folder_name(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn resolve_staging_dir(&self) -> PathBuf {
        match &self.staging_dir {
            Some(dir) => dir.clone(),
            None => std::env::temp_dir().join(&self.staging_folder_name),
        }
    }
}

/// Load `Config.toml` (optional) from the working directory, overlaid with
/// `TIDY_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    build(ConfigFile::with_name("Config").required(false))
}

pub fn load_configuration_from(path: &Path) -> Result<AppConfig, ConfigError> {
    build(ConfigFile::from(path).required(true))
}

fn build<S>(file: S) -> Result<AppConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("TIDY")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

//! Application configuration at ~/.config/dayplan/config.toml.

use std::path::PathBuf;

use config::{Config, File};
use serde::Deserialize;

use crate::error::{PlanError, PlanResult};

static DEFAULT_DATA_FILE: &str = "~/.local/share/dayplan/schedule.json";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Base URL of the remote event store; sync commands refuse to run
    /// without it.
    pub remote_url: Option<String>,

    /// Owner id stamped onto newly pushed remote records.
    pub user_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: default_data_file(),
            remote_url: None,
            user_id: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> PlanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
            .join("dayplan");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> PlanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: AppConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| PlanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The schedule file path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> PlanResult<()> {
        let contents = format!(
            "\
# dayplan configuration

# Where your schedule lives:
# data_file = \"{DEFAULT_DATA_FILE}\"

# Remote event store to sync with:
# remote_url = \"https://events.example.com\"

# Owner id stamped onto pushed records:
# user_id = \"me\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

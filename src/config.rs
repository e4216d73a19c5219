use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default completion endpoint — any OpenAI-compatible `/chat/completions`
/// server works; Together AI is the out-of-the-box choice.
fn default_base_url() -> String {
    "https://api.together.xyz/v1".into()
}

fn default_model() -> String {
    "meta-llama/Llama-3.3-70B-Instruct-Turbo".into()
}

fn default_temperature() -> f64 {
    0.7
}

/// Name of the environment variable holding the API key. The key itself is
/// never written to disk.
fn default_api_key_env() -> String {
    "TOGETHER_API_KEY".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let todopilot_dir = home.join(".todopilot");

        Self {
            workspace_dir: todopilot_dir.clone(),
            config_path: todopilot_dir.join("config.toml"),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let todopilot_dir = home.join(".todopilot");
        let config_path = todopilot_dir.join("config.toml");

        if !todopilot_dir.exists() {
            fs::create_dir_all(&todopilot_dir)
                .context("Failed to create .todopilot directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            // Set computed paths that are skipped during serialization
            config.config_path.clone_from(&config_path);
            config.workspace_dir = todopilot_dir;
            config.apply_env_overrides();
            Ok(config)
        } else {
            let mut config = Self {
                config_path: config_path.clone(),
                workspace_dir: todopilot_dir,
                ..Self::default()
            };
            config.save()?;
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to config. The API key itself
    /// stays in the environment; only its variable name lives here.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("TODOPILOT_BASE_URL") {
            if !base_url.is_empty() {
                self.base_url = base_url;
            }
        }

        if let Ok(model) = std::env::var("TODOPILOT_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }

        if let Ok(temp_str) = std::env::var("TODOPILOT_TEMPERATURE") {
            if let Ok(temp) = temp_str.parse::<f64>() {
                if (0.0..=2.0).contains(&temp) {
                    self.temperature = temp;
                }
            }
        }

        if let Ok(workspace) = std::env::var("TODOPILOT_WORKSPACE") {
            if !workspace.is_empty() {
                self.workspace_dir = PathBuf::from(workspace);
            }
        }
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// Path of the SQLite database holding the todos.
    pub fn todo_db_path(&self) -> PathBuf {
        self.workspace_dir.join("todos.db")
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    #[cfg(test)]
    fn for_dir(dir: &std::path::Path) -> Self {
        Self {
            workspace_dir: dir.to_path_buf(),
            config_path: dir.join("config.toml"),
            ..Self::default()
        }
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storefront_editor::EditorConfig;

pub const DEFAULT_CONFIG_NAME: &str = "storefront.config.json";

/// Storefront CLI configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Layout JSON file edited by default
    #[serde(default = "default_layout_file")]
    pub layout_file: String,

    /// Session options (historyLimit, errorPolicy, idSeed)
    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_layout_file() -> String {
    "homepage.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Layout file to operate on: explicit override, else the configured one
    pub fn layout_path(&self, cwd: &str, file: Option<&Path>) -> PathBuf {
        match file {
            Some(file) => PathBuf::from(cwd).join(file),
            None => PathBuf::from(cwd).join(&self.layout_file),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout_file: default_layout_file(),
            editor: EditorConfig::default(),
        }
    }
}

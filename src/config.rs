// Configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    /// Enable verbose debug logging
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File to write the TAP stream to (stdout when unset)
    #[serde(default)]
    pub path: Option<String>,

    /// Flush the sink after every event
    #[serde(default = "default_flush")]
    pub flush: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            flush: default_flush(),
        }
    }
}

// Default values
pub const CONFIG_FILE_NAMES: [&str; 2] = [".tapreportrc", ".tapreportrc.toml"];

fn default_flush() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .tapreportrc (current directory)
        // 2. ~/.tapreportrc (home directory)
        // 3. .tapreportrc.toml (current directory)
        // 4. ~/.tapreportrc.toml (home directory)

        let cwd = std::env::current_dir().ok();
        let home = dirs::home_dir();
        Self::search(cwd.as_deref(), home.as_deref())
    }

    /// First config file found under `cwd` then `home`, per file name.
    /// Either directory may be unknown.
    pub fn search(cwd: Option<&Path>, home: Option<&Path>) -> Option<Self> {
        let roots = [cwd, home];

        for name in CONFIG_FILE_NAMES {
            for dir in roots.iter().flatten() {
                let path = dir.join(name);
                if path.exists() {
                    return Self::load_from_file(&path);
                }
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Write this configuration to a file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

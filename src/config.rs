//! Plugin configuration.
//!
//! Read once at startup and treated as immutable afterwards; every
//! component that needs the base URL or server id gets a clone at
//! construction time. Field names match the JSON config file the server
//! operator edits.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(rename = "Server Manager Server Id")]
    pub server_id: i32,

    /// Kept for config-file compatibility; the core never reads it.
    #[serde(rename = "Server Manager Server Wipe Id")]
    pub server_wipe_id: i32,

    /// Base collector URL. Trailing slash expected; path segments are
    /// appended directly with no escaping.
    #[serde(rename = "Server Manager API URL")]
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_id: 1,
            server_wipe_id: 1,
            api_url: "http://localhost:8080/".to_string(),
        }
    }
}

impl Config {
    /// Loads the config from a JSON file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads the config, writing the default file first if none exists.
    pub fn load_or_create(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }
        Self::load(path)
    }

    /// Writes the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }

    /// Platform config file location (`<config dir>/deathfeed/config.json`).
    pub fn default_path() -> io::Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "deathfeed").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

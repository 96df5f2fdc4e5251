//! Configuration management.
//!
//! Settings come from an optional `ecowaste.toml` (explicit `--config` path
//! or the file in the working directory), with environment variables layered
//! on top. Everything has a sensible default so the binary runs with no
//! config at all.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::gemini::GeminiConfig;
use crate::repository::DbContext;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ecowaste.toml";

/// Server bind configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Directory for uploaded images.
    pub media_dir: PathBuf,
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
}

/// On-disk config shape. Every section is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    database: Option<PathBuf>,
    #[serde(default)]
    media_dir: Option<PathBuf>,
    #[serde(default)]
    server: Option<ServerConfig>,
    #[serde(default)]
    gemini: Option<GeminiConfig>,
}

impl Settings {
    /// Load settings from an explicit config path, the working-directory
    /// config file, or defaults, then apply environment overrides.
    ///
    /// Supported env vars: `ECOWASTE_DB`, `ECOWASTE_MEDIA_DIR`, plus the
    /// `GEMINI_*` family handled by [`GeminiConfig::with_env_overrides`].
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let content = match explicit {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?,
            ),
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                if default.exists() {
                    Some(fs::read_to_string(default).with_context(|| {
                        format!("failed to read config file {}", default.display())
                    })?)
                } else {
                    None
                }
            }
        };

        let file: FileConfig = match content {
            Some(content) => toml::from_str(&content).context("invalid config file")?,
            None => FileConfig::default(),
        };

        let mut settings = Settings {
            database_path: file
                .database
                .unwrap_or_else(|| PathBuf::from("ecowaste.db")),
            media_dir: file.media_dir.unwrap_or_else(|| PathBuf::from("media")),
            server: file.server.unwrap_or_default(),
            gemini: file.gemini.unwrap_or_default().with_env_overrides(),
        };

        if let Ok(val) = std::env::var("ECOWASTE_DB") {
            settings.database_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("ECOWASTE_MEDIA_DIR") {
            settings.media_dir = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Create a database context for the configured database file.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::new(&self.database_path)
    }

    /// Write a starter config file. Returns false if one already exists and
    /// `force` was not given.
    pub fn write_starter_config(path: &Path, force: bool) -> anyhow::Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }

        fs::write(path, STARTER_CONFIG)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(true)
    }
}

const STARTER_CONFIG: &str = r#"# EcoWaste configuration.
# All keys are optional; the values below are the defaults.

database = "ecowaste.db"
media_dir = "media"

[server]
host = "127.0.0.1"
port = 8000

[gemini]
# The API key is usually supplied via the GEMINI_API_KEY environment
# variable (a .env file in the working directory is loaded on startup).
# api_key = ""
model = "gemini-1.5-flash"
temperature = 0.2
max_tokens = 2048
timeout_secs = 120
"#;

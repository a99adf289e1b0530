mod settings;

pub use settings::{OutputFormat, OutputSettings, Settings};

use crate::error::{ClientError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG-style, falling back to ~/.client-record/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "client-record") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".client-record"))
}

/// Load config.toml, falling back to defaults when it does not exist
pub fn load_settings(config_dir: &Path) -> Result<Settings> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ClientError::ConfigParse { path, source: e })
}

/// Create the config directory and write the settings template
pub fn init_config(config_dir: &Path) -> Result<PathBuf> {
    if config_dir.exists() {
        return Err(ClientError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir)?;
    let path = config_dir.join("config.toml");
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[output]
format = "display"   # display, json, string or table
indent = 4           # JSON indent width
"#;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoryhoardConfig {
    pub database: Option<String>,
    /// Owner tag stamped on stories created on this device
    pub owner: Option<String>,
}

impl StoryhoardConfig {
    /// Fresh config for `base` with a newly generated owner tag
    pub fn generated(base: &Path) -> Self {
        Self {
            database: Some(default_database_path_in(base).to_string_lossy().to_string()),
            owner: Some(generate_owner()),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("storyhoard.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".storyhoard").join("storyhoard.db")
}

pub fn generate_owner() -> String {
    format!("device-{}", uuid::Uuid::new_v4().simple())
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StoryhoardConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: StoryhoardConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &StoryhoardConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Returns the config directory: <platform config dir>/coverflow/
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("coverflow");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the config file path: <config dir>/coverflow/config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from the default location, or return defaults if not found.
pub fn load_config() -> Result<AppConfig> {
    load_from(&config_path()?)
}

/// Load config from `path`, or return defaults if the file does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig =
            toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
        info!(?path, images = config.images.len(), "Loaded config");
        Ok(config)
    } else {
        info!(?path, "No config found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Save config to the default location.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_to(config, &config_path()?)
}

pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!(?path, "Saved config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("coverflow-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_file("does-not-exist.toml");
        let config = load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let path = scratch_file("saved.toml");
        let mut config = AppConfig::default();
        config.images = vec![PathBuf::from("covers/a.jpg"), PathBuf::from("covers/b.jpg")];
        config.animation.smoothing = coverflow_engine::Smoothing::new(0.25).unwrap();
        config.navigation.max_swipe_step = 5;

        save_to(&config, &path).unwrap();
        let loaded = load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap(), config);
        assert!(!path.exists());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = scratch_file("broken.toml");
        std::fs::write(&path, "images = 3").unwrap();
        let loaded = load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(loaded.is_err());
        assert!(!path.exists());
    }
}

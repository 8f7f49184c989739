use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default noted data directory: ~/.noted
pub fn get_noted_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".noted"))
}

/// Path of the persisted token file inside the data directory.
pub fn get_token_file_path() -> anyhow::Result<PathBuf> {
    Ok(get_noted_data_dir()?.join("token"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.noted/config.toml (highest)
    let noted_dir = get_noted_data_dir()?;
    let noted_config = noted_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if noted_config.exists() {
        let s = std::fs::read_to_string(&noted_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Default the log directory into the data dir when file logging is on
    if cfg.logging.file
        && cfg
            .logging
            .directory
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    {
        let logs_dir = noted_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_path_is_under_data_dir() {
        let token = get_token_file_path().unwrap();
        let dir = get_noted_data_dir().unwrap();
        assert!(token.starts_with(dir));
        assert!(token.ends_with("token"));
    }
}

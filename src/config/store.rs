use anyhow::bail;

use super::structure::{ChatBotConfigInner, ChatBotConfigTOML};
use std::{
    ops::Deref,
    path::PathBuf,
};

#[derive(Debug, Clone)]
pub struct ChatBotConfig {
    pub path: PathBuf,
    cached: ChatBotConfigTOML,
    created: bool,
}

impl ChatBotConfig {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            return Self::new(path);
        }

        if !path.is_file() {
            bail!(
                "Given path exists and is not a file... either change the path or delete the file."
            );
        }

        let config_str = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            cached: toml::from_str(&config_str)?,
            created: false,
        })
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            cached: ChatBotConfigTOML::default(),
            created: true,
        };

        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }
}

impl ChatBotConfig {
    /// Whether `read` found no file and wrote the defaults.
    pub fn created(&self) -> bool {
        self.created
    }
}

impl Deref for ChatBotConfig {
    type Target = ChatBotConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}

impl PartialEq for ChatBotConfig {
    fn eq(&self, other: &Self) -> bool {
        self.cached.config == other.cached.config
    }
}

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;

/// Directory layout and URL prefix shared by both batch jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Photo wall root: holds `origin/`, `thumbnails/` and the manifest
    pub base_dir: PathBuf,
    /// Directory scanned by the HEIC converter
    pub heic_dir: PathBuf,
    /// URL under which `origin/` is served, without trailing slash
    pub public_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            heic_dir: PathBuf::from(DEFAULT_HEIC_DIR),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

impl Settings {
    /// Settings rooted at `base_dir`, everything else default.
    pub fn with_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Loads `photowall.ini` if it exists, falling back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        Ok(Self::from_ini_str(&content))
    }

    pub fn from_ini_str(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim(), value.trim().trim_matches('"'));
            }
        }

        if let Some(base_dir) = config_map.get("base_dir").filter(|v| !v.is_empty()) {
            settings.base_dir = PathBuf::from(base_dir);
        }
        if let Some(heic_dir) = config_map.get("heic_dir").filter(|v| !v.is_empty()) {
            settings.heic_dir = PathBuf::from(heic_dir);
        }
        if let Some(public_url) = config_map.get("public_url") {
            settings.public_url = public_url.trim_end_matches('/').to_string();
        }

        settings
    }

    pub fn source_dir(&self) -> PathBuf {
        self.base_dir.join(ORIGIN_DIR_NAME)
    }

    pub fn thumbnails_dir(&self) -> PathBuf {
        self.base_dir.join(THUMBNAILS_DIR_NAME)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir.join(MANIFEST_FILE_NAME)
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(SETTINGS_FILE_NAME);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_layout() {
        let settings = Settings::default();
        assert_eq!(settings.source_dir(), Path::new("public/photowall/origin"));
        assert_eq!(settings.thumbnails_dir(), Path::new("public/photowall/thumbnails"));
        assert_eq!(
            settings.manifest_path(),
            Path::new("public/photowall/images-metadata.json")
        );
        assert_eq!(settings.public_url, "/photowall/origin");
    }

    #[test]
    fn ini_overrides_known_keys() {
        let settings = Settings::from_ini_str(
            "# PhotoWall Configuration File\n\
             base_dir = \"/srv/site/photowall\"\n\
             public_url = /wall/origin/\n\
             unknown = 42\n",
        );
        assert_eq!(settings.base_dir, PathBuf::from("/srv/site/photowall"));
        assert_eq!(settings.heic_dir, PathBuf::from(DEFAULT_HEIC_DIR));
        assert_eq!(settings.public_url, "/wall/origin");
    }
}

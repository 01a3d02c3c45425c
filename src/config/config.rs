use crate::types::ReportFormat;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Metadata prefix of the live fingerprint.
    #[serde(default = "default_current_metapath")]
    pub current_metapath: String,

    /// Metadata prefix under which `event_<n>/` history nodes live.
    #[serde(default = "default_history_metapath")]
    pub history_metapath: String,

    #[serde(default = "default_max_history_events")]
    pub max_history_events: u32,

    #[serde(default)]
    pub report_format: ReportFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_current_metapath() -> String {
    "QC/current/".to_string()
}

fn default_history_metapath() -> String {
    "QC/history/".to_string()
}

fn default_max_history_events() -> u32 {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_metapath: default_current_metapath(),
            history_metapath: default_history_metapath(),
            max_history_events: default_max_history_events(),
            report_format: ReportFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "ncbi", "fingerprint-qc")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    /// Reads `path` without falling back. `Ok(None)` means there is no file;
    /// an unreadable or invalid file is an error the caller decides how to
    /// report.
    pub fn read_from(path: &Path) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(config_path) = Self::default_path() {
            self.save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

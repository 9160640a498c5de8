use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ClaimsheetError, Result};
use crate::summary::SummaryLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_name")]
    pub default_name: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Overrides the profile's layout when set.
    #[serde(default)]
    pub layout: Option<SummaryLayout>,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_name() -> String {
    "Processed_Data".to_string()
}

fn default_profile() -> String {
    "standard".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_name: default_name(),
            profile: default_profile(),
            layout: None,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("claimsheet")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ClaimsheetError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            output_dir: "/tmp/reports".to_string(),
            default_name: "March".to_string(),
            profile: "detailed".to_string(),
            layout: Some(SummaryLayout::Horizontal),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.output_dir, "/tmp/reports");
        assert_eq!(loaded.default_name, "March");
        assert_eq!(loaded.profile, "detailed");
        assert_eq!(loaded.layout, Some(SummaryLayout::Horizontal));
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.default_name, "Processed_Data");
        assert_eq!(s.profile, "standard");
        assert_eq!(s.layout, None);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"profile": "detailed"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.profile, "detailed");
        assert_eq!(s.default_name, "Processed_Data");
        assert_eq!(s.output_dir, ".");
    }

    #[test]
    fn test_shellexpand_path_plain() {
        assert_eq!(shellexpand_path("/srv/out"), PathBuf::from("/srv/out"));
        assert_eq!(shellexpand_path("reports"), PathBuf::from("reports"));
    }
}

//! Dashboard configuration, loaded from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_REJECTION_MESSAGE: &str = "Por favor, seleccione un archivo de texto (.txt)";
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Suffix form of an extension: trimmed, dot-prefixed, never empty.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        DEFAULT_EXTENSION.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chart surface names and output dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    pub vulnerability_surface: String,
    pub risk_surface: String,
    pub width: u32,
    pub height: u32,
    pub bar_dataset_label: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            vulnerability_surface: "vulnerabilidadesChart".to_string(),
            risk_surface: "riesgosChart".to_string(),
            width: 800,
            height: 400,
            bar_dataset_label: "Vulnerabilidades por Tipo".to_string(),
        }
    }
}

/// File input the upload guard attaches to and what it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub input_name: String,
    pub allowed_extension: String,
    pub rejection_message: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            input_name: "archivo".to_string(),
            allowed_extension: DEFAULT_EXTENSION.to_string(),
            rejection_message: DEFAULT_REJECTION_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub charts: ChartsConfig,
    pub upload: UploadConfig,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Also write logs to this file when set.
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            charts: ChartsConfig::default(),
            upload: UploadConfig::default(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(text)?;
        config.upload.allowed_extension = normalize_extension(&config.upload.allowed_extension);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = DashboardConfig::parse("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.upload.input_name, "archivo");
        assert_eq!(config.charts.vulnerability_surface, "vulnerabilidadesChart");
        assert_eq!(config.charts.risk_surface, "riesgosChart");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = DashboardConfig::parse(
            r#"{"upload": {"rejection_message": "Please choose a text file (.txt)"}}"#,
        )
        .unwrap();
        assert_eq!(config.upload.rejection_message, "Please choose a text file (.txt)");
        assert_eq!(config.upload.allowed_extension, ".txt");
        assert_eq!(config.charts.width, 800);
    }

    #[test]
    fn allowed_extension_is_normalized() {
        let parse = |ext: &str| {
            DashboardConfig::parse(&format!(r#"{{"upload": {{"allowed_extension": "{ext}"}}}}"#))
                .unwrap()
                .upload
                .allowed_extension
        };
        assert_eq!(parse(""), ".txt");
        assert_eq!(parse("   "), ".txt");
        assert_eq!(parse("."), ".txt");
        assert_eq!(parse("txt"), ".txt");
        assert_eq!(parse(" .log "), ".log");
        assert_eq!(parse(".TXT"), ".TXT");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DashboardConfig::load(Path::new("/nonexistent/vulnboard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vulnboard.json");
        fs::write(&path, r#"{"log_level": "debug", "charts": {"height": 300}}"#).unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.charts.height, 300);
    }
}
